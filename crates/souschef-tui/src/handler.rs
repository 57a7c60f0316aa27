use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputMode, Tab, WizardStep};
use crate::tui::AppEvent;
use souschef_core::PairingMode;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_flows().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Keys shared by both tabs
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.tab = match app.tab {
                Tab::Chef => Tab::Bartender,
                Tab::Bartender => Tab::Chef,
            };
            return;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return;
        }
        KeyCode::Char('l') => {
            app.toggle_language();
            return;
        }
        _ => {}
    }

    match app.tab {
        Tab::Chef => handle_chef_normal(app, key),
        Tab::Bartender => handle_bartender_normal(app, key),
    }
}

fn handle_chef_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        // Persona selection
        KeyCode::Char('j') | KeyCode::Down => app.chef_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.chef_nav_up(),

        // Ingredients entry
        KeyCode::Char('i') => {
            app.input_mode = InputMode::Editing;
            app.ingredients_cursor = app.ingredients_input.chars().count();
        }

        // Generate (silently ignored while validation fails)
        KeyCode::Enter => {
            app.start_recipe();
        }

        // Another recipe with a bumped variation counter
        KeyCode::Char('n') => {
            app.another_recipe();
        }

        // Send the finished dish to the bartender
        KeyCode::Char('b') => {
            if app.pair_current_dish() {
                app.tab = Tab::Bartender;
            }
        }

        KeyCode::Char('p') => app.auto_pair = !app.auto_pair,

        // Result scrolling
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.recipe_scroll = app.recipe_scroll.saturating_add(4);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.recipe_scroll = app.recipe_scroll.saturating_sub(4);
        }

        KeyCode::Char('r') | KeyCode::Esc => app.reset_chef(),

        _ => {}
    }
}

fn handle_bartender_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('m') => app.toggle_pairing_mode(),

        KeyCode::Char('j') | KeyCode::Down => match app.wizard_step {
            WizardStep::Type => app.wine_type_nav_down(),
            WizardStep::Style => app.wine_style_nav_down(),
            WizardStep::Notes => {}
        },
        KeyCode::Char('k') | KeyCode::Up => match app.wizard_step {
            WizardStep::Type => app.wine_type_nav_up(),
            WizardStep::Style => app.wine_style_nav_up(),
            WizardStep::Notes => {}
        },

        // Advance through the wizard; the last step fires the request
        KeyCode::Enter => match app.wizard_step {
            WizardStep::Type => {
                if app.selected_wine_type().is_some() {
                    app.wizard_step = WizardStep::Style;
                }
            }
            WizardStep::Style => {
                if app.selected_wine_style().is_some() {
                    app.wizard_step = WizardStep::Notes;
                }
            }
            WizardStep::Notes => {
                app.start_pairing_from_preferences();
            }
        },

        KeyCode::Char('i') => {
            app.input_mode = InputMode::Editing;
            app.notes_cursor = app.notes_input.chars().count();
        }

        KeyCode::Char('g') => {
            app.start_pairing_from_preferences();
        }

        // Result scrolling
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.drink_scroll = app.drink_scroll.saturating_add(4);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.drink_scroll = app.drink_scroll.saturating_sub(4);
        }

        KeyCode::Char('r') => app.reset_bartender(),

        // Esc steps back through the wizard, or clears a finished result
        KeyCode::Esc => {
            if !app.drink_flow.is_idle() {
                app.reset_bartender();
            } else if app.pairing_mode == PairingMode::Wine {
                app.wizard_step = match app.wizard_step {
                    WizardStep::Type => WizardStep::Type,
                    WizardStep::Style => WizardStep::Type,
                    WizardStep::Notes => WizardStep::Style,
                };
            }
        }

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            return;
        }
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            match app.tab {
                Tab::Chef => {
                    app.start_recipe();
                }
                Tab::Bartender => {
                    app.start_pairing_from_preferences();
                }
            }
            return;
        }
        _ => {}
    }

    // Both inputs share the same editing behavior; pick the active one.
    let (input, cursor) = match app.tab {
        Tab::Chef => (&mut app.ingredients_input, &mut app.ingredients_cursor),
        Tab::Bartender => (&mut app.notes_input, &mut app.notes_cursor),
    };

    match key.code {
        KeyCode::Backspace => {
            if *cursor > 0 {
                *cursor -= 1;
                let byte_pos = char_to_byte_index(input, *cursor);
                input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = input.chars().count();
            *cursor = (*cursor + 1).min(char_count);
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(input, *cursor);
            input.insert(byte_pos, c);
            *cursor += 1;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_byte_index_handles_hebrew() {
        let s = "שלום";
        assert_eq!(char_to_byte_index(s, 0), 0);
        assert_eq!(char_to_byte_index(s, 2), 4);
        assert_eq!(char_to_byte_index(s, 10), s.len());
    }
}
