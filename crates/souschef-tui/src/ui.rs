use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode, Tab, WizardStep};
use souschef_core::parse::split_origin;
use souschef_core::persona::{CHEFS, WINE_TYPES};
use souschef_core::{FlowState, PairingAnswer, PairingMode, RecipeOutcome, Theme};

/// Color roles derived from the active theme.
struct Palette {
    fg: Color,
    dim: Color,
    accent: Color,
    error: Color,
    highlight_bg: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Yellow,
            error: Color::Red,
            highlight_bg: Color::Rgb(60, 60, 60),
        },
        Theme::Light => Palette {
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Magenta,
            error: Color::Red,
            highlight_bg: Color::Rgb(220, 220, 220),
        },
    }
}

/// Parse a "#rrggbb" card color into an RGB color; falls back to the
/// default foreground on anything unexpected.
fn hex_color(hex: &str, fallback: Color) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return fallback;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => fallback,
    }
}

/// Convert one markdown line into styled spans: headings and bullets get
/// the accent color, `**bold**` runs get bold.
fn markdown_line(text: &str, palette: &Palette) -> Line<'static> {
    if let Some(heading) = text
        .strip_prefix("### ")
        .or_else(|| text.strip_prefix("## "))
        .or_else(|| text.strip_prefix("# "))
    {
        return Line::from(Span::styled(
            heading.to_string(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let mut spans: Vec<Span<'static>> = Vec::new();
    if let Some(item) = text.strip_prefix("- ").or_else(|| text.strip_prefix("* ")) {
        spans.push(Span::styled("• ".to_string(), Style::default().fg(palette.accent)));
        push_inline_spans(item, palette, &mut spans);
    } else {
        push_inline_spans(text, palette, &mut spans);
    }
    Line::from(spans)
}

/// Split a text run on `**` markers, alternating plain and bold spans.
fn push_inline_spans(text: &str, palette: &Palette, spans: &mut Vec<Span<'static>>) {
    for (i, chunk) in text.split("**").enumerate() {
        if chunk.is_empty() {
            continue;
        }
        let style = if i % 2 == 1 {
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.fg)
        };
        spans.push(Span::styled(chunk.to_string(), style));
    }
    if spans.is_empty() {
        spans.push(Span::raw(""));
    }
}

fn markdown_text(content: &str, palette: &Palette) -> Text<'static> {
    Text::from(
        content
            .lines()
            .map(|line| markdown_line(line, palette))
            .collect::<Vec<_>>(),
    )
}

pub fn render(frame: &mut Frame, app: &App) {
    let colors = palette(app.theme);

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());

    render_tabs(frame, app, &colors, chunks[0]);
    match app.tab {
        Tab::Chef => render_chef(frame, app, &colors, chunks[1]),
        Tab::Bartender => render_bartender(frame, app, &colors, chunks[1]),
    }
    render_footer(frame, app, &colors, chunks[2]);
}

fn render_tabs(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let tab_span = |label: &str, active: bool| {
        if active {
            Span::styled(
                format!(" {} ", label),
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(colors.dim))
        }
    };

    let line = Line::from(vec![
        tab_span("👨‍🍳 Sous Chef", app.tab == Tab::Chef),
        Span::styled("|", Style::default().fg(colors.dim)),
        tab_span("🍸 Bartender", app.tab == Tab::Bartender),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.dim))
        .title(" השף של סער ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_chef(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let columns =
        Layout::horizontal([Constraint::Length(28), Constraint::Min(0)]).split(area);

    render_persona_list(frame, app, colors, columns[0]);

    let right = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(columns[1]);
    render_ingredients_input(frame, app, colors, right[0]);
    render_recipe_panel(frame, app, colors, right[1]);
}

fn render_persona_list(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let items: Vec<ListItem> = CHEFS
        .iter()
        .map(|chef| {
            let title = chef.title_in(app.language);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", chef.emoji)),
                Span::styled(
                    title.to_string(),
                    Style::default().fg(hex_color(chef.color, colors.fg)),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.dim))
                .title(" Persona "),
        )
        .highlight_style(
            Style::default()
                .bg(colors.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = app.chef_state.clone();
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_ingredients_input(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let editing = app.input_mode == InputMode::Editing && app.tab == Tab::Chef;
    let border = if editing { colors.accent } else { colors.dim };

    let content = if app.ingredients_input.is_empty() && !editing {
        Span::styled(
            "what's in the fridge? press i to type",
            Style::default().fg(colors.dim),
        )
    } else {
        Span::styled(app.ingredients_input.clone(), Style::default().fg(colors.fg))
    };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Ingredients "),
    );
    frame.render_widget(input, area);

    if editing {
        let cursor_x = area.x + 1 + app.ingredients_cursor as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_recipe_panel(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    match app.recipe_flow.state() {
        FlowState::Idle => {
            let hint = Paragraph::new(Text::from(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Pick a persona, list your ingredients, press Enter.",
                    Style::default().fg(colors.dim),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(panel_block(" Recipe ", colors.dim));
            frame.render_widget(hint, area);
        }
        FlowState::Processing => {
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            let cooking = Paragraph::new(Text::from(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("מבשל{}", dots),
                    Style::default()
                        .fg(colors.accent)
                        .add_modifier(Modifier::BOLD),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(panel_block(" Recipe ", colors.dim));
            frame.render_widget(cooking, area);
        }
        FlowState::Done(RecipeOutcome::Refusal(sentence)) => {
            let apology = Paragraph::new(Line::from(Span::styled(
                sentence.clone(),
                Style::default().fg(colors.fg),
            )))
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center)
            .block(panel_block(" Recipe ", colors.dim));
            frame.render_widget(apology, area);
        }
        FlowState::Done(RecipeOutcome::Recipe(recipe)) => {
            let (body, origin) = split_origin(&recipe.content);

            let mut constraints = vec![Constraint::Length(1), Constraint::Min(0)];
            if origin.is_some() {
                constraints.push(Constraint::Length(6));
            }
            let sections = Layout::vertical(constraints)
                .split(panel_block(&format!(" {} ", recipe.dish_name), colors.accent).inner(area));

            frame.render_widget(
                panel_block(&format!(" {} ", recipe.dish_name), colors.accent),
                area,
            );

            let photo = app.photo_url.as_deref().unwrap_or("");
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("📷 ", Style::default().fg(colors.accent)),
                    Span::styled(photo.to_string(), Style::default().fg(colors.dim)),
                ])),
                sections[0],
            );

            frame.render_widget(
                Paragraph::new(markdown_text(body, colors))
                    .wrap(Wrap { trim: false })
                    .scroll((app.recipe_scroll, 0)),
                sections[1],
            );

            if let Some(origin) = origin {
                frame.render_widget(
                    Paragraph::new(markdown_text(origin, colors))
                        .wrap(Wrap { trim: false })
                        .block(panel_block(" Dish Origin ", colors.dim)),
                    sections[2],
                );
            }
        }
        FlowState::Failed(message) => {
            render_error_panel(frame, colors, area, " Recipe ", message, "press r to try again");
        }
    }
}

fn render_bartender(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let columns =
        Layout::horizontal([Constraint::Length(34), Constraint::Min(0)]).split(area);

    render_wizard(frame, app, colors, columns[0]);
    render_drink_panel(frame, app, colors, columns[1]);
}

fn render_wizard(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let mode_title = match app.pairing_mode {
        PairingMode::Wine => " Wine pairing (m to switch) ",
        PairingMode::Cocktail => " Cocktail pairing (m to switch) ",
    };

    let rows = match app.pairing_mode {
        PairingMode::Wine => Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area),
        PairingMode::Cocktail => Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area),
    };

    if app.pairing_mode == PairingMode::Wine {
        let type_items: Vec<ListItem> = WINE_TYPES
            .iter()
            .map(|t| ListItem::new(format!("{} {}", t.emoji, t.label)))
            .collect();
        let type_border = if app.wizard_step == WizardStep::Type {
            colors.accent
        } else {
            colors.dim
        };
        let mut type_state = app.wine_type_state.clone();
        frame.render_stateful_widget(
            List::new(type_items)
                .block(panel_block(mode_title, type_border))
                .highlight_style(Style::default().bg(colors.highlight_bg))
                .highlight_symbol("▶ "),
            rows[0],
            &mut type_state,
        );

        let style_items: Vec<ListItem> = app
            .current_styles()
            .iter()
            .map(|s| ListItem::new(s.label.to_string()))
            .collect();
        let style_border = if app.wizard_step == WizardStep::Style {
            colors.accent
        } else {
            colors.dim
        };
        let mut style_state = app.wine_style_state.clone();
        frame.render_stateful_widget(
            List::new(style_items)
                .block(panel_block(" Style ", style_border))
                .highlight_style(Style::default().bg(colors.highlight_bg))
                .highlight_symbol("▶ "),
            rows[1],
            &mut style_state,
        );

        render_notes_input(frame, app, colors, rows[2]);
    } else {
        // Cocktails skip the wizard; only free-text preferences apply.
        render_notes_input(frame, app, colors, rows[0]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                mode_title.trim().to_string(),
                Style::default().fg(colors.dim),
            ))),
            rows[1],
        );
    }
}

fn render_notes_input(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let editing = app.input_mode == InputMode::Editing && app.tab == Tab::Bartender;
    let border = if editing || app.wizard_step == WizardStep::Notes {
        colors.accent
    } else {
        colors.dim
    };

    let content = if app.notes_input.is_empty() && !editing {
        Span::styled("preferences? press i to type", Style::default().fg(colors.dim))
    } else {
        Span::styled(app.notes_input.clone(), Style::default().fg(colors.fg))
    };

    frame.render_widget(
        Paragraph::new(Line::from(content)).block(panel_block(" Notes ", border)),
        area,
    );

    if editing {
        let cursor_x = area.x + 1 + app.notes_cursor as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_drink_panel(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    match app.drink_flow.state() {
        FlowState::Idle => {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Walk through the wizard, or press b on a finished recipe.",
                Style::default().fg(colors.dim),
            )))
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center)
            .block(panel_block(" Pairing ", colors.dim));
            frame.render_widget(hint, area);
        }
        FlowState::Processing => {
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("מוזג{}", dots),
                    Style::default()
                        .fg(colors.accent)
                        .add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Center)
                .block(panel_block(" Pairing ", colors.dim)),
                area,
            );
        }
        FlowState::Done(PairingAnswer::Freeform(text)) => {
            frame.render_widget(
                Paragraph::new(markdown_text(text, colors))
                    .wrap(Wrap { trim: false })
                    .scroll((app.drink_scroll, 0))
                    .block(panel_block(" Pairing ", colors.accent)),
                area,
            );
        }
        FlowState::Done(PairingAnswer::Structured(card)) => {
            let (kind_label, origin_label, accents_label) = match app.pairing_mode {
                PairingMode::Wine => ("Type", "Region", "Grapes"),
                PairingMode::Cocktail => ("About", "Glass", "Garnish"),
            };
            let field = |label: &str, value: &str| {
                Line::from(vec![
                    Span::styled(
                        format!("{}: ", label),
                        Style::default()
                            .fg(colors.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(value.to_string(), Style::default().fg(colors.fg)),
                ])
            };
            let text = Text::from(vec![
                field(kind_label, &card.kind),
                field(origin_label, &card.origin),
                field(accents_label, &card.accents),
                Line::from(""),
                field("Tip", &card.serving_tip),
            ]);
            frame.render_widget(
                Paragraph::new(text)
                    .wrap(Wrap { trim: false })
                    .scroll((app.drink_scroll, 0))
                    .block(panel_block(&format!(" {} ", card.name), colors.accent)),
                area,
            );
        }
        FlowState::Failed(message) => {
            render_error_panel(frame, colors, area, " Pairing ", message, "press r to try again");
        }
    }
}

fn render_error_panel(
    frame: &mut Frame,
    colors: &Palette,
    area: Rect,
    title: &str,
    message: &str,
    hint: &str,
) {
    let text = Text::from(vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(colors.error),
        )),
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), Style::default().fg(colors.dim))),
    ]);
    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(panel_block(title, colors.error)),
        area,
    );
}

fn panel_block(title: &str, border: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title.to_string())
}

fn render_footer(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let keys = match app.tab {
        Tab::Chef => "j/k persona  i ingredients  Enter cook  n another  b pair  p auto-pair",
        Tab::Bartender => "m mode  j/k pick  Enter next  i notes  g pour  r reset",
    };
    let auto = if app.auto_pair { "auto-pair on" } else { "" };
    let line = Line::from(vec![
        Span::styled(keys.to_string(), Style::default().fg(colors.dim)),
        Span::raw("  "),
        Span::styled(
            format!(
                "t {}  l {}  {}",
                app.theme.as_str(),
                app.language.as_str(),
                auto
            ),
            Style::default().fg(colors.dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parses_card_colors() {
        assert_eq!(hex_color("#fed7aa", Color::White), Color::Rgb(0xfe, 0xd7, 0xaa));
        assert_eq!(hex_color("not-a-color", Color::White), Color::White);
    }

    #[test]
    fn test_markdown_heading_gets_accent() {
        let colors = palette(Theme::Dark);
        let line = markdown_line("### Dish Origin", &colors);
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content.as_ref(), "Dish Origin");
    }

    #[test]
    fn test_markdown_bold_splits_spans() {
        let colors = palette(Theme::Dark);
        let line = markdown_line("mix **well** now", &colors);
        let contents: Vec<_> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(contents, vec!["mix ", "well", " now"]);
    }
}
