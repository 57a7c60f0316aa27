use std::sync::Arc;

use ratatui::widgets::ListState;
use tokio::task::JoinHandle;

use souschef_core::image::dish_image_url;
use souschef_core::parse;
use souschef_core::persona::{styles_for, Chef, Language, WineStyle, WineType, CHEFS, WINE_TYPES};
use souschef_core::prompt::{build_pairing_prompt, build_recipe_prompt, PairingContext, PairingMode};
use souschef_core::{
    AsyncFlow, Config, GenError, ModelGateway, OutputFormat, PairingAnswer, Recipe, RecipeOutcome,
    Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chef,
    Bartender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Steps of the bartender's manual wine wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Type,
    Style,
    Notes,
}

type TaskSlot<T> = Option<(u64, JoinHandle<Result<T, GenError>>)>;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub language: Language,

    // Chef flow
    pub chef_state: ListState,
    pub ingredients_input: String,
    pub ingredients_cursor: usize,
    pub variation: u32,
    pub recipe_flow: AsyncFlow<RecipeOutcome>,
    pub photo_url: Option<String>,
    pub recipe_scroll: u16,
    pub auto_pair: bool,
    recipe_task: TaskSlot<RecipeOutcome>,

    // Bartender flow
    pub pairing_mode: PairingMode,
    pub wizard_step: WizardStep,
    pub wine_type_state: ListState,
    pub wine_style_state: ListState,
    pub notes_input: String,
    pub notes_cursor: usize,
    pub drink_flow: AsyncFlow<PairingAnswer>,
    pub drink_scroll: u16,
    drink_task: TaskSlot<PairingAnswer>,

    // Animation state
    pub animation_frame: u8,

    gateway: Arc<dyn ModelGateway>,
}

impl App {
    pub fn new(config: &Config, gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            should_quit: false,
            tab: Tab::Chef,
            input_mode: InputMode::Normal,
            theme: config.resolved_theme(),
            language: Language::Hebrew,

            chef_state: ListState::default(),
            ingredients_input: String::new(),
            ingredients_cursor: 0,
            variation: 1,
            recipe_flow: AsyncFlow::new(),
            photo_url: None,
            recipe_scroll: 0,
            auto_pair: false,
            recipe_task: None,

            pairing_mode: PairingMode::Wine,
            wizard_step: WizardStep::Type,
            wine_type_state: ListState::default(),
            wine_style_state: ListState::default(),
            notes_input: String::new(),
            notes_cursor: 0,
            drink_flow: AsyncFlow::new(),
            drink_scroll: 0,
            drink_task: None,

            animation_frame: 0,

            gateway,
        }
    }

    // Selection helpers
    pub fn selected_chef(&self) -> Option<&'static Chef> {
        self.chef_state.selected().and_then(|i| CHEFS.get(i))
    }

    pub fn selected_wine_type(&self) -> Option<&'static WineType> {
        self.wine_type_state
            .selected()
            .and_then(|i| WINE_TYPES.get(i))
    }

    pub fn selected_wine_style(&self) -> Option<&'static WineStyle> {
        let styles = self.current_styles();
        self.wine_style_state.selected().and_then(|i| styles.get(i))
    }

    pub fn current_styles(&self) -> &'static [WineStyle] {
        self.selected_wine_type()
            .map(|t| styles_for(t.id))
            .unwrap_or(&[])
    }

    // Navigation
    pub fn chef_nav_down(&mut self) {
        let i = self.chef_state.selected().map(|i| i + 1).unwrap_or(0);
        self.chef_state.select(Some(i.min(CHEFS.len() - 1)));
    }

    pub fn chef_nav_up(&mut self) {
        let i = self.chef_state.selected().unwrap_or(0);
        self.chef_state.select(Some(i.saturating_sub(1)));
    }

    pub fn wine_type_nav_down(&mut self) {
        let i = self.wine_type_state.selected().map(|i| i + 1).unwrap_or(0);
        self.wine_type_state.select(Some(i.min(WINE_TYPES.len() - 1)));
        // Styles depend on the type; a stale style selection is meaningless.
        self.wine_style_state.select(None);
    }

    pub fn wine_type_nav_up(&mut self) {
        let i = self.wine_type_state.selected().unwrap_or(0);
        self.wine_type_state.select(Some(i.saturating_sub(1)));
        self.wine_style_state.select(None);
    }

    pub fn wine_style_nav_down(&mut self) {
        let len = self.current_styles().len();
        if len > 0 {
            let i = self.wine_style_state.selected().map(|i| i + 1).unwrap_or(0);
            self.wine_style_state.select(Some(i.min(len - 1)));
        }
    }

    pub fn wine_style_nav_up(&mut self) {
        let i = self.wine_style_state.selected().unwrap_or(0);
        self.wine_style_state.select(Some(i.saturating_sub(1)));
    }

    // Toggles
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        let _ = Config::save_theme(self.theme);
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggled();
    }

    pub fn toggle_pairing_mode(&mut self) {
        self.pairing_mode = match self.pairing_mode {
            PairingMode::Wine => PairingMode::Cocktail,
            PairingMode::Cocktail => PairingMode::Wine,
        };
        self.wizard_step = match self.pairing_mode {
            PairingMode::Wine => WizardStep::Type,
            // No wizard for cocktails; preferences are free text only.
            PairingMode::Cocktail => WizardStep::Notes,
        };
    }

    /// Start a recipe generation. Returns false (and does nothing) when
    /// validation fails: a persona must be selected and the ingredient
    /// list must be non-empty.
    pub fn start_recipe(&mut self) -> bool {
        let Some(chef) = self.selected_chef() else {
            return false;
        };
        if self.ingredients_input.trim().is_empty() {
            return false;
        }

        let prompt =
            build_recipe_prompt(chef, &self.ingredients_input, self.language, self.variation);
        let token = self.recipe_flow.begin();
        self.photo_url = None;
        self.recipe_scroll = 0;

        let gateway = self.gateway.clone();
        self.recipe_task = Some((
            token,
            tokio::spawn(async move {
                let text = gateway.generate(&prompt, OutputFormat::Json).await?;
                parse::recipe_outcome(&text)
            }),
        ));
        true
    }

    /// "Another recipe": same ingredients, incremented variation counter.
    pub fn another_recipe(&mut self) -> bool {
        if self.recipe_flow.result().is_none() {
            return false;
        }
        self.variation += 1;
        self.start_recipe()
    }

    pub fn reset_chef(&mut self) {
        self.recipe_flow.reset();
        self.recipe_task = None;
        self.photo_url = None;
        self.recipe_scroll = 0;
    }

    /// Start a pairing from the wizard selections and/or free-text notes.
    /// Requests the structured drink card. Returns false when nothing
    /// usable has been entered.
    pub fn start_pairing_from_preferences(&mut self) -> bool {
        let wine_type = match self.pairing_mode {
            PairingMode::Wine => self.selected_wine_type(),
            PairingMode::Cocktail => None,
        };
        let wine_style = match self.pairing_mode {
            PairingMode::Wine => self.selected_wine_style(),
            PairingMode::Cocktail => None,
        };

        let has_wizard_choice = wine_type.is_some() && wine_style.is_some();
        if !has_wizard_choice && self.notes_input.trim().is_empty() {
            return false;
        }

        let context = PairingContext::Preferences {
            wine_type: wine_type.map(|t| t.label.to_string()),
            wine_style: wine_style.map(|s| s.label.to_string()),
            notes: self.notes_input.clone(),
        };
        self.start_pairing(context, OutputFormat::Json);
        true
    }

    /// Pair against the currently generated dish, if there is one.
    pub fn pair_current_dish(&mut self) -> bool {
        let Some(RecipeOutcome::Recipe(recipe)) = self.recipe_flow.result() else {
            return false;
        };
        let context = PairingContext::Dish(recipe.content.clone());
        self.start_pairing(context, OutputFormat::Json);
        true
    }

    /// Hook invoked when the Chef flow hands over a finished recipe.
    /// With auto-pairing on, chains straight into a freeform pairing.
    fn on_recipe_ready(&mut self, recipe: &Recipe) {
        if !self.auto_pair {
            return;
        }
        let context = PairingContext::Dish(recipe.content.clone());
        self.start_pairing(context, OutputFormat::Text);
    }

    fn start_pairing(&mut self, context: PairingContext, format: OutputFormat) {
        let prompt = build_pairing_prompt(self.pairing_mode, &context, self.language, format);
        let token = self.drink_flow.begin();
        self.drink_scroll = 0;

        let gateway = self.gateway.clone();
        self.drink_task = Some((
            token,
            tokio::spawn(async move {
                let text = gateway.generate(&prompt, format).await?;
                parse::pairing_answer(&text, format)
            }),
        ));
    }

    pub fn reset_bartender(&mut self) {
        self.drink_flow.reset();
        self.drink_task = None;
        self.drink_scroll = 0;
        self.wizard_step = match self.pairing_mode {
            PairingMode::Wine => WizardStep::Type,
            PairingMode::Cocktail => WizardStep::Notes,
        };
    }

    /// Collect finished generation tasks and apply their results. Called
    /// on every tick; never blocks on an unfinished task.
    pub async fn poll_flows(&mut self) {
        if let Some((token, handle)) = self.recipe_task.take() {
            if handle.is_finished() {
                self.finish_recipe(token, handle).await;
            } else {
                self.recipe_task = Some((token, handle));
            }
        }

        if let Some((token, handle)) = self.drink_task.take() {
            if handle.is_finished() {
                self.finish_drink(token, handle).await;
            } else {
                self.drink_task = Some((token, handle));
            }
        }
    }

    async fn finish_recipe(&mut self, token: u64, handle: JoinHandle<Result<RecipeOutcome, GenError>>) {
        let result = match handle.await {
            Ok(outcome) => outcome.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        if !self.recipe_flow.finish(token, result) {
            return;
        }

        // The apology outcome renders as-is; only a real recipe gets a
        // photo and can chain into a pairing.
        if let Some(RecipeOutcome::Recipe(recipe)) = self.recipe_flow.result() {
            self.photo_url = Some(dish_image_url(&recipe.dish_name));
            let recipe = recipe.clone();
            self.on_recipe_ready(&recipe);
        }
    }

    async fn finish_drink(&mut self, token: u64, handle: JoinHandle<Result<PairingAnswer, GenError>>) {
        let result = match handle.await {
            Ok(answer) => answer.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        self.drink_flow.finish(token, result);
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.recipe_flow.is_processing() || self.drink_flow.is_processing() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Await all outstanding generation tasks, including any chained
    /// pairing spawned by a finished recipe.
    #[cfg(test)]
    async fn settle(&mut self) {
        while self.recipe_task.is_some() || self.drink_task.is_some() {
            if let Some((token, handle)) = self.recipe_task.take() {
                self.finish_recipe(token, handle).await;
            }
            if let Some((token, handle)) = self.drink_task.take() {
                self.finish_drink(token, handle).await;
            }
        }
    }
}
