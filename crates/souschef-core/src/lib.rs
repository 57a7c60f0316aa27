pub mod ai;
pub mod config;
pub mod flow;
pub mod image;
pub mod parse;
pub mod persona;
pub mod prompt;

// Re-export main types for convenience
pub use ai::{FakeModel, GeminiClient, GenError, ModelGateway, OutputFormat};
pub use config::{Config, Theme};
pub use flow::{AsyncFlow, FlowState};
pub use parse::{DrinkCard, PairingAnswer, Recipe, RecipeOutcome};
pub use persona::{Chef, Language, WineStyle, WineType, CHEFS, WINE_TYPES};
pub use prompt::{PairingContext, PairingMode};
