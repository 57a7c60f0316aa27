//! Fixed catalogs: chef personas, wine types and styles, languages.
//!
//! All entries are compile-time constants; nothing here is ever mutated.

/// A chef persona constraining the tone and cuisine of generated recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chef {
    pub id: &'static str,
    pub title: &'static str,
    pub title_he: &'static str,
    pub emoji: &'static str,
    /// Card color as a hex string (e.g. "#fed7aa"); the TUI maps it to RGB.
    pub color: &'static str,
}

pub const CHEFS: [Chef; 6] = [
    Chef {
        id: "italian",
        title: "Italian Cuisine",
        title_he: "מטבח איטלקי",
        emoji: "🍝",
        color: "#fed7aa",
    },
    Chef {
        id: "patisserie",
        title: "Patisserie",
        title_he: "קונדיטוריה",
        emoji: "🧁",
        color: "#fbcfe8",
    },
    Chef {
        id: "asian",
        title: "Asian Fusion",
        title_he: "פיוז'ן אסייתי",
        emoji: "🍣",
        color: "#ddd6fe",
    },
    Chef {
        id: "rotisserie",
        title: "Rotisserie",
        title_he: "צלייה על האש",
        emoji: "🥩",
        color: "#fecaca",
    },
    Chef {
        id: "seafood",
        title: "Seafood",
        title_he: "פירות ים",
        emoji: "🐟",
        color: "#bfdbfe",
    },
    Chef {
        id: "vegan",
        title: "Vegan Specialist",
        title_he: "מומחה טבעוני",
        emoji: "🥗",
        color: "#bbf7d0",
    },
];

impl Chef {
    pub fn by_id(id: &str) -> Option<&'static Chef> {
        CHEFS.iter().find(|c| c.id == id)
    }

    /// Display title in the given language.
    pub fn title_in(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.title,
            Language::Hebrew => self.title_he,
        }
    }
}

/// A wine category the bartender can pair from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WineType {
    pub id: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
}

pub const WINE_TYPES: [WineType; 4] = [
    WineType { id: "red", label: "אדום", emoji: "🍷" },
    WineType { id: "white", label: "לבן", emoji: "🥂" },
    WineType { id: "rose", label: "רוזה", emoji: "🌸" },
    WineType { id: "sparkling", label: "מבעבע", emoji: "🍾" },
];

/// A style refinement within a wine type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WineStyle {
    pub id: &'static str,
    pub label: &'static str,
}

/// Styles available for a given wine type. The mapping is conditional:
/// each type offers its own four styles.
pub fn styles_for(wine_type_id: &str) -> &'static [WineStyle] {
    match wine_type_id {
        "red" => &[
            WineStyle { id: "rich_bold", label: "עשיר ומלא" },
            WineStyle { id: "fruity", label: "פירותי ורך" },
            WineStyle { id: "dry", label: "יבש ומורכב" },
            WineStyle { id: "light", label: "קל וזורם" },
        ],
        "white" => &[
            WineStyle { id: "crisp", label: "פריך ומרענן" },
            WineStyle { id: "fruity", label: "פירותי ואקזוטי" },
            WineStyle { id: "dry", label: "יבש ומינרלי" },
            WineStyle { id: "creamy", label: "עשיר ושמנתי" },
        ],
        "rose" => &[
            WineStyle { id: "dry", label: "יבש ומרענן" },
            WineStyle { id: "fruity", label: "פירותי וקל" },
            WineStyle { id: "semi_sweet", label: "חצי-יבש ועדין" },
            WineStyle { id: "rich", label: "מלא ומורכב" },
        ],
        "sparkling" => &[
            WineStyle { id: "brut", label: "ברוט - יבש מאוד" },
            WineStyle { id: "extra_dry", label: "אקסטרה דריי" },
            WineStyle { id: "semi_sweet", label: "חצי יבש" },
            WineStyle { id: "sweet", label: "מתוק וחגיגי" },
        ],
        _ => &[],
    }
}

/// Output language for generated recipes and pairings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Hebrew,
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Hebrew => "Hebrew",
            Language::English => "English",
        }
    }

    pub fn toggled(&self) -> Language {
        match self {
            Language::Hebrew => Language::English,
            Language::English => Language::Hebrew,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chef_lookup_by_id() {
        let chef = Chef::by_id("asian").unwrap();
        assert_eq!(chef.emoji, "🍣");
        assert_eq!(chef.title_in(Language::English), "Asian Fusion");
        assert_eq!(chef.title_in(Language::Hebrew), "פיוז'ן אסייתי");
    }

    #[test]
    fn test_unknown_chef_id() {
        assert!(Chef::by_id("molecular").is_none());
    }

    #[test]
    fn test_every_wine_type_has_styles() {
        for wine_type in &WINE_TYPES {
            assert_eq!(styles_for(wine_type.id).len(), 4, "type {}", wine_type.id);
        }
    }

    #[test]
    fn test_unknown_wine_type_has_no_styles() {
        assert!(styles_for("orange").is_empty());
    }

    #[test]
    fn test_language_toggle_round_trips() {
        assert_eq!(Language::Hebrew.toggled().toggled(), Language::Hebrew);
    }
}
