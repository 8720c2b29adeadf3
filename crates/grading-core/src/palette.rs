use serde::{Deserialize, Serialize};

use crate::Category;

/// Category -> background color table.
///
/// Categories are what the grader emits; colors are a display concern, so a
/// surface picks one palette and looks every category up in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub green: String,
    pub yellow: String,
    pub orange: String,
    pub red: String,
    pub white: String,
}

impl Palette {
    /// Pastel cell backgrounds used by the web front end.
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            green: "#C3E6CB".to_string(),
            yellow: "#FFF0B5".to_string(),
            orange: "#FFD8A8".to_string(),
            red: "#FFBDC4".to_string(),
            white: "#FFFFFF".to_string(),
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            green: "#1B7F3B".to_string(),
            yellow: "#E0B000".to_string(),
            orange: "#E06A00".to_string(),
            red: "#C62828".to_string(),
            white: "#FFFFFF".to_string(),
        }
    }

    /// Look a palette up by its configuration name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(Self::classic()),
            "high-contrast" | "high_contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    pub fn color(&self, category: Category) -> &str {
        match category {
            Category::Green => &self.green,
            Category::Yellow => &self.yellow,
            Category::Orange => &self.orange,
            Category::Red => &self.red,
            Category::White => &self.white,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}
