use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// What the user is quitting. "Unset" is `Option::<Category>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Smoking,
    Drinking,
    Both,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Smoking, Category::Drinking, Category::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Smoking => "smoking",
            Category::Drinking => "drinking",
            Category::Both => "both",
        }
    }

    pub fn includes_smoking(&self) -> bool {
        matches!(self, Category::Smoking | Category::Both)
    }

    pub fn includes_drinking(&self) -> bool {
        matches!(self, Category::Drinking | Category::Both)
    }

    /// Page heading, e.g. "Quit Smoking".
    pub fn title(category: Option<Category>) -> &'static str {
        match category {
            Some(Category::Smoking) => "Quit Smoking",
            Some(Category::Drinking) => "Quit Drinking",
            Some(Category::Both) => "Quit Smoking & Drinking",
            None => "Recovery",
        }
    }

    /// Habit phrase used in "Days without ...".
    pub fn habit(category: Option<Category>) -> &'static str {
        match category {
            Some(Category::Smoking) => "smoking",
            Some(Category::Drinking) => "drinking",
            Some(Category::Both) => "smoking and drinking",
            None => "your addiction",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smoking" => Ok(Category::Smoking),
            "drinking" => Ok(Category::Drinking),
            "both" => Ok(Category::Both),
            other => Err(ValidationError::UnknownCategory(other.to_string())),
        }
    }
}
