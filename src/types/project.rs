use serde::{Deserialize, Serialize};

/// Colour used for project badges when the tracker sends none.
pub const DEFAULT_PROJECT_COLOR: &str = "#666666";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl Project {
    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_PROJECT_COLOR)
    }
}
