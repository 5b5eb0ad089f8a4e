use serde::{Deserialize, Serialize};

pub const DEFAULT_WEIGHT: &str = "400";
pub const DEFAULT_STYLE: &str = "normal";

/// One `@font-face` declaration pulled out of a provider stylesheet.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FontFace {
    pub family: String,
    /// Digits exactly as declared, leading zeros included.
    pub weight: String,
    pub style: String,
    pub url: String,
}

impl FontFace {
    /// Local file name for this face: `{family}-{weight}-{style}.woff2` with
    /// spaces stripped from the family.
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}-{}.woff2",
            self.family.replace(' ', ""),
            self.weight,
            self.style
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct LocalizeSummary {
    pub downloaded: Vec<String>,
    pub skipped: Vec<String>,
    pub dropped_blocks: usize,
    pub blocks_written: usize,
    pub stylesheet_written: bool,
}
