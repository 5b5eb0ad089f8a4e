use crate::error::FontFetchError;

pub mod fetch_fonts;
pub mod merge_css;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetAction {
    FetchFonts,
    MergeCss,
}

impl AssetAction {
    pub fn new(action: &str) -> Result<Self, FontFetchError> {
        match action {
            "FETCH_FONTS" => Ok(Self::FetchFonts),
            "MERGE_CSS" => Ok(Self::MergeCss),
            other => Err(FontFetchError::UnknownAction(other.to_string())),
        }
    }
}
