use std::env;
use std::path::PathBuf;

use url::Url;

use crate::error::FontFetchError;

pub const DEFAULT_FONTS_URL: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500&family=Space+Grotesk:wght@300;400;500;600;700&family=Noto+Sans+JP:wght@300;400;500&display=swap";

// Google Fonts only serves woff2 to clients it recognises as modern browsers.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_OUTPUT_DIR: &str = "public/fonts";
pub const DEFAULT_CSS_OUTPUT: &str = "fonts.css";
pub const DEFAULT_PUBLIC_PATH: &str = "/fonts";
pub const DEFAULT_MERGE_TARGET: &str = "index.css";

/// Settings for the font localizer.
#[derive(Debug, Clone)]
pub struct FontConfig {
    pub stylesheet_url: String,
    pub user_agent: String,
    /// Directory the `.woff2` files are written to.
    pub output_dir: PathBuf,
    /// Path of the rewritten stylesheet.
    pub css_output: PathBuf,
    /// URL prefix the web server exposes `output_dir` under.
    pub public_path: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            stylesheet_url: DEFAULT_FONTS_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            css_output: PathBuf::from(DEFAULT_CSS_OUTPUT),
            public_path: DEFAULT_PUBLIC_PATH.to_string(),
        }
    }
}

impl FontConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to the
    /// defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let stylesheet_url = lookup("FONTS_URL").unwrap_or(defaults.stylesheet_url);

        Url::parse(&stylesheet_url).map_err(|source| FontFetchError::InvalidUrl {
            url: stylesheet_url.clone(),
            source,
        })?;

        Ok(Self {
            stylesheet_url,
            user_agent: lookup("FONTS_USER_AGENT").unwrap_or(defaults.user_agent),
            output_dir: lookup("FONTS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            css_output: lookup("FONTS_CSS_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.css_output),
            public_path: lookup("FONTS_PUBLIC_PATH").unwrap_or(defaults.public_path),
        })
    }
}

/// Settings for prepending the generated font stylesheet to the site stylesheet.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_CSS_OUTPUT),
            target: PathBuf::from(DEFAULT_MERGE_TARGET),
        }
    }
}

impl MergeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            source: lookup("MERGE_CSS_SOURCE")
                .map(PathBuf::from)
                .unwrap_or(defaults.source),
            target: lookup("MERGE_CSS_TARGET")
                .map(PathBuf::from)
                .unwrap_or(defaults.target),
        }
    }
}
