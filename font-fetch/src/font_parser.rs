use once_cell::sync::Lazy;
use regex::Regex;
use shared_types::{FontFace, DEFAULT_STYLE, DEFAULT_WEIGHT};

pub const FONT_FACE_MARKER: &str = "@font-face";

static BLOCK_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\}\s*").unwrap());
static FAMILY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"font-family:\s*(?:'([^']+)'|"([^"]+)")"#).unwrap());
static WEIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"font-weight:\s*(\d+)").unwrap());
static STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"font-style:\s*(\w+)").unwrap());
static SRC_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"src:\s*url\(([^)]+)\)").unwrap());

/// A `@font-face` block together with the descriptor extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceBlock<'a> {
    /// Block text as it appeared in the stylesheet, without the closing brace.
    pub text: &'a str,
    /// Exact text inside `url(...)`, quotes included if there were any.
    pub raw_url: &'a str,
    pub face: FontFace,
}

impl FontFaceBlock<'_> {
    /// Path the stylesheet should reference once the font is stored locally.
    pub fn local_path(&self, public_path: &str) -> String {
        format!(
            "{}/{}",
            public_path.trim_end_matches('/'),
            self.face.file_name()
        )
    }

    /// The block with its remote url swapped for the local path and the
    /// closing brace restored.
    pub fn rewrite(&self, public_path: &str) -> String {
        let mut block = self.text.replace(self.raw_url, &self.local_path(public_path));
        block.push('}');
        block
    }
}

/// Splits a stylesheet on closing braces and keeps the pieces that declare a
/// font face. Comments preceding a block stay attached to it.
pub fn font_face_blocks(css: &str) -> Vec<&str> {
    BLOCK_END
        .split(css)
        .filter(|block| block.contains(FONT_FACE_MARKER))
        .collect()
}

pub fn extract_family(block: &str) -> Option<String> {
    let caps = FAMILY.captures(block)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

pub fn extract_weight(block: &str) -> Option<String> {
    WEIGHT.captures(block).map(|caps| caps[1].to_string())
}

pub fn extract_style(block: &str) -> Option<String> {
    STYLE.captures(block).map(|caps| caps[1].to_string())
}

pub fn extract_raw_url(block: &str) -> Option<&str> {
    SRC_URL
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn unquote(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '\'' || c == '"')
}

/// Returns `None` when the block lacks a family or a source url.
pub fn parse_block(block: &str) -> Option<FontFaceBlock<'_>> {
    let family = extract_family(block)?;
    let raw_url = extract_raw_url(block)?;

    Some(FontFaceBlock {
        text: block,
        raw_url,
        face: FontFace {
            family,
            weight: extract_weight(block).unwrap_or_else(|| DEFAULT_WEIGHT.to_string()),
            style: extract_style(block).unwrap_or_else(|| DEFAULT_STYLE.to_string()),
            url: unquote(raw_url).to_string(),
        },
    })
}
