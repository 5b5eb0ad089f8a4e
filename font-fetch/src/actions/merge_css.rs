use std::ops::Range;

use anyhow::Context;
use tokio::fs;
use tracing::info;

use crate::config::MergeConfig;

pub const MERGED_BEGIN: &str = "/* merged fonts: begin */\n";
pub const MERGED_END: &str = "/* merged fonts: end */\n";

fn merged_region(fonts_content: &str) -> String {
    let newline = if fonts_content.ends_with('\n') { "" } else { "\n" };
    format!("{}{}{}{}", MERGED_BEGIN, fonts_content, newline, MERGED_END)
}

/// Byte range of a region left by an earlier merge, markers included.
fn find_merged_region(index_content: &str) -> Option<Range<usize>> {
    let start = index_content.find(MERGED_BEGIN)?;
    let end = start + index_content[start..].find(MERGED_END)? + MERGED_END.len();
    Some(start..end)
}

/// Put the generated font stylesheet at the top of the site stylesheet.
///
/// The inserted CSS sits between marker comments. A later merge replaces
/// that region instead of stacking another copy, and returns `false`
/// without writing when the region already holds the current source.
pub async fn merge_css(config: &MergeConfig) -> anyhow::Result<bool> {
    let fonts_content = fs::read_to_string(&config.source)
        .await
        .with_context(|| format!("reading {}", config.source.display()))?;
    let index_content = fs::read_to_string(&config.target)
        .await
        .with_context(|| format!("reading {}", config.target.display()))?;

    let region = merged_region(&fonts_content);
    let rest = match find_merged_region(&index_content) {
        Some(range) if index_content[range.clone()] == region => {
            info!(
                "{} already holds the current {}, nothing to merge",
                config.target.display(),
                config.source.display()
            );
            return Ok(false);
        }
        Some(range) => {
            let after = &index_content[range.end..];
            format!(
                "{}{}",
                &index_content[..range.start],
                after.strip_prefix('\n').unwrap_or(after)
            )
        }
        None => index_content,
    };

    fs::write(&config.target, format!("{}\n{}", region, rest))
        .await
        .with_context(|| format!("writing {}", config.target.display()))?;

    info!(
        "Successfully merged {} into {}",
        config.source.display(),
        config.target.display()
    );
    Ok(true)
}
