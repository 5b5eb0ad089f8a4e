use std::collections::HashMap;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client as HttpClient;
use shared_types::LocalizeSummary;
use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::config::FontConfig;
use crate::font_parser::{font_face_blocks, parse_block};
use crate::services::google_fonts::{download_font, fetch_stylesheet};

pub const LOCAL_CSS_HEADER: &str = "/* Local Fonts */\n";

/// Anything this short is the header with nothing behind it.
const MIN_CSS_LEN: usize = 20;

pub async fn fetch_fonts(config: &FontConfig) -> anyhow::Result<LocalizeSummary> {
    let http_client = HttpClient::new();
    localize(&http_client, config).await
}

/// Download every font the provider stylesheet references into
/// `config.output_dir` and write a stylesheet pointing at the local copies.
///
/// Files already on disk are reused without a request. A failed stylesheet
/// fetch or font download aborts the run; blocks missing a family or url are
/// dropped.
pub async fn localize(
    http_client: &HttpClient,
    config: &FontConfig,
) -> anyhow::Result<LocalizeSummary> {
    fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    info!("🔤 Fetching CSS from {}", config.stylesheet_url);
    let css = fetch_stylesheet(http_client, &config.stylesheet_url, &config.user_agent).await?;
    info!("CSS fetched. Parsing...");

    let blocks = font_face_blocks(&css);
    let progress = ProgressBar::new(blocks.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let mut summary = LocalizeSummary::default();
    let mut local_css = String::from(LOCAL_CSS_HEADER);
    // file name -> url it was first seen with
    let mut sources: HashMap<String, String> = HashMap::new();

    for block in blocks {
        progress.inc(1);

        let Some(parsed) = parse_block(block) else {
            progress.suspend(|| debug!("Dropping @font-face block without family or url"));
            summary.dropped_blocks += 1;
            continue;
        };

        let filename = parsed.face.file_name();
        progress.set_message(filename.clone());

        let first_url = sources
            .entry(filename.clone())
            .or_insert_with(|| parsed.face.url.clone());
        if *first_url != parsed.face.url {
            progress.suspend(|| {
                warn!(
                    "⚠️  {} is also declared with {}, keeping the file from {}",
                    filename, parsed.face.url, first_url
                )
            });
        }

        let filepath = config.output_dir.join(&filename);
        let exists = fs::try_exists(&filepath)
            .await
            .with_context(|| format!("checking {}", filepath.display()))?;

        if exists {
            progress.suspend(|| info!("Skipping {} (exists)", filename));
            summary.skipped.push(filename);
        } else {
            progress.suspend(|| info!("📥 Downloading {}...", filename));
            let font_data = download_font(http_client, &parsed.face.url).await?;
            fs::write(&filepath, &font_data)
                .await
                .with_context(|| format!("writing {}", filepath.display()))?;
            summary.downloaded.push(filename);
        }

        local_css.push_str(&parsed.rewrite(&config.public_path));
        local_css.push('\n');
        summary.blocks_written += 1;
    }

    progress.finish_and_clear();

    if local_css.len() > MIN_CSS_LEN {
        if let Some(parent) = config.css_output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&config.css_output, &local_css)
            .await
            .with_context(|| format!("writing {}", config.css_output.display()))?;
        summary.stylesheet_written = true;
        info!("✅ Generated {}", config.css_output.display());
    } else {
        error!("❌ Failed to generate CSS content.");
    }

    Ok(summary)
}
