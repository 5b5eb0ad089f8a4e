use std::env;

use dotenv::dotenv;
use font_fetch::actions::{fetch_fonts::fetch_fonts, merge_css::merge_css, AssetAction};
use font_fetch::config::{FontConfig, MergeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,font_fetch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let action = env::var("ACTION").unwrap_or_else(|_| "FETCH_FONTS".into());

    match AssetAction::new(&action)? {
        AssetAction::FetchFonts => {
            let config = FontConfig::from_env()?;
            let summary = fetch_fonts(&config).await?;
            tracing::info!("📈 Final Results: {}", serde_json::to_string(&summary)?);
        }
        AssetAction::MergeCss => {
            merge_css(&MergeConfig::from_env()).await?;
        }
    }

    Ok(())
}
