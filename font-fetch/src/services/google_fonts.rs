// Stylesheet provider service module
// The two requests the font localizer makes: the generated stylesheet and the font files it lists

use reqwest::{header::USER_AGENT, Client};
use tracing::debug;

use crate::error::FontFetchError;

/// Fetch the provider stylesheet.
/// The user agent decides which font format the provider lists, so it is always sent.
pub async fn fetch_stylesheet(
    client: &Client,
    url: &str,
    user_agent: &str,
) -> anyhow::Result<String> {
    let response = client.get(url).header(USER_AGENT, user_agent).send().await?;

    if !response.status().is_success() {
        return Err(FontFetchError::StylesheetStatus {
            url: url.to_string(),
            status: response.status(),
        }
        .into());
    }

    let css = response.text().await?;
    debug!("Received {} bytes of CSS", css.len());
    Ok(css)
}

/// Download a single font file. The body is returned untouched.
pub async fn download_font(client: &Client, url: &str) -> anyhow::Result<Vec<u8>> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FontFetchError::FontStatus {
            url: url.to_string(),
            status: response.status(),
        }
        .into());
    }

    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}
