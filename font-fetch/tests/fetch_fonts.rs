//! End-to-end runs of the font localizer against a mocked provider.

use std::fs;

use font_fetch::actions::fetch_fonts::{localize, LOCAL_CSS_HEADER};
use font_fetch::config::FontConfig;
use font_fetch::error::FontFetchError;
use reqwest::Client;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_AGENT: &str = "font-fetch-test/1.0";

fn face_block(subset: &str, family: &str, style: Option<&str>, weight: Option<u16>, url: &str) -> String {
    let mut block = format!("/* {} */\n@font-face {{\n  font-family: '{}';\n", subset, family);
    if let Some(style) = style {
        block.push_str(&format!("  font-style: {};\n", style));
    }
    if let Some(weight) = weight {
        block.push_str(&format!("  font-weight: {};\n", weight));
    }
    block.push_str(&format!(
        "  font-display: swap;\n  src: url({}) format('woff2');\n  unicode-range: U+0000-00FF;\n}}\n",
        url
    ));
    block
}

/// Two usable faces and one block with no `src`.
fn provider_css(base: &str) -> String {
    let mut css = face_block("latin", "Inter", Some("normal"), Some(400), &format!("{}/s/inter/a.woff2", base));
    css.push_str(&face_block("latin", "Space Grotesk", None, Some(700), &format!("{}/s/grotesk/b.woff2", base)));
    css.push_str("/* broken */\n@font-face {\n  font-family: 'Broken';\n  font-weight: 400;\n}\n");
    css
}

fn config_for(server: &MockServer, dir: &TempDir) -> FontConfig {
    FontConfig {
        stylesheet_url: format!("{}/css2?family=Inter:wght@400&display=swap", server.uri()),
        user_agent: TEST_AGENT.to_string(),
        output_dir: dir.path().join("public/fonts"),
        css_output: dir.path().join("fonts.css"),
        public_path: "/fonts".to_string(),
    }
}

async fn mount_stylesheet(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/css2"))
        .and(header("User-Agent", TEST_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_font(server: &MockServer, font_path: &str, body: &[u8], hits: u64) {
    Mock::given(method("GET"))
        .and(path(font_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn downloads_each_face_and_rewrites_urls() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    mount_stylesheet(&server, provider_css(&server.uri())).await;
    mount_font(&server, "/s/inter/a.woff2", b"inter-bytes", 1).await;
    mount_font(&server, "/s/grotesk/b.woff2", b"grotesk-bytes", 1).await;

    let summary = localize(&Client::new(), &config).await.unwrap();

    assert_eq!(
        summary.downloaded,
        vec!["Inter-400-normal.woff2", "SpaceGrotesk-700-normal.woff2"]
    );
    assert!(summary.skipped.is_empty());
    assert_eq!(summary.dropped_blocks, 1);
    assert_eq!(summary.blocks_written, 2);
    assert!(summary.stylesheet_written);

    assert_eq!(
        fs::read(config.output_dir.join("Inter-400-normal.woff2")).unwrap(),
        b"inter-bytes"
    );
    assert_eq!(
        fs::read(config.output_dir.join("SpaceGrotesk-700-normal.woff2")).unwrap(),
        b"grotesk-bytes"
    );

    let css = fs::read_to_string(&config.css_output).unwrap();
    assert!(css.starts_with(LOCAL_CSS_HEADER));
    assert_eq!(css.matches("@font-face").count(), 2);
    assert!(css.contains("src: url(/fonts/Inter-400-normal.woff2) format('woff2');"));
    assert!(css.contains("src: url(/fonts/SpaceGrotesk-700-normal.woff2) format('woff2');"));
    assert!(!css.contains(&server.uri()));
    assert!(!css.contains("Broken"));
}

#[tokio::test]
async fn rerun_with_existing_files_makes_no_downloads() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    fs::create_dir_all(&config.output_dir).unwrap();
    fs::write(config.output_dir.join("Inter-400-normal.woff2"), b"cached").unwrap();
    fs::write(config.output_dir.join("SpaceGrotesk-700-normal.woff2"), b"cached").unwrap();

    mount_stylesheet(&server, provider_css(&server.uri())).await;
    mount_font(&server, "/s/inter/a.woff2", b"fresh", 0).await;
    mount_font(&server, "/s/grotesk/b.woff2", b"fresh", 0).await;

    let summary = localize(&Client::new(), &config).await.unwrap();

    assert!(summary.downloaded.is_empty());
    assert_eq!(summary.skipped.len(), 2);
    assert_eq!(summary.blocks_written, 2);
    assert_eq!(
        fs::read(config.output_dir.join("Inter-400-normal.woff2")).unwrap(),
        b"cached"
    );

    let css = fs::read_to_string(&config.css_output).unwrap();
    assert_eq!(css.matches("@font-face").count(), 2);
    assert!(css.contains("/fonts/SpaceGrotesk-700-normal.woff2"));
}

#[tokio::test]
async fn stylesheet_error_status_aborts_before_downloads() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    Mock::given(method("GET"))
        .and(path("/css2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    mount_font(&server, "/s/inter/a.woff2", b"unused", 0).await;

    let err = localize(&Client::new(), &config).await.unwrap_err();

    match err.downcast_ref::<FontFetchError>() {
        Some(FontFetchError::StylesheetStatus { status, .. }) => {
            assert_eq!(status.as_u16(), 503)
        }
        other => panic!("expected StylesheetStatus, got {:?}", other),
    }
    assert!(!config.css_output.exists());
}

#[tokio::test]
async fn failed_font_download_stops_the_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    mount_stylesheet(&server, provider_css(&server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/s/inter/a.woff2"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_font(&server, "/s/grotesk/b.woff2", b"unused", 0).await;

    let err = localize(&Client::new(), &config).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FontFetchError>(),
        Some(FontFetchError::FontStatus { .. })
    ));
    assert!(!config.output_dir.join("Inter-400-normal.woff2").exists());
    assert!(!config.css_output.exists());
}

#[tokio::test]
async fn stylesheet_without_usable_faces_writes_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    mount_stylesheet(
        &server,
        "/* nothing */\n@font-face {\n  font-weight: 400;\n}\nbody { margin: 0; }\n".to_string(),
    )
    .await;

    let summary = localize(&Client::new(), &config).await.unwrap();

    assert_eq!(summary.blocks_written, 0);
    assert_eq!(summary.dropped_blocks, 1);
    assert!(!summary.stylesheet_written);
    assert!(!config.css_output.exists());
}

#[tokio::test]
async fn subsets_sharing_a_file_name_download_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    let base = server.uri();
    let mut css = face_block("cyrillic", "Inter", Some("normal"), Some(400), &format!("{}/s/inter/cyr.woff2", base));
    css.push_str(&face_block("latin", "Inter", Some("normal"), Some(400), &format!("{}/s/inter/lat.woff2", base)));

    mount_stylesheet(&server, css).await;
    mount_font(&server, "/s/inter/cyr.woff2", b"cyrillic", 1).await;
    mount_font(&server, "/s/inter/lat.woff2", b"latin", 0).await;

    let summary = localize(&Client::new(), &config).await.unwrap();

    assert_eq!(summary.downloaded, vec!["Inter-400-normal.woff2"]);
    assert_eq!(summary.skipped, vec!["Inter-400-normal.woff2"]);
    assert_eq!(
        fs::read(config.output_dir.join("Inter-400-normal.woff2")).unwrap(),
        b"cyrillic"
    );

    let css = fs::read_to_string(&config.css_output).unwrap();
    assert_eq!(css.matches("/fonts/Inter-400-normal.woff2").count(), 2);
}
