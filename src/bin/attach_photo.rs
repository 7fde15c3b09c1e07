//! Uploads an image through the relay and attaches it to a facility.
//!
//! Usage: `attach_photo <facility_id> <theme> <image_path>`
//!
//! Reads `RELAY_BASE_URL`, `IMAGE_DIRECT_ATTACH` and `PHOTO_BASE_URL` from the
//! environment (or `.env`). Without direct attach the photo only lands in the
//! facility's candidate pool.

use anyhow::Context;
use fkg_upload::{
    application::{
        attachment_panel::use_case::{AttachmentPanel, PanelOptions},
        upload_form::use_case::UploadForm,
    },
    config::ClientConfig,
    domain::attachment::entity::ContextUpdate,
    infrastructure::relay_client::http_relay_client::HttpRelayClient,
};
use std::{path::Path, sync::Arc};

fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        anyhow::bail!(
            "usage: {} <facility_id> <theme> <image_path>",
            args.first().map_or("attach_photo", String::as_str)
        );
    }
    let (facility_id, theme, image_path) = (&args[1], &args[2], Path::new(&args[3]));

    let config = ClientConfig::from_env()?;
    let api = Arc::new(HttpRelayClient::new(&config.relay_base_url)?);

    let panel = AttachmentPanel::mount(
        api.clone(),
        PanelOptions {
            photo_base_url: config.photo_base_url.clone(),
        },
    );
    let handle = panel.handle();

    println!("📍 Selecting facility {} ({})", facility_id, theme);
    handle
        .set_context(ContextUpdate::facility(facility_id.as_str(), theme.as_str()))
        .await?;

    let data = tokio::fs::read(image_path)
        .await
        .with_context(|| format!("failed to read {}", image_path.display()))?;

    let mut form = UploadForm::new(api, Some(handle.clone()), config.image_direct_attach);
    form.capture(content_type_for(image_path), &data);

    println!("⬆️  Uploading {} ({} bytes)", image_path.display(), data.len());
    let response = form.submit().await?;
    println!("✅ Relay answered: {}", response);

    if !config.image_direct_attach {
        handle.refresh().await?;
    }

    let view = panel.view().await;
    println!("{}", serde_json::to_string_pretty(&view)?);

    panel.unmount();
    Ok(())
}
