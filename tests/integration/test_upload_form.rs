use super::helpers::{FakeRelay, PNG_BYTES, png_data_url};
use fkg_upload::{
    application::{
        attachment_panel::use_case::{AttachmentPanel, PanelOptions},
        upload_form::use_case::UploadForm,
    },
    domain::attachment::{entity::ContextUpdate, errors::PanelError},
    infrastructure::relay_client::traits::ClientError,
};
use serde_json::json;

#[tokio::test]
async fn submit_without_a_file_is_refused_locally() {
    let relay = FakeRelay::new();
    let mut form = UploadForm::new(relay.clone(), None, false);

    let err = form.submit().await.expect_err("submit should fail");
    assert_eq!(err, PanelError::MissingFile);
    assert_eq!(err.to_string(), "Required");
    assert!(relay.uploads().is_empty());
}

#[tokio::test]
async fn captured_photo_is_posted_as_a_data_url() {
    let relay = FakeRelay::new();
    let mut form = UploadForm::new(relay.clone(), None, false);

    form.capture("image/png", &PNG_BYTES);
    assert_eq!(form.file(), Some(png_data_url().as_str()));

    let response = form.submit().await.expect("submit failed");
    assert_eq!(response["success"], true);
    assert_eq!(relay.uploads().len(), 1);
    assert_eq!(relay.uploads()[0].file, Some(png_data_url()));
    assert!(form.file().is_none());
    assert!(relay.created().is_empty());
}

#[tokio::test]
async fn direct_attach_links_the_upload_to_the_selected_facility() {
    let relay = FakeRelay::new();
    let panel = AttachmentPanel::mount(relay.clone(), PanelOptions::default());
    let handle = panel.handle();
    handle
        .set_context(ContextUpdate::facility("1001", "Bænk"))
        .await
        .expect("set_context failed");

    let mut form = UploadForm::new(relay.clone(), Some(handle), true);
    form.set_file(png_data_url());
    form.submit().await.expect("submit failed");

    assert_eq!(
        relay.created(),
        vec![json!({"tema": "Bænk", "foto_objek": "1001", "foto_lokat": "up001"})]
    );
    let state = panel.snapshot().await;
    assert!(state.is_attached("up001"));
    assert!(!state.is_detached("up001"));
    assert!(form.file().is_none());
}

#[tokio::test]
async fn without_direct_attach_the_upload_lands_in_the_pool() {
    let relay = FakeRelay::new();
    let panel = AttachmentPanel::mount(relay.clone(), PanelOptions::default());
    let handle = panel.handle();
    handle
        .set_context(ContextUpdate::facility("1001", "Bænk"))
        .await
        .expect("set_context failed");

    let mut form = UploadForm::new(relay.clone(), Some(handle.clone()), false);
    form.set_file(png_data_url());
    form.submit().await.expect("submit failed");
    handle.refresh().await.expect("refresh failed");

    let state = panel.snapshot().await;
    assert!(state.is_detached("up001"));
    assert!(state.attached.is_empty());
}

#[tokio::test]
async fn failed_upload_keeps_the_file_for_a_retry() {
    let relay = FakeRelay::new();
    relay.fail_uploads(ClientError::Status {
        status: 500,
        message: "Failed to process upload".into(),
    });
    let mut form = UploadForm::new(relay.clone(), None, false);
    form.set_file(png_data_url());

    let err = form.submit().await.expect_err("submit should fail");
    assert_eq!(err, PanelError::UploadFailed("Failed to process upload".into()));
    assert!(form.file().is_some());

    relay.fail_uploads(ClientError::Network("connection refused".into()));
    let err = form.submit().await.expect_err("submit should fail");
    assert!(matches!(err, PanelError::NetworkFailure(_)));
}

#[tokio::test]
async fn direct_attach_after_unmount_fails_and_keeps_the_file() {
    let relay = FakeRelay::new();
    let panel = AttachmentPanel::mount(relay.clone(), PanelOptions::default());
    let mut form = UploadForm::new(relay.clone(), Some(panel.handle()), true);
    panel.unmount();

    form.set_file(png_data_url());
    let err = form.submit().await.expect_err("submit should fail");
    assert_eq!(err, PanelError::Unmounted);
    assert!(form.file().is_some());
    assert_eq!(relay.uploads().len(), 1);
}
