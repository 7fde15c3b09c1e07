use super::helpers::FakeRelay;
use fkg_upload::{
    application::attachment_panel::{
        host::PanelHost,
        state::PanelStatus,
        use_case::{AttachmentPanel, PanelOptions},
    },
    domain::attachment::{
        entity::{AttachmentContext, ContextUpdate},
        errors::PanelError,
    },
    infrastructure::relay_client::traits::ClientError,
};
use serde_json::json;
use std::sync::Arc;

fn mount(relay: &Arc<FakeRelay>) -> AttachmentPanel {
    AttachmentPanel::mount(relay.clone(), PanelOptions::default())
}

fn server_error() -> ClientError {
    ClientError::Status {
        status: 500,
        message: "Failed to relay request".to_string(),
    }
}

#[tokio::test]
async fn refresh_without_facility_makes_no_calls() {
    let relay = FakeRelay::new();
    let panel = mount(&relay);

    panel.handle().refresh().await.expect("refresh failed");

    let state = panel.snapshot().await;
    assert_eq!(relay.list_calls(), 0);
    assert_eq!(state.status, PanelStatus::Idle);
    assert!(!state.loading);
}

#[tokio::test]
async fn selecting_a_facility_loads_both_lists() {
    let relay = FakeRelay::new();
    relay.seed_link("1001", "a1b2c", true, "42");
    relay.seed_candidate("d3e4f");
    let panel = mount(&relay);

    panel
        .handle()
        .set_context(ContextUpdate::facility("1001", "Bænk"))
        .await
        .expect("set_context failed");

    let state = panel.snapshot().await;
    assert_eq!(state.context, AttachmentContext::new("1001", "Bænk"));
    assert_eq!(state.status, PanelStatus::Loaded);
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(state.is_attached("a1b2c"));
    assert!(state.is_detached("d3e4f"));
    assert!(!state.is_detached("a1b2c"));
    assert_eq!(relay.list_calls(), 2);
}

#[tokio::test]
async fn partial_context_update_keeps_the_other_field() {
    let relay = FakeRelay::new();
    let panel = mount(&relay);
    let handle = panel.handle();

    handle
        .set_context(ContextUpdate::facility("1001", "Bænk"))
        .await
        .expect("set_context failed");
    handle
        .set_context(ContextUpdate {
            facility_id: None,
            theme: Some("Legeplads".to_string()),
        })
        .await
        .expect("set_context failed");

    let state = panel.snapshot().await;
    assert_eq!(state.context, AttachmentContext::new("1001", "Legeplads"));
}

#[tokio::test]
async fn a_failed_list_keeps_previous_lists_and_reports_the_error() {
    let relay = FakeRelay::new();
    relay.seed_link("1001", "a1b2c", false, "42");
    relay.seed_candidate("d3e4f");
    let panel = mount(&relay);
    let handle = panel.handle();
    handle
        .set_context(ContextUpdate::facility("1001", "Bænk"))
        .await
        .expect("set_context failed");
    let loaded = panel.snapshot().await;

    relay.seed_candidate("zzzzz");
    relay.fail_list("7901", server_error());
    let err = handle.refresh().await.expect_err("refresh should fail");
    assert_eq!(err, PanelError::FetchFailed("Failed to fetch detached (500)".into()));

    let state = panel.snapshot().await;
    assert_eq!(state.attached, loaded.attached);
    assert_eq!(state.detached, loaded.detached);
    assert!(!state.is_detached("zzzzz"));
    assert_eq!(state.error.as_deref(), Some("Failed to fetch detached (500)"));
    assert_eq!(state.status, PanelStatus::Errored);
    assert!(!state.loading);

    relay.heal_lists();
    handle.refresh().await.expect("refresh failed");
    let state = panel.snapshot().await;
    assert!(state.error.is_none());
    assert!(state.is_detached("zzzzz"));
}

#[tokio::test]
async fn a_failed_attached_list_discards_the_detached_list_too() {
    let relay = FakeRelay::new();
    relay.seed_link("1001", "a1b2c", true, "42");
    relay.seed_candidate("d3e4f");
    let panel = mount(&relay);
    let handle = panel.handle();
    handle
        .set_context(ContextUpdate::facility("1001", "Bænk"))
        .await
        .expect("set_context failed");
    let loaded = panel.snapshot().await;

    relay.seed_candidate("zzzzz");
    relay.fail_list("7900", server_error());
    let err = handle.refresh().await.expect_err("refresh should fail");
    assert_eq!(err, PanelError::FetchFailed("Failed to fetch attached (500)".into()));

    let state = panel.snapshot().await;
    assert_eq!(state.attached, loaded.attached);
    assert_eq!(state.detached, loaded.detached);
    assert!(!state.is_detached("zzzzz"));
    assert_eq!(state.error.as_deref(), Some("Failed to fetch attached (500)"));
    assert_eq!(state.status, PanelStatus::Errored);
    assert!(!state.loading);
}

#[tokio::test]
async fn attach_moves_a_candidate_into_the_attached_list() {
    let relay = FakeRelay::new();
    relay.seed_candidate("d3e4f");
    let panel = mount(&relay);
    let handle = panel.handle();
    handle
        .set_context(ContextUpdate::facility("1001", "Bænk"))
        .await
        .expect("set_context failed");

    handle.attach("d3e4f").await.expect("attach failed");

    assert_eq!(
        relay.created(),
        vec![json!({"tema": "Bænk", "foto_objek": "1001", "foto_lokat": "d3e4f"})]
    );
    let state = panel.snapshot().await;
    assert!(state.is_attached("d3e4f"));
    assert!(!state.is_detached("d3e4f"));
    assert_eq!(state.status, PanelStatus::Loaded);
}

#[tokio::test]
async fn attach_requires_a_selected_facility() {
    let relay = FakeRelay::new();
    let panel = mount(&relay);

    let err = panel.handle().attach("d3e4f").await.expect_err("attach should fail");
    assert!(matches!(err, PanelError::AttachFailed(_)));
    assert!(relay.created().is_empty());
}

#[tokio::test]
async fn set_primary_leaves_exactly_one_primary() {
    let relay = FakeRelay::new();
    relay.seed_link("1001", "a1b2c", true, "41");
    relay.seed_link("1001", "d3e4f", false, "42");
    let panel = mount(&relay);
    let handle = panel.handle();
    handle
        .set_context(ContextUpdate::facility("1001", "Bænk"))
        .await
        .expect("set_context failed");

    handle.set_primary("42").await.expect("set_primary failed");

    assert_eq!(
        relay.updated(),
        vec![json!({"objekt_id": "1001", "objekt_id_7900": "42"})]
    );
    let state = panel.snapshot().await;
    let primaries: Vec<_> = state.attached.iter().filter(|r| r.is_primary).collect();
    assert_eq!(primaries.len(), 1);
    assert_eq!(primaries[0].link_id, "42");
    assert_eq!(state.primary().map(|r| r.photo_key.as_str()), Some("d3e4f"));

    let view = panel.view().await;
    let stars: Vec<_> = view.attached.cards.iter().map(|c| c.star_icon).collect();
    assert_eq!(stars, vec!["bi-star", "bi-star-fill"]);
}

#[tokio::test]
async fn detach_returns_the_photo_to_the_pool() {
    let relay = FakeRelay::new();
    relay.seed_link("1001", "a1b2c", true, "42");
    let panel = mount(&relay);
    let handle = panel.handle();
    handle
        .set_context(ContextUpdate::facility("1001", "Bænk"))
        .await
        .expect("set_context failed");

    handle.detach("42").await.expect("detach failed");

    assert_eq!(relay.deleted(), vec!["42".to_string()]);
    let state = panel.snapshot().await;
    assert!(state.attached.is_empty());
    assert!(state.is_detached("a1b2c"));
}

#[tokio::test]
async fn failed_mutation_reports_and_keeps_lists() {
    let relay = FakeRelay::new();
    relay.seed_candidate("d3e4f");
    let panel = mount(&relay);
    let handle = panel.handle();
    handle
        .set_context(ContextUpdate::facility("1001", "Bænk"))
        .await
        .expect("set_context failed");
    let calls_before = relay.list_calls();

    relay.fail_mutations(ClientError::Status {
        status: 500,
        message: "Failed to relay request".into(),
    });
    let err = handle.attach("d3e4f").await.expect_err("attach should fail");
    assert_eq!(err, PanelError::AttachFailed("Failed to relay request".into()));

    let state = panel.snapshot().await;
    assert_eq!(state.error.as_deref(), Some("Attach failed: Failed to relay request"));
    assert!(state.is_detached("d3e4f"));
    assert_eq!(relay.list_calls(), calls_before);

    relay.fail_mutations(ClientError::Network("connection refused".into()));
    let err = handle.detach("1").await.expect_err("detach should fail");
    assert!(matches!(err, PanelError::NetworkFailure(_)));
}

#[tokio::test]
async fn slow_refresh_for_a_previous_facility_is_discarded() {
    let relay = FakeRelay::new();
    relay.seed_link("A", "aaaaa", true, "1");
    relay.seed_link("B", "bbbbb", true, "2");
    let gate = relay.hold_lists_for("A");
    let panel = mount(&relay);
    let handle = panel.handle();

    let slow = tokio::spawn({
        let handle = handle.clone();
        async move { handle.set_context(ContextUpdate::facility("A", "Bænk")).await }
    });
    while relay.list_calls() < 2 {
        tokio::task::yield_now().await;
    }

    handle
        .set_context(ContextUpdate::facility("B", "Bænk"))
        .await
        .expect("set_context failed");
    gate.add_permits(2);
    slow.await.expect("task panicked").expect("stale refresh should be silent");

    let state = panel.snapshot().await;
    assert_eq!(state.context.facility_id, "B");
    assert!(state.is_attached("bbbbb"));
    assert!(!state.is_attached("aaaaa"));
    assert_eq!(state.status, PanelStatus::Loaded);
    assert!(!state.loading);
}

#[tokio::test]
async fn clearing_the_facility_discards_a_slow_refresh() {
    let relay = FakeRelay::new();
    relay.seed_link("A", "aaaaa", true, "1");
    let gate = relay.hold_lists_for("A");
    let panel = mount(&relay);
    let handle = panel.handle();

    let slow = tokio::spawn({
        let handle = handle.clone();
        async move { handle.set_context(ContextUpdate::facility("A", "Bænk")).await }
    });
    while relay.list_calls() < 2 {
        tokio::task::yield_now().await;
    }

    handle
        .set_context(ContextUpdate {
            facility_id: Some(String::new()),
            theme: None,
        })
        .await
        .expect("set_context failed");
    gate.add_permits(2);
    slow.await.expect("task panicked").expect("stale refresh should be silent");

    let state = panel.snapshot().await;
    assert_eq!(state.context.facility_id, "");
    assert!(state.attached.is_empty());
    assert!(!state.is_attached("aaaaa"));
    assert_eq!(state.status, PanelStatus::Idle);
    assert!(!state.loading);
    assert_eq!(relay.list_calls(), 2);
}

#[tokio::test]
async fn handles_stop_working_after_unmount() {
    let relay = FakeRelay::new();
    let panel = mount(&relay);
    let handle = panel.handle();
    assert!(handle.is_mounted());

    panel.unmount();

    assert!(!handle.is_mounted());
    assert_eq!(handle.refresh().await, Err(PanelError::Unmounted));
    assert_eq!(
        handle
            .set_context(ContextUpdate::facility("1001", "Bænk"))
            .await,
        Err(PanelError::Unmounted)
    );
    assert_eq!(handle.attach("a1b2c").await, Err(PanelError::Unmounted));
    assert_eq!(relay.list_calls(), 0);
    assert_eq!(handle.snapshot().await.status, PanelStatus::Idle);
}

#[tokio::test]
async fn host_follows_sign_in_and_feature_selection() {
    let relay = FakeRelay::new();
    relay.seed_link("1001", "a1b2c", true, "42");
    let mut host = PanelHost::new(relay.clone(), PanelOptions::default());
    let event = json!({"feature": {"properties": {"objekt_id": 1001, "temanavn": "Bænk"}}});

    host.on_feature_selected(&event).await.expect("ignored event failed");
    assert!(host.panel().is_none());
    assert_eq!(relay.list_calls(), 0);

    host.on_auth_change(true);
    host.on_feature_selected(&event).await.expect("selection failed");
    let panel = host.panel().expect("panel not mounted");
    let handle = panel.handle();
    let state = panel.snapshot().await;
    assert_eq!(state.context, AttachmentContext::new("1001", "Bænk"));
    assert!(state.is_attached("a1b2c"));

    host.on_auth_change(false);
    assert!(host.panel().is_none());
    assert!(!handle.is_mounted());
}
