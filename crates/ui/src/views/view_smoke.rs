use services::StaticCredentials;
use storage::Credentials;
use storage::repository::SessionRepository;
use testdesk_core::model::{GroupId, NewSession, SubGroupId, UserId};

use super::test_harness::{ViewKind, seeded_repo, setup_view_harness, technician};

#[tokio::test(flavor = "current_thread")]
async fn test_list_renders_loaded_tests() {
    let mut harness = setup_view_harness(
        ViewKind::TestList,
        seeded_repo(),
        Some(technician(false)),
        StaticCredentials::default(),
    );

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("User signs in"), "missing test row in {html}");
    assert!(html.contains("User pays by card"), "missing test row in {html}");
    assert!(html.contains("Web / Login"), "missing scope in {html}");
    assert!(html.contains("Visa only"), "missing description in {html}");
    assert!(html.contains("Não Testado"), "missing result label in {html}");
    assert!(html.contains("Pendente"), "unrecognised result dropped in {html}");
    assert!(!html.contains("Delete"), "non-admin saw delete in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn test_list_offers_delete_to_admins() {
    let mut harness = setup_view_harness(
        ViewKind::TestList,
        seeded_repo(),
        Some(technician(true)),
        StaticCredentials::default(),
    );

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Delete"), "missing delete action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn test_list_keeps_empty_state_when_unauthorized() {
    let repo = seeded_repo().with_required_token("secret");
    let mut harness = setup_view_harness(
        ViewKind::TestList,
        repo,
        Some(technician(false)),
        StaticCredentials::default(),
    );

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("No tests match"), "expected empty list in {html}");
    assert!(!html.contains("User signs in"), "unexpected row in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sessions_view_lists_started_sessions() {
    let repo = seeded_repo();
    let session = NewSession::new(
        Some(GroupId::new("g1")),
        Some(SubGroupId::new("s1")),
        Some(UserId::new("u1")),
        Vec::new(),
    );
    repo.start_session(&Credentials::anonymous(), &session)
        .await
        .expect("start session");

    let mut harness = setup_view_harness(
        ViewKind::Sessions,
        repo,
        None,
        StaticCredentials::default(),
    );

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("<table"), "missing sessions table in {html}");
    assert!(html.contains("u1"), "missing technician in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sessions_view_reports_expired_credentials() {
    let repo = seeded_repo().with_required_token("secret");
    let mut harness = setup_view_harness(
        ViewKind::Sessions,
        repo,
        None,
        StaticCredentials::bearer("wrong"),
    );

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("session has expired"), "missing error in {html}");
}
