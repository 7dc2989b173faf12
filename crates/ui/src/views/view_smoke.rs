use serde_json::json;

use super::test_harness::{
    StubBackend, ViewKind, Visitor, setup_view_harness, setup_view_harness_with,
};

#[tokio::test(flavor = "current_thread")]
async fn protected_view_shows_placeholder_while_restoring() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Visitor::Restoring).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Loading..."), "missing placeholder in {html}");
    assert!(!html.contains("Your modules"), "protected content leaked: {html}");
    assert!(
        !harness.backend.hits().contains(&"/dashboard".to_string()),
        "dashboard fetched before restore"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn protected_view_never_renders_for_anonymous_visitors() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Visitor::Anonymous).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(!html.contains("Your modules"), "protected content leaked: {html}");
    assert!(!html.contains("Loading your progress"), "protected page mounted: {html}");
    assert!(harness.backend.hits().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_renders_confirmed_progress() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Visitor::Member).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Welcome back, Jane"), "missing greeting in {html}");
    assert!(html.contains("Beat impostor syndrome"), "missing module in {html}");
    assert!(html.contains("Overall progress: 70%"), "missing overall in {html}");
    assert!(html.contains("Unlock Premium"), "missing upsell in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_page_lists_lessons() {
    let mut harness = setup_view_harness(ViewKind::Module(2), Visitor::Member).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Welcome to the module"), "missing intro in {html}");
    assert!(html.contains("Lesson 4"), "missing lessons in {html}");
    assert!(html.contains("Write it down"), "missing fallback exercise in {html}");
    assert_eq!(harness.backend.hits_to("/dashboard"), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn module_page_shows_recorded_exercises() {
    let backend = StubBackend::with_defaults();
    backend.set("/modules/2/exercises", 200, json!([{
        "id": "ex-9",
        "moduleId": 2,
        "description": "Name one win from today",
        "completed": true,
        "completedAt": "2024-05-01T12:00:00.123456"
    }]));
    let mut harness = setup_view_harness_with(ViewKind::Module(2), Visitor::Member, backend).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Name one win from today"), "missing exercise in {html}");
    assert!(!html.contains("Write it down"), "fallback used over records: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_page_survives_exercise_outage() {
    let backend = StubBackend::with_defaults();
    backend.set("/modules/2/exercises", 500, json!({"detail": "boom"}));
    let mut harness = setup_view_harness_with(ViewKind::Module(2), Visitor::Member, backend).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Lesson 4"), "module not rendered: {html}");
    assert!(html.contains("Write it down"), "missing fallback exercise in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn checkout_page_offers_payment_to_members() {
    let mut harness = setup_view_harness(ViewKind::Payment, Visitor::Member).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Unlock the full program"), "missing heading in {html}");
    assert!(html.contains("97 €"), "missing price in {html}");
    assert!(harness.opener.opened.lock().expect("opened").is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn checkout_page_is_not_shown_to_premium_users() {
    let mut harness = setup_view_harness(ViewKind::Payment, Visitor::Premium).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(!html.contains("Unlock the full program"), "checkout leaked: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_shows_public_stats() {
    let mut harness = setup_view_harness(ViewKind::Home, Visitor::Anonymous).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("1250+"), "missing stats in {html}");
    assert!(html.contains("Start now"), "missing call to action in {html}");
}
