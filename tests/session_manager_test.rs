use std::rc::Rc;

use leptos::*;
use nowhey::error::AppError;
use nowhey::models::session::AuthEvent;
use nowhey::session::SessionManager;

// Import mock module
mod mocks;
use mocks::identity_mock::{session, MockIdentity};

fn manager_for(provider: &Rc<MockIdentity>) -> SessionManager {
    SessionManager::new(provider.clone())
}

#[tokio::test]
async fn test_unresolved_until_init() {
    let runtime = create_runtime();
    let provider = Rc::new(MockIdentity::new(Ok(Some(session("u-1", "Sam Oat")))));
    let manager = manager_for(&provider);

    assert!(!manager.is_resolved().get_untracked());
    assert_eq!(manager.session().get_untracked(), None);

    manager.init().await;

    assert!(manager.is_resolved().get_untracked());
    assert_eq!(manager.session().get_untracked(), Some(session("u-1", "Sam Oat")));
    runtime.dispose();
}

#[tokio::test]
async fn test_init_resolves_exactly_once() {
    let runtime = create_runtime();
    let provider = Rc::new(MockIdentity::new(Ok(None)));
    let manager = manager_for(&provider);

    manager.init().await;
    manager.init().await;
    manager.clone().init().await;

    assert_eq!(provider.current_calls.get(), 1);
    assert_eq!(provider.listeners.len(), 1);
    runtime.dispose();
}

#[tokio::test]
async fn test_provider_error_resolves_signed_out() {
    let runtime = create_runtime();
    let provider = Rc::new(MockIdentity::new(Err(AppError::SessionProvider(
        "user lookup failed with status 500".into(),
    ))));
    let manager = manager_for(&provider);

    manager.init().await;

    assert!(manager.is_resolved().get_untracked());
    assert_eq!(manager.session().get_untracked(), None);
    runtime.dispose();
}

#[tokio::test]
async fn test_notifications_replace_session() {
    let runtime = create_runtime();
    let provider = Rc::new(MockIdentity::new(Ok(None)));
    let manager = manager_for(&provider);
    manager.init().await;

    provider.emit(AuthEvent::SignedIn, Some(session("u-1", "Sam Oat")));
    assert_eq!(manager.session().get_untracked(), Some(session("u-1", "Sam Oat")));

    provider.emit(AuthEvent::TokenRefreshed, Some(session("u-1", "Sam O.")));
    assert_eq!(
        manager.session().get_untracked().map(|s| s.display_name),
        Some("Sam O.".to_string())
    );

    provider.emit(AuthEvent::SignedOut, None);
    assert_eq!(manager.session().get_untracked(), None);
    runtime.dispose();
}

#[tokio::test]
async fn test_notification_during_init_wins() {
    let runtime = create_runtime();
    let provider = Rc::new(MockIdentity::new(Ok(None)));
    let release = provider.gate_init();
    let manager = manager_for(&provider);

    let emitter = provider.clone();
    futures::join!(manager.init(), async move {
        emitter.emit(AuthEvent::SignedIn, Some(session("u-2", "Lee")));
        release.send(()).unwrap();
    });

    assert!(manager.is_resolved().get_untracked());
    assert_eq!(manager.session().get_untracked(), Some(session("u-2", "Lee")));
    runtime.dispose();
}

#[tokio::test]
async fn test_sign_out_clears_even_when_provider_fails() {
    let runtime = create_runtime();
    let provider = Rc::new(
        MockIdentity::new(Ok(Some(session("u-1", "Sam Oat"))))
            .failing_sign_out(AppError::SessionProvider("logout failed with status 503".into())),
    );
    let manager = manager_for(&provider);
    manager.init().await;

    manager.sign_out().await;

    assert_eq!(provider.sign_out_calls.get(), 1);
    assert_eq!(manager.session().get_untracked(), None);
    runtime.dispose();
}

#[tokio::test]
async fn test_failed_sign_in_leaves_session_unset() {
    let runtime = create_runtime();
    let provider = Rc::new(
        MockIdentity::new(Ok(None))
            .failing_sign_in(AppError::SessionProvider("Supabase is not configured".into())),
    );
    let manager = manager_for(&provider);
    manager.init().await;

    manager.sign_in().await;

    assert_eq!(provider.sign_in_calls.get(), 1);
    assert_eq!(manager.session().get_untracked(), None);
    assert!(manager.is_resolved().get_untracked());
    runtime.dispose();
}

#[tokio::test]
async fn test_dispose_releases_subscription() {
    let runtime = create_runtime();
    let provider = Rc::new(MockIdentity::new(Ok(Some(session("u-1", "Sam Oat")))));
    let manager = manager_for(&provider);
    manager.init().await;
    assert_eq!(provider.listeners.len(), 1);

    manager.dispose();

    assert!(provider.listeners.is_empty());
    provider.emit(AuthEvent::SignedOut, None);
    assert_eq!(manager.session().get_untracked(), Some(session("u-1", "Sam Oat")));
    runtime.dispose();
}
