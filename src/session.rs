//! Signed-in identity for the whole app.
//!
//! [`SessionManager`] is constructed once in the root component and handed
//! out through context. Its lifecycle is `init` (resolve once, then follow
//! provider notifications) and `dispose` (drop the subscription).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use leptos::logging::{error, log};
use leptos::*;

use crate::error::AppError;
use crate::models::session::{AuthEvent, Session};

pub type SessionListener = Rc<dyn Fn(AuthEvent, Option<Session>)>;

/// Third-party identity service (sign-in redirect, token lifetime).
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// The session the provider already holds, if any.
    async fn current_session(&self) -> Result<Option<Session>, AppError>;

    /// Starts the redirect-based sign-in flow.
    async fn sign_in(&self) -> Result<(), AppError>;

    async fn sign_out(&self) -> Result<(), AppError>;

    /// Registers `listener` until the returned handle is dropped.
    fn subscribe(&self, listener: SessionListener) -> Subscription;
}

/// Releases a provider subscription when dropped.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

/// Listener registry shared by provider implementations.
#[derive(Clone, Default)]
pub struct ListenerSet {
    inner: Rc<RefCell<Listeners>>,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, SessionListener)>,
}

impl ListenerSet {
    pub fn add(&self, listener: SessionListener) -> Subscription {
        let id = {
            let mut listeners = self.inner.borrow_mut();
            listeners.next_id += 1;
            let id = listeners.next_id;
            listeners.entries.push((id, listener));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    pub fn notify(&self, event: AuthEvent, session: Option<Session>) {
        // Snapshot first so listeners may (un)subscribe while being called.
        let listeners: Vec<SessionListener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event, session.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone)]
pub struct SessionManager {
    provider: Rc<dyn IdentityProvider>,
    session: RwSignal<Option<Session>>,
    resolved: RwSignal<bool>,
    started: Rc<Cell<bool>>,
    subscription: Rc<RefCell<Option<Subscription>>>,
}

impl SessionManager {
    pub fn new(provider: Rc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            session: create_rw_signal(None),
            resolved: create_rw_signal(false),
            started: Rc::new(Cell::new(false)),
            subscription: Rc::new(RefCell::new(None)),
        }
    }

    pub fn session(&self) -> Signal<Option<Session>> {
        self.session.into()
    }

    pub fn is_resolved(&self) -> Signal<bool> {
        self.resolved.into()
    }

    /// Subscribes to provider notifications and resolves the existing
    /// session. Only the first call does anything.
    pub async fn init(&self) {
        if self.started.replace(true) {
            return;
        }

        let session = self.session;
        let resolved = self.resolved;
        let subscription = self.provider.subscribe(Rc::new(move |event: AuthEvent, next: Option<Session>| {
            log!("[SESSION] {:?}", event);
            // Signals are gone once the owning scope is disposed.
            if session.try_set(next).is_some() {
                return;
            }
            let _ = resolved.try_set(true);
        }));
        *self.subscription.borrow_mut() = Some(subscription);

        let initial = match self.provider.current_session().await {
            Ok(initial) => initial,
            Err(err) => {
                error!("[SESSION] Could not restore session: {}", err);
                None
            }
        };

        // A notification that landed while we were waiting is newer.
        if !self.resolved.try_get_untracked().unwrap_or(true) {
            let _ = self.session.try_set(initial);
            let _ = self.resolved.try_set(true);
        }
    }

    pub async fn sign_in(&self) {
        if let Err(err) = self.provider.sign_in().await {
            error!("[SESSION] Error signing in: {}", err);
        }
    }

    pub async fn sign_out(&self) {
        let _ = self.session.try_set(None);
        if let Err(err) = self.provider.sign_out().await {
            error!("[SESSION] Error signing out: {}", err);
        }
    }

    /// Drops the provider subscription. Later notifications are ignored.
    pub fn dispose(&self) {
        if let Some(subscription) = self.subscription.borrow_mut().take() {
            subscription.unsubscribe();
            log!("[SESSION] Subscription released");
        }
    }
}

pub fn use_session() -> SessionManager {
    expect_context::<SessionManager>()
}
