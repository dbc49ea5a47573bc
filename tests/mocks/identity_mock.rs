//! This module provides a scripted identity provider for exercising the
//! session manager without a browser redirect.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use futures::channel::oneshot;
use nowhey::error::AppError;
use nowhey::models::session::{AuthEvent, Session};
use nowhey::session::{IdentityProvider, ListenerSet, SessionListener, Subscription};

pub struct MockIdentity {
    pub listeners: ListenerSet,
    initial: RefCell<Result<Option<Session>, AppError>>,
    init_gate: RefCell<Option<oneshot::Receiver<()>>>,
    sign_in_result: RefCell<Result<(), AppError>>,
    sign_out_result: RefCell<Result<(), AppError>>,
    pub current_calls: Cell<usize>,
    pub sign_in_calls: Cell<usize>,
    pub sign_out_calls: Cell<usize>,
}

impl MockIdentity {
    pub fn new(initial: Result<Option<Session>, AppError>) -> Self {
        Self {
            listeners: ListenerSet::default(),
            initial: RefCell::new(initial),
            init_gate: RefCell::new(None),
            sign_in_result: RefCell::new(Ok(())),
            sign_out_result: RefCell::new(Ok(())),
            current_calls: Cell::new(0),
            sign_in_calls: Cell::new(0),
            sign_out_calls: Cell::new(0),
        }
    }

    pub fn failing_sign_in(self, err: AppError) -> Self {
        *self.sign_in_result.borrow_mut() = Err(err);
        self
    }

    pub fn failing_sign_out(self, err: AppError) -> Self {
        *self.sign_out_result.borrow_mut() = Err(err);
        self
    }

    /// Makes `current_session` wait until the returned sender fires.
    pub fn gate_init(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.init_gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn emit(&self, event: AuthEvent, session: Option<Session>) {
        self.listeners.notify(event, session);
    }
}

pub fn session(id: &str, name: &str) -> Session {
    Session {
        id: id.to_string(),
        display_name: name.to_string(),
        avatar_url: Some(format!("https://avatars.test/{}.png", id)),
    }
}

#[async_trait(?Send)]
impl IdentityProvider for MockIdentity {
    async fn current_session(&self) -> Result<Option<Session>, AppError> {
        self.current_calls.set(self.current_calls.get() + 1);
        let gate = self.init_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.initial.borrow().clone()
    }

    async fn sign_in(&self) -> Result<(), AppError> {
        self.sign_in_calls.set(self.sign_in_calls.get() + 1);
        self.sign_in_result.borrow().clone()
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        self.sign_out_calls.set(self.sign_out_calls.get() + 1);
        self.sign_out_result.borrow().clone()
    }

    fn subscribe(&self, listener: SessionListener) -> Subscription {
        self.listeners.add(listener)
    }
}
