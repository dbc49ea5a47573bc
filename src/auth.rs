//! Supabase GoTrue as the [`IdentityProvider`].
//!
//! Sign-in is Google OAuth through `/auth/v1/authorize`; the provider sends
//! the browser back with tokens in the URL fragment. Tokens live in local
//! storage and are refreshed shortly before they expire.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use leptos::logging::{error, log, warn};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::models::session::{AuthEvent, ProviderUser, Session};
use crate::session::{IdentityProvider, ListenerSet, SessionListener, Subscription};

pub const TOKEN_STORAGE_KEY: &str = "nowhey.auth.token";
pub const OAUTH_PROVIDER: &str = "google";

/// How long before expiry the access token gets refreshed.
const REFRESH_MARGIN_SECS: i64 = 60;

const MAX_TIMER_DELAY_MS: i64 = i32::MAX as i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) >= self.expires_at
    }

    /// Milliseconds until the refresh should fire. Capped at the largest
    /// delay `setTimeout` accepts; anything above it fires immediately.
    pub fn refresh_delay_ms(&self, now: DateTime<Utc>) -> u32 {
        let due = self.expires_at - Duration::seconds(REFRESH_MARGIN_SECS);
        (due - now).num_milliseconds().clamp(0, MAX_TIMER_DELAY_MS) as u32
    }
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: Option<ProviderUser>,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Reads the tokens GoTrue appends to the redirect URL
/// (`#access_token=..&refresh_token=..&expires_in=..`).
pub fn parse_callback_fragment(fragment: &str, now: DateTime<Utc>) -> Option<StoredToken> {
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;

    for pair in fragment.trim_start_matches('#').split('&') {
        let (key, value) = match pair.split_once('=') {
            Some(kv) => kv,
            None => continue,
        };
        let value = match urlencoding::decode(value) {
            Ok(value) => value.into_owned(),
            Err(_) => {
                warn!("[AUTH] Skipping undecodable callback field '{}'", key);
                continue;
            }
        };
        match key {
            "access_token" => access_token = Some(value),
            "refresh_token" => refresh_token = Some(value),
            "expires_in" => expires_in = value.parse::<i64>().ok(),
            "error_description" => warn!("[AUTH] Sign-in callback error: {}", value),
            _ => {}
        }
    }

    Some(StoredToken {
        access_token: access_token.filter(|t| !t.is_empty())?,
        refresh_token: refresh_token.filter(|t| !t.is_empty())?,
        expires_at: now + Duration::seconds(expires_in?),
    })
}

pub fn authorize_url(supabase_url: &str, redirect_to: &str) -> String {
    format!(
        "{}/auth/v1/authorize?provider={}&redirect_to={}",
        supabase_url,
        OAUTH_PROVIDER,
        urlencoding::encode(redirect_to)
    )
}

#[derive(Clone)]
pub struct SupabaseAuth {
    inner: Rc<AuthInner>,
}

struct AuthInner {
    config: AuthConfig,
    listeners: ListenerSet,
    refresh_timer: RefCell<Option<Timeout>>,
}

impl SupabaseAuth {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            inner: Rc::new(AuthInner {
                config,
                listeners: ListenerSet::default(),
                refresh_timer: RefCell::new(None),
            }),
        }
    }
}

impl AuthInner {
    fn credentials(&self) -> Result<(&str, &str), AppError> {
        self.config
            .credentials()
            .ok_or_else(|| AppError::SessionProvider("Supabase is not configured".into()))
    }

    async fn fetch_user(&self, token: &StoredToken) -> Result<Option<Session>, AppError> {
        let (url, key) = self.credentials()?;
        let response = Request::get(&format!("{}/auth/v1/user", url))
            .header("apikey", key)
            .header("Authorization", &format!("Bearer {}", token.access_token))
            .send()
            .await?;
        match response.status() {
            200..=299 => {
                let user: ProviderUser = response.json().await?;
                Ok(Some(Session::from(user)))
            }
            401 | 403 => Ok(None),
            status => Err(AppError::SessionProvider(format!(
                "user lookup failed with status {}",
                status
            ))),
        }
    }

    async fn refresh(&self, token: &StoredToken) -> Result<(StoredToken, Option<Session>), AppError> {
        let (url, key) = self.credentials()?;
        let response = Request::post(&format!(
            "{}/auth/v1/token?grant_type=refresh_token",
            url
        ))
        .header("apikey", key)
        .json(&RefreshRequest {
            refresh_token: &token.refresh_token,
        })?
        .send()
        .await?;
        if !response.ok() {
            return Err(AppError::SessionProvider(format!(
                "token refresh failed with status {}",
                response.status()
            )));
        }
        let body: TokenResponse = response.json().await?;
        let refreshed = StoredToken {
            access_token: body.access_token,
            refresh_token: body.refresh_token,
            expires_at: Utc::now() + Duration::seconds(body.expires_in),
        };
        Ok((refreshed, body.user.map(Session::from)))
    }

    fn cancel_refresh(&self) {
        // Dropping a pending Timeout clears it.
        self.refresh_timer.borrow_mut().take();
    }
}

fn schedule_refresh(inner: &Rc<AuthInner>, token: &StoredToken) {
    let delay = token.refresh_delay_ms(Utc::now());
    let weak: Weak<AuthInner> = Rc::downgrade(inner);
    let token = token.clone();
    let timer = Timeout::new(delay, move || {
        wasm_bindgen_futures::spawn_local(async move {
            let Some(inner) = weak.upgrade() else { return };
            refresh_and_notify(&inner, &token).await;
        });
    });
    inner.refresh_timer.borrow_mut().replace(timer);
    log!("[AUTH] Token refresh scheduled in {}s", delay / 1000);
}

async fn refresh_and_notify(inner: &Rc<AuthInner>, token: &StoredToken) {
    match inner.refresh(token).await {
        Ok((refreshed, user)) => {
            store_token(Some(&refreshed));
            let lookup = match user {
                Some(session) => Ok(Some(session)),
                None => inner.fetch_user(&refreshed).await,
            };
            schedule_refresh(inner, &refreshed);
            if let Some(session) = session_after_refresh(lookup) {
                inner.listeners.notify(AuthEvent::TokenRefreshed, session);
            }
        }
        Err(err) => {
            warn!("[AUTH] Session expired: {}", err);
            store_token(None);
            inner.cancel_refresh();
            inner.listeners.notify(AuthEvent::SignedOut, None);
        }
    }
}

/// What to announce after a successful refresh. A failed user lookup says
/// nothing about the token, so listeners keep the session they have.
fn session_after_refresh(
    lookup: Result<Option<Session>, AppError>,
) -> Option<Option<Session>> {
    match lookup {
        Ok(session) => Some(session),
        Err(err) => {
            warn!("[AUTH] User lookup after refresh failed: {}", err);
            None
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for SupabaseAuth {
    async fn current_session(&self) -> Result<Option<Session>, AppError> {
        let inner = &self.inner;
        if inner.config.credentials().is_none() {
            log!("[AUTH] Supabase not configured; continuing signed out");
            return Ok(None);
        }

        let from_callback = take_callback_token();
        if let Some(token) = &from_callback {
            store_token(Some(token));
        }

        let Some(mut token) = load_token() else {
            return Ok(None);
        };

        if token.needs_refresh(Utc::now()) {
            match inner.refresh(&token).await {
                Ok((refreshed, _)) => {
                    store_token(Some(&refreshed));
                    token = refreshed;
                }
                Err(err) => {
                    warn!("[AUTH] Stored session could not be refreshed: {}", err);
                    store_token(None);
                    return Ok(None);
                }
            }
        }

        let session = inner.fetch_user(&token).await?;
        match &session {
            Some(_) => {
                schedule_refresh(inner, &token);
                if from_callback.is_some() {
                    inner.listeners.notify(AuthEvent::SignedIn, session.clone());
                }
            }
            None => store_token(None),
        }
        Ok(session)
    }

    async fn sign_in(&self) -> Result<(), AppError> {
        let (url, _) = self.inner.credentials()?;
        let window = gloo_utils::window();
        let location = window.location();
        let origin = location.origin().map_err(js_error)?;
        let target = authorize_url(url, &format!("{}/", origin));
        log!("[AUTH] Redirecting to identity provider");
        location.set_href(&target).map_err(js_error)
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        let inner = &self.inner;
        let token = load_token();
        store_token(None);
        inner.cancel_refresh();
        inner.listeners.notify(AuthEvent::SignedOut, None);

        let (Some(token), Ok((url, key))) = (token, inner.credentials()) else {
            return Ok(());
        };
        let response = Request::post(&format!("{}/auth/v1/logout", url))
            .header("apikey", key)
            .header("Authorization", &format!("Bearer {}", token.access_token))
            .send()
            .await?;
        if response.ok() {
            Ok(())
        } else {
            Err(AppError::SessionProvider(format!(
                "logout failed with status {}",
                response.status()
            )))
        }
    }

    fn subscribe(&self, listener: SessionListener) -> Subscription {
        self.inner.listeners.add(listener)
    }
}

fn js_error(err: JsValue) -> AppError {
    AppError::SessionProvider(format!("{:?}", err))
}

fn local_storage() -> Option<web_sys::Storage> {
    gloo_utils::window().local_storage().ok().flatten()
}

fn load_token() -> Option<StoredToken> {
    let raw = local_storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(token) => Some(token),
        Err(err) => {
            warn!("[AUTH] Discarding unreadable stored token: {}", err);
            None
        }
    }
}

fn store_token(token: Option<&StoredToken>) {
    let Some(storage) = local_storage() else { return };
    let result = match token.map(serde_json::to_string) {
        Some(Ok(json)) => storage.set_item(TOKEN_STORAGE_KEY, &json),
        Some(Err(err)) => {
            error!("[AUTH] Could not serialize token: {}", err);
            return;
        }
        None => storage.remove_item(TOKEN_STORAGE_KEY),
    };
    if let Err(err) = result {
        error!("[AUTH] Local storage write failed: {:?}", err);
    }
}

/// Consumes tokens from the redirect fragment and strips it from the address
/// bar so a reload doesn't replay them.
fn take_callback_token() -> Option<StoredToken> {
    let window = gloo_utils::window();
    let location = window.location();
    let hash = location.hash().ok()?;
    if !hash.contains("access_token=") && !hash.contains("error=") {
        return None;
    }
    let token = parse_callback_fragment(&hash, Utc::now());

    let clean = format!(
        "{}{}",
        location.pathname().unwrap_or_else(|_| "/".into()),
        location.search().unwrap_or_default()
    );
    if let Ok(history) = window.history() {
        if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(&clean)) {
            warn!("[AUTH] Could not clear callback fragment: {:?}", err);
        }
    }
    token
}
