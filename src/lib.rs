pub mod api;
pub mod app;
pub mod assessment;
pub mod auth;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod restaurant;
pub mod reviews;
pub mod score;
pub mod search;
pub mod session;
pub mod utils;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;

    utils::panic_hook::init();
    leptos::mount_to_body(App);
}
