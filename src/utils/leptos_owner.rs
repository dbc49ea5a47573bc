use leptos::Owner;

/// Runs `f` under `owner` if that reactive scope is still alive.
///
/// Fetches are never aborted, so a response can arrive after the view that
/// asked for it has been unmounted. Capture the owner before spawning and
/// apply the result through this helper; a disposed owner logs and returns
/// `None` instead of touching dead signals.
pub fn with_owner_safe<F, R>(owner: Option<Owner>, log_context: &str, f: F) -> Option<R>
where
    F: FnOnce() -> R,
{
    match owner {
        Some(owner) => match leptos::try_with_owner(owner, f) {
            Ok(result) => Some(result),
            Err(_) => {
                leptos::logging::log!("[OWNER] View gone, dropping late result: {}", log_context);
                None
            }
        },
        None => {
            leptos::logging::log!("[OWNER] No Leptos owner in context: {}", log_context);
            None
        }
    }
}
