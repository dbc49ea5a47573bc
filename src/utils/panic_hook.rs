use std::panic;
use leptos::logging::log;

/// Sets up a custom panic hook that provides more context for Leptos owner disposal panics
pub fn set_custom_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Call the original hook first
        original_hook(panic_info);

        let message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown panic".to_string()
        };

        if message.contains("OwnerDisposed") {
            log!("[PANIC] Leptos owner disposal detected. This usually happens when:");
            log!("[PANIC] 1. A search or detail response arrived after its page was left");
            log!("[PANIC] 2. A session notification fired after the app root was torn down");
            log!("[PANIC] Apply late results through utils::leptos_owner::with_owner_safe");
            let location = gloo_utils::window()
                .location()
                .pathname()
                .unwrap_or_default();
            log!("[PANIC] Current route: {}", location);
        }
    }));
}

/// Call once from the client entry point.
pub fn init() {
    console_error_panic_hook::set_once();
    log!("[PANIC_HOOK] Setting up custom panic hook");
    set_custom_panic_hook();
}
