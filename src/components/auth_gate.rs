use leptos::*;
use crate::session::use_session;

/// Holds back session-dependent UI until the session has been resolved, so
/// a signed-in user never sees a flash of the signed-out state.
#[component]
pub fn AuthGate(children: ChildrenFn) -> impl IntoView {
    let resolved = use_session().is_resolved();

    view! {
        <Show when=move || resolved.get() fallback=|| view! { <span class="auth-pending"></span> }>
            {children()}
        </Show>
    }
}
