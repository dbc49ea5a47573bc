use leptos::*;
use leptos::ev::SubmitEvent;
use leptos::logging::log;
use crate::models::place::{GeoPoint, PlaceCandidate};
use crate::search::PlaceFinder;
use crate::utils::leptos_owner::with_owner_safe;

/// Restaurant search input with a live candidate list.
///
/// Each keystroke goes to [`PlaceFinder`]; only the newest response is ever
/// applied. Submitting the form without picking a candidate hands the raw
/// query to `on_submit`.
#[component]
pub fn SearchBox(
    on_select: Callback<PlaceCandidate>,
    on_submit: Callback<String>,
    #[prop(into)] location: Signal<Option<GeoPoint>>,
) -> impl IntoView {
    let finder = expect_context::<PlaceFinder>();
    let (query, set_query) = create_signal(String::new());
    let candidates = create_rw_signal(Vec::<PlaceCandidate>::new());
    let search_error = create_rw_signal(None::<String>);
    let owner = Owner::current();

    let handle_input = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        log!("[INPUT] Value changed: {}", value);
        set_query.set(value.clone());

        let finder = finder.clone();
        let location = location.get_untracked();
        spawn_local(async move {
            let outcome = finder.search(&value, location).await;
            with_owner_safe(owner, "search results", move || {
                if let Some(list) = outcome.candidates() {
                    candidates.set(list);
                    search_error.set(outcome.error_message().map(str::to_string));
                }
            });
        });
    };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let raw = query.get_untracked();
        if !raw.trim().is_empty() {
            on_submit.call(raw);
        }
    };

    view! {
        <form class="search" on:submit=handle_submit>
            <label for="search" class="sr-only">{ "Search for a restaurant" }</label>
            <input
                id="search"
                name="search"
                type="text"
                required
                autocomplete="off"
                placeholder="Search for a restaurant (e.g. 'Joe's Pizza')"
                prop:value=move || query.get()
                on:input=handle_input
            />
            <button type="submit">{ "Search" }</button>
            {move || search_error.get().map(|message| view! { <p class="search-error">{ message }</p> })}
            <ul class="candidates">
                {move || candidates.get().into_iter().map(|candidate| {
                    let picked = candidate.clone();
                    view! {
                        <li on:click=move |_| on_select.call(picked.clone())>
                            <strong>{ candidate.display_name }</strong>
                            <span class="address">{ candidate.formatted_address }</span>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </form>
    }
}
