use leptos::*;
use leptos_router::use_navigate;
use crate::components::{auth_gate::AuthGate, login::Login, search_box::SearchBox};
use crate::models::place::{GeoPoint, PlaceCandidate};
use crate::restaurant::detail_path;
use crate::utils::geolocation::current_position;
use crate::utils::leptos_owner::with_owner_safe;

#[component]
pub fn HomePage() -> impl IntoView {
    let navigate = use_navigate();
    let location = create_rw_signal(None::<GeoPoint>);
    let owner = Owner::current();

    // Effects only run in the browser, never during server rendering.
    create_effect(move |_| {
        spawn_local(async move {
            if let Some(point) = current_position().await {
                with_owner_safe(owner, "geolocation", move || location.set(Some(point)));
            }
        });
    });

    let on_select = Callback::new({
        let navigate = navigate.clone();
        move |candidate: PlaceCandidate| {
            navigate(
                &detail_path(&candidate.id, Some(&candidate.display_name)),
                Default::default(),
            );
        }
    });
    let on_submit = Callback::new(move |raw: String| {
        navigate(&detail_path(raw.trim(), None), Default::default());
    });

    view! {
        <div class="home">
            <header class="top-bar">
                <AuthGate>
                    <Login/>
                </AuthGate>
            </header>
            <div class="hero">
                <h1>"no"<span class="accent">"whey"</span></h1>
                <p>{ "Find dairy-free friendly restaurants near you." }</p>
                <SearchBox on_select=on_select on_submit=on_submit location=location/>
            </div>
        </div>
    }
}
