/// Main application entry point for nowhey.
/// Wires the backend client, the place finder and the session service into
/// context, then routes between search and restaurant detail.
use std::rc::Rc;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use crate::api::{HttpApi, RestaurantApi};
use crate::auth::SupabaseAuth;
use crate::components::{home_page::HomePage, restaurant_details::RestaurantDetails};
use crate::config::{ApiConfig, AuthConfig};
use crate::search::PlaceFinder;
use crate::session::SessionManager;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api: Rc<dyn RestaurantApi> = Rc::new(HttpApi::new(ApiConfig::from_build_env()));
    provide_context(PlaceFinder::new(Rc::clone(&api)));
    provide_context(api);

    let session = SessionManager::new(Rc::new(SupabaseAuth::new(AuthConfig::from_build_env())));
    provide_context(session.clone());

    // Resolve the stored session once the app is running in the browser.
    create_effect({
        let session = session.clone();
        move |_| {
            let session = session.clone();
            spawn_local(async move { session.init().await });
        }
    });
    on_cleanup(move || session.dispose());

    view! {
        <Stylesheet id="leptos" href="/pkg/nowhey.css"/>
        <Title text="nowhey"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/restaurant/:id" view=RestaurantDetails/>
                </Routes>
            </main>
        </Router>
    }
}
