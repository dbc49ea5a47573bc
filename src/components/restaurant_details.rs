/// Detail page for one restaurant: score banner, assessment, review form
/// and review list. Assessment and reviews load together on mount.
use std::rc::Rc;
use leptos::*;
use leptos::logging::log;
use leptos_router::{use_params_map, use_query_map, A};
use crate::api::RestaurantApi;
use crate::components::{
    auth_gate::AuthGate, login::Login, review_form::ReviewForm, reviews_list::ReviewsList,
    score_banner::ScoreBanner,
};
use crate::models::assessment::Assessment;
use crate::models::review::ReviewDraft;
use crate::restaurant::{
    apply_submit_result, load_detail, restaurant_key, still_showing, DetailState,
};
use crate::reviews::submit_review;
use crate::score::average_rating;
use crate::utils::leptos_owner::with_owner_safe;

#[component]
pub fn RestaurantDetails() -> impl IntoView {
    let api = expect_context::<Rc<dyn RestaurantApi>>();
    let params = use_params_map();
    let query = use_query_map();
    let owner = Owner::current();

    // Picked candidates route by place id but carry their name in `?name=`;
    // the backend keys restaurants by that name.
    let restaurant = move || {
        let route_id = params.with(|p| p.get("id").cloned());
        let name = query.with(|q| q.get("name").cloned());
        restaurant_key(route_id.as_deref(), name.as_deref())
    };
    let current_key = move || {
        let route_id = params.with_untracked(|p| p.get("id").cloned());
        let name = query.with_untracked(|q| q.get("name").cloned());
        restaurant_key(route_id.as_deref(), name.as_deref())
    };
    let still_current = move |requested: &str| {
        let route_id = params.with_untracked(|p| p.get("id").cloned());
        let name = query.with_untracked(|q| q.get("name").cloned());
        still_showing(requested, route_id.as_deref(), name.as_deref())
    };

    let state = create_rw_signal(DetailState::Loading);
    let draft = create_rw_signal(ReviewDraft::default());
    let submitting = create_rw_signal(false);
    let form_error = create_rw_signal(None::<String>);

    create_effect({
        let api = api.clone();
        move |_| {
            let key = restaurant();
            state.set(DetailState::Loading);
            let api = api.clone();
            spawn_local(async move {
                let data = load_detail(api.as_ref(), &key).await;
                with_owner_safe(owner, "restaurant detail", move || {
                    // The route may have moved on to another restaurant.
                    if still_current(&key) {
                        state.set(DetailState::Ready(data));
                    }
                });
            });
        }
    });

    let assessment = Signal::derive(move || {
        state.with(|s| match s {
            DetailState::Ready(data) => Some(data.assessment.clone()),
            DetailState::Loading => None,
        })
    });
    let reviews = Signal::derive(move || {
        state.with(|s| match s {
            DetailState::Ready(data) => data.reviews.clone(),
            DetailState::Loading => Vec::new(),
        })
    });

    let on_submit = Callback::new(move |current: ReviewDraft| {
        let api = api.clone();
        let key = current_key();
        let assessment: Option<Assessment> = assessment.get_untracked();
        submitting.set(true);
        form_error.set(None);

        spawn_local(async move {
            let result = submit_review(api.as_ref(), assessment.as_ref(), &key, &current).await;
            with_owner_safe(owner, "review submit", move || {
                submitting.set(false);
                if !still_current(&key) {
                    log!("[REVIEWS] Route changed, dropping submit result for '{}'", key);
                    return;
                }
                let mut next_state = state.get_untracked();
                let mut next_draft = draft.get_untracked();
                let message = apply_submit_result(&mut next_state, &mut next_draft, result);
                state.set(next_state);
                draft.set(next_draft);
                form_error.set(message);
            });
        });
    });

    view! {
        <div class="details">
            <nav class="top-bar">
                <A href="/" class="brand">"no"<span class="accent">"whey"</span></A>
                <AuthGate>
                    <Login/>
                </AuthGate>
            </nav>
            <A href="/" class="back-link">{ "\u{2190} Back to Search" }</A>
            <Show
                when=move || state.with(DetailState::is_ready)
                fallback=|| view! { <div class="spinner"></div> }
            >
                <ScoreBanner
                    assessment_score=Signal::derive(move || assessment.get().map(|a| a.score).unwrap_or(0.0))
                    user_score=Signal::derive(move || average_rating(&reviews.get()))
                    review_count=Signal::derive(move || reviews.with(Vec::len))
                />
                <section class="assessment">
                    <h2>{ restaurant }</h2>
                    <p class="subtitle">{ "Dairy-Free Assessment" }</p>
                    {move || assessment.get().map(|a| view! {
                        <dl>
                            <dt>{ "Summary" }</dt>
                            <dd>{ a.summary }</dd>
                            <dt>{ "Recommended Options" }</dt>
                            <dd>
                                <ul>
                                    {a.dairy_free_options.into_iter().map(|option| view! { <li>{ option }</li> }).collect_view()}
                                </ul>
                            </dd>
                        </dl>
                    })}
                </section>
                <ReviewForm draft=draft submitting=submitting error=form_error on_submit=on_submit/>
                <ReviewsList reviews=reviews/>
            </Show>
        </div>
    }
}
