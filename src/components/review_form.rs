use leptos::*;
use leptos::ev::SubmitEvent;
use crate::models::review::ReviewDraft;

/// "Add a Review" form. The draft lives with the parent so it can reset the
/// fields after a successful submit and leave them alone after a failure.
#[component]
pub fn ReviewForm(
    draft: RwSignal<ReviewDraft>,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
    on_submit: Callback<ReviewDraft>,
) -> impl IntoView {
    // Typed text for the rating box, so "4." survives while the user types.
    let rating_text = create_rw_signal(draft.get_untracked().rating.to_string());

    create_effect(move |_| {
        let rating = draft.with(|d| d.rating);
        let shown = rating_text.get_untracked().trim().parse::<f64>().ok();
        if !rating.is_nan() && shown != Some(rating) {
            rating_text.set(rating.to_string());
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.call(draft.get_untracked());
    };

    view! {
        <form class="review-form" on:submit=handle_submit>
            <h3>{ "Add a Review" }</h3>
            <label for="user">{ "Name" }</label>
            <input
                type="text"
                id="user"
                required
                prop:value=move || draft.with(|d| d.user_name.clone())
                on:input=move |e| draft.update(|d| d.user_name = event_target_value(&e))
            />
            <label for="rating">{ "Rating (0-5)" }</label>
            <input
                type="number"
                id="rating"
                min="0"
                max="5"
                step="0.5"
                required
                prop:value=move || rating_text.get()
                on:input=move |e| {
                    let text = event_target_value(&e);
                    let rating = text.trim().parse::<f64>().unwrap_or(f64::NAN);
                    rating_text.set(text);
                    draft.update(|d| d.rating = rating);
                }
            />
            <label for="review">{ "Review" }</label>
            <textarea
                id="review"
                rows="3"
                required
                prop:value=move || draft.with(|d| d.text.clone())
                on:input=move |e| draft.update(|d| d.text = event_target_value(&e))
            />
            {move || error.get().map(|message| view! { <p class="form-error">{ message }</p> })}
            <button type="submit" disabled=move || submitting.get()>
                {move || if submitting.get() { "Submitting..." } else { "Submit Review" }}
            </button>
        </form>
    }
}
