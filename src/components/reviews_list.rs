use leptos::*;
use crate::models::review::Review;
use crate::score::format_out_of;
use crate::models::review::MAX_RATING;

#[component]
pub fn ReviewsList(#[prop(into)] reviews: Signal<Vec<Review>>) -> impl IntoView {
    view! {
        <div class="reviews">
            <h3>{ "Reviews" }</h3>
            <ul>
                {move || {
                    let reviews = reviews.get();
                    if reviews.is_empty() {
                        return view! { <li class="empty">{ "No reviews yet." }</li> }.into_view();
                    }
                    reviews.into_iter().map(|review| {
                        view! {
                            <li>
                                <div class="review-header">
                                    <span class="review-author">{ review.user_name }</span>
                                    <span class="review-rating">{ format_out_of(review.rating, MAX_RATING) }</span>
                                </div>
                                <p>{ review.text }</p>
                            </li>
                        }
                    }).collect_view()
                }}
            </ul>
        </div>
    }
}
