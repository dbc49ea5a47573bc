use leptos::*;
use crate::models::assessment::MAX_SCORE;
use crate::models::review::MAX_RATING;
use crate::score::{format_out_of, ScoreBand};

/// The two headline numbers: the AI dairy-free score and the mean user rating.
#[component]
pub fn ScoreBanner(
    #[prop(into)] assessment_score: Signal<f64>,
    #[prop(into)] user_score: Signal<Option<f64>>,
    #[prop(into)] review_count: Signal<usize>,
) -> impl IntoView {
    let ai_class = move || {
        format!("score-value {}", ScoreBand::of(assessment_score.get(), MAX_SCORE).css_class())
    };
    let user_class = move || match user_score.get() {
        Some(score) => format!("score-value {}", ScoreBand::of(score, MAX_RATING).css_class()),
        None => "score-value".to_string(),
    };

    view! {
        <div class="score-banner">
            <div class="score">
                <span class=ai_class>{ move || format_out_of(assessment_score.get(), MAX_SCORE) }</span>
                <span class="score-label">{ "Dairy-Free Score" }</span>
            </div>
            <div class="score">
                <span class=user_class>
                    { move || user_score.get().map(|s| format_out_of(s, MAX_RATING)).unwrap_or_else(|| "--".to_string()) }
                </span>
                <span class="score-label">{ "User Score" }</span>
                <span class="review-count">
                    { move || match review_count.get() {
                        1 => "1 Review".to_string(),
                        n => format!("{} Reviews", n),
                    } }
                </span>
            </div>
        </div>
    }
}
