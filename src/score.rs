//! Score display. Every score is shown as its raw value over its own scale
//! (`7/10` for the assessment, `4.5/5` for users) and coloured by how far
//! along that scale it sits.

use crate::models::review::Review;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn of(score: f64, max: f64) -> Self {
        let fraction = if max > 0.0 { score / max } else { 0.0 };
        if fraction >= 0.7 {
            ScoreBand::High
        } else if fraction >= 0.4 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBand::High => "score-high",
            ScoreBand::Medium => "score-medium",
            ScoreBand::Low => "score-low",
        }
    }
}

/// `7/10`, `4.5/5`. At most one decimal, trailing `.0` dropped.
pub fn format_out_of(score: f64, max: f64) -> String {
    format!("{}/{}", format_number(score), format_number(max))
}

fn format_number(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

/// Mean user rating, `None` when nobody has reviewed yet.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: f64 = reviews.iter().map(|r| r.rating).sum();
    Some(total / reviews.len() as f64)
}
