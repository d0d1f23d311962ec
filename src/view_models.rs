// src/view_models.rs

use crate::model::ResourceKind;
use crate::scoring::Review;

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewItem {
    pub number: usize,
    pub text: String,
    pub chosen: Option<String>,
    pub correct: Option<String>,
    /// Written answer for open-response items.
    pub response: String,
    pub review: Review,
}

impl ReviewItem {
    pub fn icon(&self) -> &'static str {
        match self.review {
            Review::Correct => "✅",
            Review::Incorrect => "❌",
            Review::Unanswered => "⏺",
            Review::NeedsManualReview => "📝",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultSummary {
    pub score: usize,
    pub total: usize,
    pub percent: f32,
    pub passed: bool,
    pub items: Vec<ReviewItem>,
}

impl ResultSummary {
    pub fn headline(&self) -> String {
        format!("{} / {} ({:.0}%)", self.score, self.total, self.percent)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    pub when: String,
    pub student: String,
    pub grade: String,
    pub subject: String,
    pub topic: String,
    pub kind: ResourceKind,
    pub score: String,
    pub passed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReportTotals {
    pub attempts: usize,
    pub average_percent: f32,
    pub pass_rate: f32,
}

/// Countdown as mm:ss.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(0), "00:00");
    }
}
