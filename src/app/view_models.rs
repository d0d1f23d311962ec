use super::*;
use crate::error::{AppError, AuthError, ValidationError};
use crate::scoring::{self, Score};
use crate::view_models::{ReportRow, ReportTotals, ResultSummary, ReviewItem};

impl QuizApp {
    /// Score, pass/fail and per-question review of the last submitted quiz.
    pub fn result_summary(&self) -> Option<ResultSummary> {
        let result = self.last_result.as_ref()?;
        let score = Score::from(result);
        let items = self
            .last_questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let answer = result.answers.get(i).copied().flatten();
                let option_text = |idx: Option<usize>| idx.and_then(|k| q.options.get(k)).cloned();
                ReviewItem {
                    number: i + 1,
                    text: q.text.clone(),
                    chosen: option_text(answer),
                    correct: option_text(q.correct_answer_index),
                    response: self.last_responses.get(i).cloned().unwrap_or_default(),
                    review: scoring::review(q, answer),
                }
            })
            .collect();
        Some(ResultSummary {
            score: score.score,
            total: score.total,
            percent: score.percent(),
            passed: score.passed(self.config.min_passing_score),
            items,
        })
    }

    /// History rows, newest first, for the reports screen.
    pub fn report_rows(&self) -> Vec<ReportRow> {
        self.history
            .iter()
            .map(|h| {
                let score = Score {
                    score: h.score,
                    total: h.total,
                };
                ReportRow {
                    when: h
                        .timestamp
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                    student: h.student_name.clone(),
                    grade: h.grade.clone(),
                    subject: h.subject.clone(),
                    topic: h.topic.clone(),
                    kind: h.resource_kind,
                    score: format!("{}/{}", h.score, h.total),
                    passed: score.passed(self.config.min_passing_score),
                }
            })
            .collect()
    }

    pub fn report_totals(&self) -> ReportTotals {
        if self.history.is_empty() {
            return ReportTotals::default();
        }
        let attempts = self.history.len();
        let (sum, passed) = self.history.iter().fold((0.0_f32, 0usize), |(sum, passed), h| {
            let score = Score {
                score: h.score,
                total: h.total,
            };
            let ok = score.passed(self.config.min_passing_score);
            (sum + score.percent(), passed + usize::from(ok))
        });
        ReportTotals {
            attempts,
            average_percent: sum / attempts as f32,
            pass_rate: passed as f32 * 100.0 / attempts as f32,
        }
    }

    /// Posts the drafted notification. Students can only read them.
    pub fn send_notification(&mut self) -> Result<(), AppError> {
        let Some(sender) = self.current_account() else {
            return Err(AuthError::NotAuthenticated.into());
        };
        if sender.role == Role::Student {
            return Err(AuthError::PermissionDenied.into());
        }
        let sender = sender.name.clone();
        let text = self.notification_draft.trim().to_owned();
        if text.is_empty() {
            self.message = ValidationError::EmptyNotification.to_string();
            return Err(ValidationError::EmptyNotification.into());
        }
        info!("{sender} posted a notification");
        self.notifications.insert(
            0,
            Notification {
                id: uuid::Uuid::new_v4().to_string(),
                sender,
                text,
                sent_at: chrono::Local::now(),
            },
        );
        self.notification_draft.clear();
        self.message.clear();
        Ok(())
    }
}
