use crate::model::{Question, QuizResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub score: usize,
    pub total: usize,
}

impl Score {
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f32 * 100.0 / self.total as f32
        }
    }

    pub fn passed(&self, min_passing_score: u8) -> bool {
        self.percent() >= f32::from(min_passing_score)
    }
}

/// Counts answers matching the correct option. Open-response items count
/// towards the total but are never scored here. Missing answers are
/// treated as unanswered.
pub fn score(questions: &[Question], answers: &[Option<usize>]) -> Score {
    let score = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| q.is_correct(answers.get(*i).copied().flatten()))
        .count();
    Score {
        score,
        total: questions.len(),
    }
}

impl From<&QuizResult> for Score {
    fn from(result: &QuizResult) -> Self {
        Score {
            score: result.score,
            total: result.total,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Review {
    Correct,
    Incorrect,
    Unanswered,
    /// Left for a teacher to grade.
    NeedsManualReview,
}

pub fn review(question: &Question, answer: Option<usize>) -> Review {
    if question.is_open_response() {
        Review::NeedsManualReview
    } else if answer.is_none() {
        Review::Unanswered
    } else if question.is_correct(answer) {
        Review::Correct
    } else {
        Review::Incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionKind;

    fn question(id: i64, kind: QuestionKind, correct: Option<usize>) -> Question {
        let options = match kind {
            QuestionKind::MultipleChoice => vec!["a".into(), "b".into(), "c".into(), "d".into()],
            QuestionKind::TrueFalse => vec!["True".into(), "False".into()],
            QuestionKind::OpenResponse => vec![],
        };
        Question {
            id,
            text: format!("question {id}"),
            kind,
            options,
            correct_answer_index: correct,
        }
    }

    #[test]
    fn counts_matching_answers() {
        let questions = vec![
            question(1, QuestionKind::MultipleChoice, Some(2)),
            question(2, QuestionKind::TrueFalse, Some(0)),
            question(3, QuestionKind::MultipleChoice, Some(1)),
        ];
        let answers = vec![Some(2), Some(1), Some(1)];
        assert_eq!(score(&questions, &answers), Score { score: 2, total: 3 });
    }

    #[test]
    fn open_response_counts_in_total_only() {
        let questions = vec![
            question(1, QuestionKind::OpenResponse, None),
            question(2, QuestionKind::MultipleChoice, Some(0)),
        ];
        let answers = vec![Some(0), Some(0)];
        let result = score(&questions, &answers);
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 2);
    }

    #[test]
    fn unanswered_and_short_answer_lists_score_zero() {
        let questions = vec![
            question(1, QuestionKind::MultipleChoice, Some(0)),
            question(2, QuestionKind::MultipleChoice, Some(0)),
        ];
        assert_eq!(score(&questions, &[None, None]).score, 0);
        assert_eq!(score(&questions, &[Some(0)]).score, 1);
        assert_eq!(score(&questions, &[]).score, 0);
    }

    #[test]
    fn order_of_questions_does_not_change_the_score() {
        let mut questions = vec![
            question(1, QuestionKind::MultipleChoice, Some(3)),
            question(2, QuestionKind::TrueFalse, Some(1)),
            question(3, QuestionKind::OpenResponse, None),
            question(4, QuestionKind::MultipleChoice, Some(0)),
        ];
        let mut answers = vec![Some(3), Some(0), Some(1), Some(0)];
        let forward = score(&questions, &answers);
        questions.reverse();
        answers.reverse();
        assert_eq!(score(&questions, &answers), forward);
        assert!(forward.score <= forward.total);
    }

    #[test]
    fn pass_mark_uses_percentage() {
        let half = Score { score: 5, total: 10 };
        assert!(half.passed(50));
        assert!(!half.passed(51));
        assert_eq!(Score { score: 0, total: 0 }.percent(), 0.0);
    }

    #[test]
    fn review_marks_each_answer() {
        let mcq = question(1, QuestionKind::MultipleChoice, Some(1));
        assert_eq!(review(&mcq, Some(1)), Review::Correct);
        assert_eq!(review(&mcq, Some(0)), Review::Incorrect);
        assert_eq!(review(&mcq, None), Review::Unanswered);
        let open = question(2, QuestionKind::OpenResponse, None);
        assert_eq!(review(&open, None), Review::NeedsManualReview);
    }
}
