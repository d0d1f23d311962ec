use crate::model::{Question, QuizResult, ResourceKind, Selection};
use crate::scoring::{self, Score};
use crate::timer::{Countdown, Tick};
use serde::{Deserialize, Serialize};

/// Seconds granted per question.
pub const SECONDS_PER_QUESTION: u32 = 60;

/// The serialized in-progress quiz used for resume-after-restart.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub student_name: String,
    pub questions: Vec<Question>,
    pub current_question_index: usize,
    #[serde(with = "answer_slots")]
    pub selected_answers: Vec<Option<usize>>,
    #[serde(default)]
    pub responses: Vec<String>,
    pub seconds_remaining: u32,
    pub selection: Selection,
    pub resource_kind: ResourceKind,
    /// Unix milliseconds at the time of the save.
    pub timestamp: i64,
}

impl SessionSnapshot {
    /// Checks the structural invariants a restorable snapshot must hold.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.questions.is_empty() {
            return Err("no questions");
        }
        if self.selected_answers.len() != self.questions.len() {
            return Err("answer count differs from question count");
        }
        if !self.responses.is_empty() && self.responses.len() != self.questions.len() {
            return Err("response count differs from question count");
        }
        if self.current_question_index >= self.questions.len() {
            return Err("question index out of range");
        }
        Ok(())
    }
}

/// Unanswered slots are stored as -1.
mod answer_slots {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(answers: &[Option<usize>], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(
            answers
                .iter()
                .map(|a| a.map(|i| i as i64).unwrap_or(-1)),
        )
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Option<usize>>, D::Error> {
        let raw = Vec::<i64>::deserialize(d)?;
        Ok(raw
            .into_iter()
            .map(|v| usize::try_from(v).ok())
            .collect())
    }
}

/// One quiz being taken: questions, position, answers and the countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    pub student_name: String,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub answers: Vec<Option<usize>>,
    pub responses: Vec<String>,
    pub selection: Selection,
    pub resource_kind: ResourceKind,
    timer: Countdown,
}

impl QuizSession {
    /// Returns None for an empty question list: there is nothing to take.
    pub fn new(
        student_name: impl Into<String>,
        questions: Vec<Question>,
        selection: Selection,
        resource_kind: ResourceKind,
    ) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        let count = questions.len();
        let seconds = SECONDS_PER_QUESTION.saturating_mul(count as u32);
        Some(Self {
            student_name: student_name.into(),
            questions,
            current_index: 0,
            answers: vec![None; count],
            responses: vec![String::new(); count],
            selection,
            resource_kind,
            timer: Countdown::new(seconds),
        })
    }

    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self, &'static str> {
        snapshot.validate()?;
        let count = snapshot.questions.len();
        let responses = if snapshot.responses.is_empty() {
            vec![String::new(); count]
        } else {
            snapshot.responses
        };
        Ok(Self {
            student_name: snapshot.student_name,
            questions: snapshot.questions,
            current_index: snapshot.current_question_index,
            answers: snapshot.selected_answers,
            responses,
            selection: snapshot.selection,
            resource_kind: snapshot.resource_kind,
            timer: Countdown::new(snapshot.seconds_remaining),
        })
    }

    pub fn to_snapshot(&self, timestamp: i64) -> SessionSnapshot {
        SessionSnapshot {
            student_name: self.student_name.clone(),
            questions: self.questions.clone(),
            current_question_index: self.current_index,
            selected_answers: self.answers.clone(),
            responses: self.responses.clone(),
            seconds_remaining: self.timer.remaining(),
            selection: self.selection.clone(),
            resource_kind: self.resource_kind,
            timestamp,
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn previous(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Records an option for the current question. Ignored for open-response
    /// items and for out-of-range options.
    pub fn select_option(&mut self, option: usize) -> bool {
        let question = self.current_question();
        if question.is_open_response() || option >= question.options.len() {
            return false;
        }
        let slot = &mut self.answers[self.current_index];
        if *slot == Some(option) {
            return false;
        }
        *slot = Some(option);
        true
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.answers[self.current_index]
    }

    pub fn set_response(&mut self, text: &str) -> bool {
        let slot = &mut self.responses[self.current_index];
        if slot.as_str() == text {
            return false;
        }
        *slot = text.to_owned();
        true
    }

    pub fn response(&self) -> &str {
        &self.responses[self.current_index]
    }

    pub fn answered_count(&self) -> usize {
        self.answers
            .iter()
            .zip(&self.responses)
            .filter(|(a, r)| a.is_some() || !r.trim().is_empty())
            .count()
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn start_timer(&mut self) -> bool {
        self.timer.resume()
    }

    pub fn stop_timer(&mut self) {
        self.timer.stop();
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn tick(&mut self) -> Tick {
        self.timer.tick()
    }

    pub fn score(&self) -> Score {
        scoring::score(&self.questions, &self.answers)
    }

    pub fn into_result(self) -> QuizResult {
        let Score { score, total } = self.score();
        QuizResult {
            score,
            total,
            answers: self.answers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionKind;

    fn sample_questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| Question {
                id: i as i64 + 1,
                text: format!("Question {}", i + 1),
                kind: QuestionKind::MultipleChoice,
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer_index: Some(i % 4),
            })
            .collect()
    }

    fn session(count: usize) -> QuizSession {
        QuizSession::new(
            "student",
            sample_questions(count),
            Selection::default(),
            ResourceKind::Quiz,
        )
        .unwrap()
    }

    #[test]
    fn new_session_starts_unanswered_with_sixty_seconds_per_question() {
        let s = session(10);
        assert_eq!(s.current_index, 0);
        assert_eq!(s.answers, vec![None; 10]);
        assert_eq!(s.seconds_remaining(), 600);
        assert!(!s.timer_running());
    }

    #[test]
    fn empty_question_list_creates_no_session() {
        assert!(
            QuizSession::new("s", Vec::new(), Selection::default(), ResourceKind::Quiz).is_none()
        );
    }

    #[test]
    fn navigation_is_bounded() {
        let mut s = session(2);
        assert!(!s.previous());
        assert!(s.next());
        assert!(s.is_last());
        assert!(!s.next());
        assert!(s.previous());
        assert_eq!(s.current_index, 0);
    }

    #[test]
    fn selection_survives_navigation() {
        let mut s = session(3);
        assert!(s.select_option(2));
        s.next();
        assert_eq!(s.selected_option(), None);
        s.previous();
        assert_eq!(s.selected_option(), Some(2));
    }

    #[test]
    fn open_response_records_text_not_options() {
        let mut questions = sample_questions(1);
        questions[0].kind = QuestionKind::OpenResponse;
        questions[0].options.clear();
        questions[0].correct_answer_index = None;
        let mut s =
            QuizSession::new("s", questions, Selection::default(), ResourceKind::Worksheet)
                .unwrap();
        assert!(!s.select_option(0));
        assert!(s.set_response("Photosynthesis makes sugar"));
        assert_eq!(s.answered_count(), 1);
        assert_eq!(s.score(), Score { score: 0, total: 1 });
    }

    #[test]
    fn snapshot_keeps_minus_one_for_unanswered() {
        let mut s = session(3);
        s.select_option(1);
        let json = serde_json::to_value(s.to_snapshot(42)).unwrap();
        assert_eq!(json["selectedAnswers"], serde_json::json!([1, -1, -1]));
        assert_eq!(json["secondsRemaining"], 180);
        assert_eq!(json["timestamp"], 42);
    }

    #[test]
    fn snapshot_restores_exact_state() {
        let mut s = session(4);
        s.select_option(3);
        s.next();
        s.select_option(1);
        s.start_timer();
        for _ in 0..17 {
            s.tick();
        }
        let text = serde_json::to_string(&s.to_snapshot(7)).unwrap();
        let snapshot: SessionSnapshot = serde_json::from_str(&text).unwrap();
        let restored = QuizSession::from_snapshot(snapshot).unwrap();
        assert_eq!(restored.current_index, 1);
        assert_eq!(restored.answers, vec![Some(3), Some(1), None, None]);
        assert_eq!(restored.seconds_remaining(), 240 - 17);
        assert!(!restored.timer_running());
    }

    #[test]
    fn inconsistent_snapshot_is_rejected() {
        let mut snapshot = session(2).to_snapshot(0);
        snapshot.selected_answers.pop();
        assert!(QuizSession::from_snapshot(snapshot.clone()).is_err());
        snapshot.selected_answers = vec![None, None];
        snapshot.current_question_index = 2;
        assert!(QuizSession::from_snapshot(snapshot).is_err());
    }
}
