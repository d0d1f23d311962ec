use super::*;
use crate::error::GatewayError;
use crate::model::Question;
use crate::timer::Tick;
use chrono::Utc;

impl QuizApp {
    /// Turns generated questions into a running quiz. An empty list is a
    /// generation failure and leaves the app on Topics.
    pub fn start_quiz(&mut self, questions: Vec<Question>) -> bool {
        let student = self
            .current_account()
            .map(|a| a.name.clone())
            .unwrap_or_default();
        let Some(session) = QuizSession::new(
            student,
            questions,
            self.selection.clone(),
            self.resource_kind,
        ) else {
            self.report_gateway_error(GatewayError::GenerationFailed(
                "empty question list".into(),
            ));
            return false;
        };
        if !self.navigate(Action::QuizReady) {
            return false;
        }
        info!(
            "starting {} with {} questions",
            self.resource_kind.label(),
            session.len()
        );
        self.session = Some(session);
        self.last_result = None;
        self.begin_timing();
        true
    }

    pub(crate) fn begin_timing(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.start_timer();
            self.ticker.start(Instant::now());
        }
        self.autosave();
    }

    /// Navigation away from Quiz: the countdown stops and the snapshot is
    /// left behind for a later resume.
    pub(crate) fn leave_quiz(&mut self) {
        self.ticker.stop();
        if let Some(mut session) = self.session.take() {
            session.stop_timer();
            self.store
                .save(&session.to_snapshot(Utc::now().timestamp_millis()));
            info!("left quiz with {}s remaining", session.seconds_remaining());
        }
    }

    pub fn previous_question(&mut self) {
        if self.session.as_mut().is_some_and(|s| s.previous()) {
            self.autosave();
        }
    }

    pub fn next_question(&mut self) {
        if self.session.as_mut().is_some_and(|s| s.next()) {
            self.autosave();
        }
    }

    pub fn select_option(&mut self, option: usize) {
        if self.session.as_mut().is_some_and(|s| s.select_option(option)) {
            self.autosave();
        }
    }

    pub fn set_response(&mut self, text: &str) {
        if self.session.as_mut().is_some_and(|s| s.set_response(text)) {
            self.autosave();
        }
    }

    /// One second of quiz time. Returns false once there is nothing left to
    /// tick, so the caller can stop draining due ticks.
    pub fn tick(&mut self) -> bool {
        if self.step != Step::Quiz {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match session.tick() {
            Tick::Running(_) => {
                self.autosave();
                true
            }
            Tick::Expired => {
                info!("time is up");
                self.submit_quiz();
                false
            }
            Tick::Idle => false,
        }
    }

    /// Ends the active quiz and shows the results. Does nothing without an
    /// active quiz, so expiry and a manual submit cannot both apply.
    pub fn submit_quiz(&mut self) {
        let Some(mut session) = self.session.take() else {
            debug!("submit ignored: no active quiz");
            return;
        };
        session.stop_timer();
        self.ticker.stop();
        self.store.clear();
        self.has_saved_progress = false;

        let entry = HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            student_name: session.student_name.clone(),
            subject: session.selection.subject.clone(),
            topic: session.selection.topic.clone(),
            grade: session.selection.grade.clone(),
            score: 0,
            total: 0,
            resource_kind: session.resource_kind,
        };
        self.last_questions = session.questions.clone();
        self.last_responses = session.responses.clone();
        let result = session.into_result();
        info!(
            "{} scored {}/{} on {}",
            entry.student_name, result.score, result.total, entry.topic
        );
        self.history.insert(
            0,
            HistoryEntry {
                score: result.score,
                total: result.total,
                ..entry
            },
        );
        self.last_result = Some(result);
        self.navigate(Action::SubmitQuiz);
    }

    fn autosave(&mut self) {
        if let Some(session) = &self.session {
            self.store
                .save(&session.to_snapshot(Utc::now().timestamp_millis()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::persistence::{MemoryStore, SAVE_KEY};
    use crate::session::SessionSnapshot;

    fn saved(store: &MemoryStore) -> Option<SessionSnapshot> {
        store
            .raw(SAVE_KEY)
            .map(|text| serde_json::from_str(&text).unwrap())
    }

    fn quiz_app(count: usize) -> (QuizApp, MemoryStore) {
        let store = MemoryStore::default();
        let mut app = app_with_store(FixedGateway::new(count), store.clone());
        login_student(&mut app);
        start_generated_quiz(&mut app);
        (app, store)
    }

    #[test]
    fn starting_a_quiz_saves_progress() {
        let (app, store) = quiz_app(10);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.seconds_remaining(), 600);
        assert!(session.timer_running());
        let snapshot = saved(&store).unwrap();
        assert_eq!(snapshot.current_question_index, 0);
        assert_eq!(snapshot.seconds_remaining, 600);
        assert_eq!(snapshot.student_name, "student");
    }

    #[test]
    fn every_change_is_saved() {
        let (mut app, store) = quiz_app(3);
        app.select_option(2);
        assert_eq!(saved(&store).unwrap().selected_answers[0], Some(2));
        app.next_question();
        assert_eq!(saved(&store).unwrap().current_question_index, 1);
        app.tick();
        assert_eq!(saved(&store).unwrap().seconds_remaining, 179);
    }

    #[test]
    fn expiry_submits_once_with_score_zero() {
        let (mut app, store) = quiz_app(10);
        let mut ticks = 0;
        while app.tick() {
            ticks += 1;
        }
        assert_eq!(ticks, 599);
        assert_eq!(app.step, Step::Results);
        let result = app.last_result.as_ref().unwrap();
        assert_eq!((result.score, result.total), (0, 10));
        assert_eq!(app.history.len(), 1);
        assert!(store.raw(SAVE_KEY).is_none());

        app.submit_quiz();
        assert!(!app.tick());
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn manual_submit_scores_answers() {
        let (mut app, _) = quiz_app(2);
        // FixedGateway marks option 0 correct.
        app.select_option(0);
        app.next_question();
        app.select_option(3);
        app.submit_quiz();
        let result = app.last_result.clone().unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.answers, vec![Some(0), Some(3)]);
        assert_eq!(app.history[0].topic, "Fractions");
    }

    #[test]
    fn empty_question_list_stays_on_topics() {
        let mut app = app_with(FixedGateway::new(0));
        login_student(&mut app);
        app.selection.grade = "Grade 3 (primary)".into();
        app.selection.subject = "Science".into();
        app.search_topics();
        app.wait_for_gateway();
        app.select_topic("Fractions");
        app.wait_for_gateway();
        assert_eq!(app.step, Step::Topics);
        assert!(app.session.is_none());
        assert!(app.alert.is_some());
    }

    #[test]
    fn leaving_the_quiz_stops_time_and_keeps_the_snapshot() {
        let (mut app, store) = quiz_app(4);
        app.tick();
        app.go_home();
        assert_eq!(app.step, Step::Selection);
        assert!(!app.tick());
        assert!(app.has_saved_progress);
        assert_eq!(saved(&store).unwrap().seconds_remaining, 239);

        assert!(app.resume_quiz());
        assert_eq!(app.step, Step::Quiz);
        assert_eq!(app.session.as_ref().unwrap().seconds_remaining(), 239);
        assert!(app.tick());
    }
}
