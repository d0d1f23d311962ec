use super::*;
use crate::error::ValidationError;
use crate::gateway::QuizRequest;

impl QuizApp {
    pub fn set_question_count(&mut self, count: u32) {
        self.selection.set_question_count(count);
    }

    /// Asks the gateway for lessons matching the chosen grade, semester and
    /// subject. Returns false when the form is incomplete or a call is pending.
    pub fn search_topics(&mut self) -> bool {
        let missing = if self.selection.grade.is_empty() {
            Some("grade")
        } else if self.selection.subject.is_empty() {
            Some("subject")
        } else {
            None
        };
        if let Some(field) = missing {
            self.message = ValidationError::MissingField(field).to_string();
            return false;
        }

        let call = GatewayCall::SearchTopics {
            grade: self.selection.grade.clone(),
            semester: self.selection.semester,
            subject: self.selection.subject.clone(),
        };
        match self.dispatch(call) {
            Ok(()) => {
                self.message.clear();
                true
            }
            Err(err) => {
                self.message = err.to_string();
                false
            }
        }
    }

    /// Picks a lesson and asks for the questions. The quiz starts when the
    /// reply arrives.
    pub fn select_topic(&mut self, topic: &str) -> bool {
        let request = QuizRequest {
            topic: topic.to_owned(),
            grade: self.selection.grade.clone(),
            subject: self.selection.subject.clone(),
            count: self.selection.question_count,
            kind: self.resource_kind,
        };
        match self.dispatch(GatewayCall::GenerateQuiz(request)) {
            Ok(()) => {
                self.selection.topic = topic.to_owned();
                true
            }
            Err(err) => {
                self.message = err.to_string();
                false
            }
        }
    }

    /// Offers resume only for a fresh snapshot that belongs to the logged-in
    /// account. Stale or broken snapshots are dropped by the store.
    pub fn refresh_saved_progress(&mut self) {
        let owner = self.current_account().map(|a| a.name.clone());
        self.has_saved_progress = match (self.store.load(), owner) {
            (Some(snapshot), Some(owner)) => snapshot.student_name == owner,
            _ => false,
        };
    }

    /// Restores the saved quiz and restarts its countdown. A snapshot saved
    /// with no time left is submitted right away.
    pub fn resume_quiz(&mut self) -> bool {
        let Some(owner) = self.current_account().map(|a| a.name.clone()) else {
            return false;
        };
        let snapshot = match self.store.load() {
            Some(snapshot) if snapshot.student_name == owner => snapshot,
            _ => {
                self.has_saved_progress = false;
                return false;
            }
        };
        let session = match QuizSession::from_snapshot(snapshot) {
            Ok(session) => session,
            Err(reason) => {
                log::warn!("saved quiz cannot be restored: {reason}");
                self.store.clear();
                self.has_saved_progress = false;
                return false;
            }
        };
        if !self.navigate(Action::ResumeQuiz) {
            return false;
        }

        info!(
            "resuming quiz at question {} with {}s left",
            session.current_index + 1,
            session.seconds_remaining()
        );
        self.selection = session.selection.clone();
        self.resource_kind = session.resource_kind;
        let out_of_time = session.seconds_remaining() == 0;
        self.session = Some(session);
        self.has_saved_progress = false;
        if out_of_time {
            self.submit_quiz();
        } else {
            self.begin_timing();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn search_needs_grade_and_subject() {
        let mut app = app_with(NullGateway);
        login_student(&mut app);
        assert!(!app.search_topics());
        assert_eq!(app.message, "Please fill in the grade");
        app.selection.grade = "Grade 1 (primary)".into();
        assert!(!app.search_topics());
        assert_eq!(app.message, "Please fill in the subject");
        assert!(!app.is_loading());
    }

    #[test]
    fn refused_topic_pick_keeps_the_previous_topic() {
        let mut app = app_with(FixedGateway::new(3));
        login_student(&mut app);
        app.selection.grade = "Grade 5 (primary)".into();
        app.selection.subject = "Mathematics".into();
        assert!(app.search_topics());
        app.wait_for_gateway();
        assert_eq!(app.step, Step::Topics);

        assert!(app.select_topic("Fractions"));
        assert!(!app.select_topic("Decimals"));
        assert_eq!(app.selection.topic, "Fractions");
        app.wait_for_gateway();
        assert_eq!(app.step, Step::Quiz);
    }

    #[test]
    fn question_count_is_clamped() {
        let mut app = app_with(NullGateway);
        app.set_question_count(100);
        assert_eq!(app.selection.question_count, 30);
    }

    #[test]
    fn progress_of_another_student_is_not_offered() {
        let store = MemoryStore::default();
        let mut app = app_with_store(FixedGateway::new(5), store.clone());
        login_student(&mut app);
        start_generated_quiz(&mut app);
        app.select_option(1);
        app.logout();

        let mut other = app_with_store(FixedGateway::new(5), store.clone());
        sign_in(&mut other, "Omar", Role::Student);
        assert_eq!(other.step, Step::Selection);
        assert!(!other.has_saved_progress);
        assert!(!other.resume_quiz());
        assert!(store.raw(crate::persistence::SAVE_KEY).is_some());
    }
}
