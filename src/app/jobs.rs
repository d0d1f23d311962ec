use super::*;
use crate::error::GatewayError;
use crate::gateway::{QuizRequest, TopicSearch};
use crate::model::{Question, Semester};
use log::warn;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Work handed to the gateway thread.
#[derive(Clone, Debug, PartialEq)]
pub enum GatewayCall {
    SearchTopics {
        grade: String,
        semester: Semester,
        subject: String,
    },
    GenerateQuiz(QuizRequest),
}

#[derive(Clone, Debug, PartialEq)]
pub enum GatewayReply {
    Topics(Result<TopicSearch, GatewayError>),
    Questions(Result<Vec<Question>, GatewayError>),
}

impl GatewayCall {
    /// Error reported when this call gets no reply at all.
    fn lost(&self) -> GatewayError {
        let cause = "worker ended without replying".to_owned();
        match self {
            GatewayCall::SearchTopics { .. } => GatewayError::SearchFailed(cause),
            GatewayCall::GenerateQuiz(_) => GatewayError::GenerationFailed(cause),
        }
    }
}

/// The single pending call. Its reply only applies while no navigation or
/// logout happened since `epoch` was taken.
pub(crate) struct InFlight {
    origin: Step,
    epoch: u64,
    lost: GatewayError,
    receiver: Receiver<GatewayReply>,
    started: Instant,
}

impl QuizApp {
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Runs `call` on a worker thread. Refused while another call is pending.
    pub fn dispatch(&mut self, call: GatewayCall) -> Result<(), GatewayError> {
        if self.in_flight.is_some() {
            debug!("refusing {call:?}: a gateway call is pending");
            return Err(GatewayError::Busy);
        }
        let (sender, receiver) = mpsc::channel();
        let gateway = Arc::clone(&self.gateway);
        let lost = call.lost();
        info!("gateway call from {:?}: {call:?}", self.step);

        std::thread::spawn(move || {
            let reply = match call {
                GatewayCall::SearchTopics {
                    grade,
                    semester,
                    subject,
                } => GatewayReply::Topics(gateway.search_topics(&grade, semester, &subject)),
                GatewayCall::GenerateQuiz(request) => {
                    GatewayReply::Questions(gateway.generate_quiz(&request))
                }
            };
            // The app may be gone by now; nothing to do then.
            let _ = sender.send(reply);
        });

        self.in_flight = Some(InFlight {
            origin: self.step,
            epoch: self.nav_epoch,
            lost,
            receiver,
            started: Instant::now(),
        });
        Ok(())
    }

    /// Non-blocking: applies the pending reply if it has arrived.
    pub fn poll_gateway(&mut self) {
        let Some(in_flight) = &self.in_flight else {
            return;
        };
        match in_flight.receiver.try_recv() {
            Ok(reply) => self.finish_call(Some(reply)),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.finish_call(None),
        }
    }

    /// Blocks until the pending call (if any) has replied, then applies it.
    pub fn wait_for_gateway(&mut self) {
        let Some(in_flight) = &self.in_flight else {
            return;
        };
        let reply = in_flight.receiver.recv().ok();
        self.finish_call(reply);
    }

    fn finish_call(&mut self, reply: Option<GatewayReply>) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        debug!(
            "gateway call finished after {:?}",
            in_flight.started.elapsed()
        );
        if in_flight.epoch != self.nav_epoch {
            info!(
                "dropping gateway reply for {:?}; now on {:?}",
                in_flight.origin, self.step
            );
            return;
        }
        let Some(reply) = reply else {
            self.report_gateway_error(in_flight.lost);
            return;
        };
        match reply {
            GatewayReply::Topics(result) => self.apply_topics(result),
            GatewayReply::Questions(Ok(questions)) => {
                self.start_quiz(questions);
            }
            GatewayReply::Questions(Err(err)) => self.report_gateway_error(err),
        }
    }

    fn apply_topics(&mut self, result: Result<TopicSearch, GatewayError>) {
        let search = match result {
            Ok(search) if search.topics.is_empty() => {
                self.report_gateway_error(GatewayError::SearchFailed("no topics".into()));
                return;
            }
            Ok(search) => search,
            Err(err) => {
                self.report_gateway_error(err);
                return;
            }
        };
        info!("{} lessons found", search.topics.len());
        self.topics = search.topics;
        self.sources = search.sources;
        self.navigate(Action::TopicsFound);
    }

    pub(crate) fn report_gateway_error(&mut self, err: GatewayError) {
        warn!("gateway failure: {}", err.cause());
        self.show_alert(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;

    fn on_selection(gateway: impl Gateway + 'static) -> QuizApp {
        let mut app = app_with(gateway);
        login_student(&mut app);
        app.selection.grade = "Grade 5 (primary)".into();
        app.selection.subject = "Mathematics".into();
        app
    }

    #[test]
    fn topics_reply_moves_to_topics() {
        let mut app = on_selection(FixedGateway::new(3));
        assert!(app.search_topics());
        assert!(app.is_loading());
        app.wait_for_gateway();
        assert!(!app.is_loading());
        assert_eq!(app.step, Step::Topics);
        assert_eq!(app.topics, vec!["Fractions", "Decimals"]);
    }

    #[test]
    fn second_call_is_refused_while_one_is_pending() {
        let mut app = on_selection(FixedGateway::new(3));
        assert!(app.search_topics());
        let again = app.dispatch(GatewayCall::SearchTopics {
            grade: "g".into(),
            semester: Semester::First,
            subject: "s".into(),
        });
        assert_eq!(again, Err(GatewayError::Busy));
        app.wait_for_gateway();
    }

    #[test]
    fn search_failure_alerts_and_stays() {
        let mut app = on_selection(NullGateway);
        assert!(app.search_topics());
        app.wait_for_gateway();
        assert_eq!(app.step, Step::Selection);
        assert_eq!(
            app.alert.as_deref(),
            Some("Sorry, the lesson search failed")
        );
    }

    #[test]
    fn reply_after_navigating_away_is_dropped() {
        let mut app = on_selection(FixedGateway::new(3));
        assert!(app.search_topics());
        app.open_notifications();
        app.wait_for_gateway();
        assert_eq!(app.step, Step::Notifications);
        assert!(app.topics.is_empty());
        assert!(app.alert.is_none());
    }

    #[test]
    fn reply_after_leaving_and_coming_back_is_dropped() {
        let mut app = app_with(FixedGateway::new(3));
        sign_in(&mut app, "Mona", Role::Teacher);
        assert_eq!(app.step, Step::TeacherDashboard);
        app.selection.grade = "Grade 5 (primary)".into();
        app.selection.subject = "Mathematics".into();
        assert!(app.search_topics());
        app.open_reports();
        app.go_home();
        app.wait_for_gateway();
        assert_eq!(app.step, Step::TeacherDashboard);
        assert!(app.topics.is_empty());
    }

    #[test]
    fn logout_forgets_the_pending_call() {
        let mut app = on_selection(FixedGateway::new(3));
        assert!(app.search_topics());
        app.logout();
        assert!(!app.is_loading());

        sign_in(&mut app, "Omar", Role::Student);
        assert_eq!(app.step, Step::Selection);
        app.wait_for_gateway();
        assert_eq!(app.step, Step::Selection);
        assert!(app.topics.is_empty());

        app.selection.grade = "Grade 5 (primary)".into();
        app.selection.subject = "Mathematics".into();
        assert!(app.search_topics());
        app.wait_for_gateway();
        assert_eq!(app.step, Step::Topics);
    }

    /// Dies on the worker thread before replying.
    struct CrashingGateway;

    impl Gateway for CrashingGateway {
        fn search_topics(&self, _: &str, _: Semester, _: &str) -> Result<TopicSearch, GatewayError> {
            panic!("worker crashed");
        }

        fn generate_quiz(&self, _: &QuizRequest) -> Result<Vec<Question>, GatewayError> {
            panic!("worker crashed");
        }
    }

    #[test]
    fn lost_search_reply_reports_a_search_failure() {
        let mut app = on_selection(CrashingGateway);
        assert!(app.search_topics());
        app.wait_for_gateway();
        assert!(!app.is_loading());
        assert_eq!(app.step, Step::Selection);
        assert_eq!(
            app.alert.as_deref(),
            Some("Sorry, the lesson search failed")
        );
    }
}
