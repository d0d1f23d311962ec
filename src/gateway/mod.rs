//! Boundary to the generative-AI service that proposes lessons and writes questions.

use crate::error::GatewayError;
use crate::model::{Question, ResourceKind, Semester};

pub mod gemini;

pub use gemini::GeminiGateway;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopicSearch {
    pub topics: Vec<String>,
    pub sources: Vec<Source>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizRequest {
    pub topic: String,
    pub grade: String,
    pub subject: String,
    pub count: u32,
    pub kind: ResourceKind,
}

/// The generation service. Implementations block; the app runs them on a
/// worker thread.
pub trait Gateway: Send + Sync {
    fn search_topics(
        &self,
        grade: &str,
        semester: Semester,
        subject: &str,
    ) -> Result<TopicSearch, GatewayError>;

    /// May return more or fewer than `request.count` questions.
    fn generate_quiz(&self, request: &QuizRequest) -> Result<Vec<Question>, GatewayError>;
}
