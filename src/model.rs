use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Quiz,
    Assignment,
    Worksheet,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Quiz,
        ResourceKind::Assignment,
        ResourceKind::Worksheet,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Quiz => "Quiz",
            ResourceKind::Assignment => "Homework assignment",
            ResourceKind::Worksheet => "Worksheet",
        }
    }

    /// Worksheets are made of open-response items; everything else is objective.
    pub fn is_open_response(&self) -> bool {
        matches!(self, ResourceKind::Worksheet)
    }
}

impl Default for ResourceKind {
    fn default() -> Self {
        ResourceKind::Quiz
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Semester {
    First,
    Second,
    Third,
}

impl Semester {
    pub const ALL: [Semester; 3] = [Semester::First, Semester::Second, Semester::Third];

    pub fn label(&self) -> &'static str {
        match self {
            Semester::First => "First semester",
            Semester::Second => "Second semester",
            Semester::Third => "Third semester",
        }
    }
}

impl Default for Semester {
    fn default() -> Self {
        Semester::First
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    #[serde(rename = "MCQ")]
    MultipleChoice,
    #[serde(rename = "TF")]
    TrueFalse,
    #[serde(rename = "OPEN")]
    OpenResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
    // Always None for open-response items; kept for external grading.
    #[serde(default)]
    pub correct_answer_index: Option<usize>,
}

impl Question {
    pub fn is_open_response(&self) -> bool {
        self.kind == QuestionKind::OpenResponse
    }

    pub fn is_correct(&self, answer: Option<usize>) -> bool {
        !self.is_open_response()
            && matches!((answer, self.correct_answer_index), (Some(a), Some(c)) if a == c)
    }
}

pub const MIN_QUESTIONS: u32 = 5;
pub const MAX_QUESTIONS: u32 = 30;
pub const DEFAULT_QUESTIONS: u32 = 10;

/// Parameters picked on the selection screen (or the teacher dashboard).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub grade: String,
    pub semester: Semester,
    pub subject: String,
    pub topic: String,
    pub question_count: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            grade: String::new(),
            semester: Semester::First,
            subject: String::new(),
            topic: String::new(),
            question_count: DEFAULT_QUESTIONS,
        }
    }
}

impl Selection {
    pub fn set_question_count(&mut self, count: u32) {
        self.question_count = count.clamp(MIN_QUESTIONS, MAX_QUESTIONS);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub answers: Vec<Option<usize>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub student_name: String,
    pub subject: String,
    pub topic: String,
    pub grade: String,
    pub score: usize,
    pub total: usize,
    pub resource_kind: ResourceKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: String,
    pub sender: String,
    pub text: String,
    pub sent_at: chrono::DateTime<chrono::Local>,
}

/// Settings an administrator can tune at runtime. Persisted with eframe storage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Percentage needed to pass a quiz.
    pub min_passing_score: u8,
    pub dark_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            min_passing_score: 50,
            dark_mode: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Login,
    ChangePasswordRequired,
    Selection,
    Topics,
    Quiz,
    Results,
    Reports,
    Notifications,
    AdminDashboard,
    TeacherDashboard,
}

impl Default for Step {
    fn default() -> Self {
        Step::Login
    }
}
