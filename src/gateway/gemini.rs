use super::{Gateway, QuizRequest, Source, TopicSearch};
use crate::config::GatewaySettings;
use crate::error::GatewayError;
use crate::model::{Question, QuestionKind, Semester};
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};

const TOPIC_MARKER: &str = "TOPIC:";
const TOPICS_PER_SEARCH: usize = 8;
const SEARCH_TEMPERATURE: f32 = 0.3;
const QUIZ_TEMPERATURE: f32 = 0.4;

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiGateway {
    client: Client,
    settings: GatewaySettings,
}

impl GeminiGateway {
    pub fn new(settings: GatewaySettings) -> Self {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!("falling back to a default HTTP client: {err}");
                Client::new()
            });
        Self { client, settings }
    }

    fn url(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.settings.endpoint)
    }

    fn generate(&self, model: &str, body: &Value) -> Result<GenerateResponse, String> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| "no API key configured (set EXAMIAI_API_KEY)".to_string())?;

        let url = self.url(model);
        debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .map_err(|err| format!("error connecting to {url}: {err}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(format!(
                "HTTP {status} from {url}{}",
                if body.trim().is_empty() {
                    String::new()
                } else {
                    format!(". Body: {}", body.trim())
                }
            ));
        }

        response
            .json::<GenerateResponse>()
            .map_err(|err| format!("invalid JSON response: {err}"))
    }
}

impl Gateway for GeminiGateway {
    fn search_topics(
        &self,
        grade: &str,
        semester: Semester,
        subject: &str,
    ) -> Result<TopicSearch, GatewayError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": search_prompt(grade, semester, subject) }] }],
            "tools": [{ "google_search": {} }],
            "generationConfig": { "temperature": SEARCH_TEMPERATURE },
        });

        let response = self
            .generate(&self.settings.search_model, &body)
            .map_err(GatewayError::SearchFailed)?;
        let search = TopicSearch {
            topics: parse_topics(&response.text()),
            sources: response.sources(),
        };
        info!(
            "found {} topics for {subject} / {grade}",
            search.topics.len()
        );
        Ok(search)
    }

    fn generate_quiz(&self, request: &QuizRequest) -> Result<Vec<Question>, GatewayError> {
        let prompt = quiz_prompt(request, &self.settings.content_language);
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": QUIZ_TEMPERATURE,
                "responseMimeType": "application/json",
                "responseSchema": question_schema(),
            },
        });

        let response = self
            .generate(&self.settings.quiz_model, &body)
            .map_err(GatewayError::GenerationFailed)?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(GatewayError::GenerationFailed("no data returned".into()));
        }
        let questions = parse_questions(&text).map_err(GatewayError::GenerationFailed)?;
        if questions.len() != request.count as usize {
            warn!(
                "asked for {} questions, got {}",
                request.count,
                questions.len()
            );
        }
        Ok(questions)
    }
}

fn search_prompt(grade: &str, semester: Semester, subject: &str) -> String {
    format!(
        "Look up the school curriculum for the subject \"{subject}\" for \"{grade}\", \
         \"{}\", as taught in Arab countries.\n\
         Extract {TOPICS_PER_SEARCH} main lesson titles.\n\
         Format: one line per lesson, starting with \"{TOPIC_MARKER}\" followed by the title.",
        semester.label()
    )
}

fn quiz_prompt(request: &QuizRequest, language: &str) -> String {
    let style = if request.kind.is_open_response() {
        "Make every item an open-response question (type OPEN) that checks deep understanding."
    } else {
        "Use a mix of multiple-choice (MCQ) and true/false (TF) questions."
    };
    format!(
        "Create a {} of {} items about \"{}\" for the subject \"{}\" for \"{}\".\n{style}\nLanguage: {language}.",
        request.kind.label().to_lowercase(),
        request.count,
        request.topic,
        request.subject,
        request.grade,
    )
}

fn question_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "INTEGER" },
                "text": { "type": "STRING" },
                "type": { "type": "STRING", "enum": ["MCQ", "TF", "OPEN"] },
                "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                "correctAnswerIndex": { "type": "INTEGER" },
            },
            "required": ["id", "text", "type", "options", "correctAnswerIndex"],
        },
    })
}

/// Lines carrying the topic marker, in order, without the marker.
pub(crate) fn parse_topics(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.split_once(TOPIC_MARKER))
        .map(|(_, rest)| rest.trim().trim_matches('*').trim().to_string())
        .filter(|topic| !topic.is_empty())
        .collect()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireQuestion {
    #[serde(default)]
    id: i64,
    text: String,
    #[serde(rename = "type")]
    kind: QuestionKind,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answer_index: Option<i64>,
}

impl WireQuestion {
    fn into_question(self, position: usize) -> Question {
        let correct_answer_index = match self.kind {
            QuestionKind::OpenResponse => None,
            _ => self
                .correct_answer_index
                .and_then(|i| usize::try_from(i).ok())
                .filter(|i| *i < self.options.len()),
        };
        if self.kind != QuestionKind::OpenResponse && correct_answer_index.is_none() {
            warn!("question {} has no usable correct answer", self.id);
        }
        Question {
            id: if self.id == 0 { position as i64 + 1 } else { self.id },
            text: self.text,
            kind: self.kind,
            options: if self.kind == QuestionKind::OpenResponse {
                Vec::new()
            } else {
                self.options
            },
            correct_answer_index,
        }
    }
}

pub(crate) fn parse_questions(text: &str) -> Result<Vec<Question>, String> {
    let body = strip_code_fence(text);
    let wire: Vec<WireQuestion> =
        serde_json::from_str(body).map_err(|err| format!("questions do not match the schema: {err}"))?;
    Ok(wire
        .into_iter()
        .enumerate()
        .map(|(i, q)| q.into_question(i))
        .collect())
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize, Default)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Deserialize, Default)]
struct WebSource {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, all parts joined.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    fn sources(&self) -> Vec<Source> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| match (&web.title, &web.uri) {
                        (Some(title), Some(uri)) if !title.is_empty() && !uri.is_empty() => {
                            Some(Source {
                                title: title.clone(),
                                uri: uri.clone(),
                            })
                        }
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
