use crate::accounts::{Account, AccountBook, Role};
use crate::config::GatewaySettings;
use crate::data::{Catalog, read_catalog_embedded};
use crate::gateway::{Gateway, GeminiGateway, Source};
use crate::model::{
    AppConfig, HistoryEntry, Notification, Question, QuizResult, ResourceKind, Selection,
    Step,
};
use crate::navigation::{self, Action};
use crate::persistence::{FileStore, KeyValueStore, ProgressStore};
use crate::session::QuizSession;
use crate::timer::Ticker;
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

pub mod accounts;
pub mod jobs;
pub mod quiz;
pub mod selection;
pub mod view_models;

pub use jobs::{GatewayCall, GatewayReply};

pub const APP_ID: &str = "ExamiAI";

#[derive(Default, Clone, Debug)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct NewAccountForm {
    pub name: String,
    pub password: String,
    pub role: Role,
}

impl Default for NewAccountForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            password: String::new(),
            role: Role::Teacher,
        }
    }
}

/// Every piece of state of one running client. Screens read it and call the
/// named operations in the submodules; nothing else mutates it.
pub struct QuizApp {
    pub step: Step,
    pub config: AppConfig,
    pub catalog: Catalog,
    pub accounts: AccountBook,
    current_user: Option<String>,

    pub selection: Selection,
    pub resource_kind: ResourceKind,
    pub topics: Vec<String>,
    pub sources: Vec<Source>,
    pub session: Option<QuizSession>,
    pub last_result: Option<QuizResult>,
    pub last_questions: Vec<Question>,
    pub last_responses: Vec<String>,
    pub history: Vec<HistoryEntry>,
    pub notifications: Vec<Notification>,

    pub login_form: LoginForm,
    pub new_account_form: NewAccountForm,
    pub new_password: String,
    pub notification_draft: String,
    pub pending_delete: Option<String>,

    /// Inline feedback under the current form.
    pub message: String,
    /// Blocking alert shown on top of the current screen.
    pub alert: Option<String>,
    pub has_saved_progress: bool,

    store: ProgressStore,
    gateway: Arc<dyn Gateway>,
    in_flight: Option<jobs::InFlight>,
    /// Bumped by every navigation and logout; stale gateway replies are
    /// recognised by it.
    nav_epoch: u64,
    ticker: Ticker,
}

impl QuizApp {
    pub fn new(gateway: Arc<dyn Gateway>, store: impl KeyValueStore + 'static) -> Self {
        Self {
            step: Step::Login,
            config: AppConfig::default(),
            catalog: read_catalog_embedded(),
            accounts: AccountBook::default(),
            current_user: None,
            selection: Selection::default(),
            resource_kind: ResourceKind::Quiz,
            topics: Vec::new(),
            sources: Vec::new(),
            session: None,
            last_result: None,
            last_questions: Vec::new(),
            last_responses: Vec::new(),
            history: Vec::new(),
            notifications: Vec::new(),
            login_form: LoginForm::default(),
            new_account_form: NewAccountForm::default(),
            new_password: String::new(),
            notification_draft: String::new(),
            pending_delete: None,
            message: String::new(),
            alert: None,
            has_saved_progress: false,
            store: ProgressStore::new(store),
            gateway,
            in_flight: None,
            nav_epoch: 0,
            ticker: Ticker::default(),
        }
    }

    /// Desktop setup: Gemini client from the environment, progress stored
    /// next to eframe's own storage, config restored from eframe storage.
    pub fn from_creation_context(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = GatewaySettings::from_env();
        if settings.api_key.is_none() {
            log::warn!("EXAMIAI_API_KEY is not set; lesson search and generation will fail");
        }
        let mut app = Self::new(
            Arc::new(GeminiGateway::new(settings)),
            FileStore::for_app(APP_ID),
        );
        if let Some(storage) = cc.storage {
            if let Some(config) = eframe::get_value::<AppConfig>(storage, eframe::APP_KEY) {
                app.config = config;
            }
        }
        app
    }

    pub fn current_account(&self) -> Option<&Account> {
        self.current_user
            .as_deref()
            .and_then(|id| self.accounts.get(id))
    }

    pub fn current_role(&self) -> Option<Role> {
        self.current_account().map(|a| a.role)
    }

    /// Applies a named transition. Returns false (and changes nothing) when
    /// the transition table does not allow it.
    pub fn navigate(&mut self, action: Action) -> bool {
        let Some(next) = navigation::transition(self.step, action, self.current_account()) else {
            debug!("ignoring {action:?} on {:?}", self.step);
            return false;
        };
        if self.step == Step::Quiz && next != Step::Quiz {
            self.leave_quiz();
        }
        if next == Step::Selection {
            self.refresh_saved_progress();
        }
        info!("{:?} -> {:?}", self.step, next);
        self.step = next;
        self.nav_epoch += 1;
        self.message.clear();
        true
    }

    pub fn go_home(&mut self) {
        self.navigate(Action::GoHome);
    }

    pub fn open_reports(&mut self) {
        self.navigate(Action::OpenReports);
    }

    pub fn open_notifications(&mut self) {
        self.navigate(Action::OpenNotifications);
    }

    /// Called once per frame by the shell: delivers finished gateway calls,
    /// then turns elapsed wall-clock seconds into timer ticks.
    pub fn on_frame(&mut self, now: Instant) {
        self.poll_gateway();
        let due = self.ticker.due(now);
        for _ in 0..due {
            if !self.tick() {
                break;
            }
        }
    }

    /// Time until the next timer tick, for repaint scheduling.
    pub fn until_next_tick(&self, now: Instant) -> Option<std::time::Duration> {
        self.ticker.until_next(now)
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub(crate) fn show_alert(&mut self, text: impl Into<String>) {
        let text = text.into();
        info!("alert: {text}");
        self.alert = Some(text);
    }
}
