mod helpers;
pub mod layout;
pub mod views;

use crate::app::QuizApp;
use crate::model::Step;
use eframe::{APP_KEY, App, Frame, set_value};
use egui::{Context, Visuals};
use layout::{alert_window, bottom_panel, confirm_delete_window, top_panel};
use std::time::Instant;

impl App for QuizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let now = Instant::now();
        self.on_frame(now);

        ctx.set_visuals(if self.config.dark_mode {
            Visuals::dark()
        } else {
            Visuals::light()
        });

        if !matches!(self.step, Step::Login | Step::ChangePasswordRequired) {
            top_panel(self, ctx);
        }
        bottom_panel(self, ctx);

        match self.step {
            Step::Login => views::login::ui_login(self, ctx),
            Step::ChangePasswordRequired => views::password::ui_change_password(self, ctx),
            Step::Selection => views::selection::ui_selection(self, ctx),
            Step::Topics => views::topics::ui_topics(self, ctx),
            Step::Quiz => views::quiz::ui_quiz(self, ctx),
            Step::Results => views::results::ui_results(self, ctx),
            Step::Reports => views::reports::ui_reports(self, ctx),
            Step::Notifications => views::notifications::ui_notifications(self, ctx),
            Step::AdminDashboard => views::admin::ui_admin_dashboard(self, ctx),
            Step::TeacherDashboard => views::teacher::ui_teacher_dashboard(self, ctx),
        }

        if self.pending_delete.is_some() {
            confirm_delete_window(self, ctx);
        }
        if self.alert.is_some() {
            alert_window(self, ctx);
        }

        if self.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        } else if let Some(wait) = self.until_next_tick(now) {
            ctx.request_repaint_after(wait);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        set_value(storage, APP_KEY, &self.config);
    }
}
