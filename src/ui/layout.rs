use crate::QuizApp;
use crate::model::Step;
use egui::{Button, CentralPanel, Context, Frame, Ui};

/// Who is logged in, plus the global navigation buttons.
pub fn top_panel(app: &mut QuizApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            if let Some(account) = app.current_account() {
                ui.label(format!("👤 {} ({})", account.name, account.role.label()));
            }
            ui.separator();

            let in_quiz = app.step == Step::Quiz;
            if ui
                .add_enabled(!in_quiz, Button::new("🏠 Home"))
                .on_disabled_hover_text("Submit the quiz first")
                .clicked()
            {
                app.go_home();
            }
            if ui.add_enabled(!in_quiz, Button::new("🔔 Notifications")).clicked() {
                app.open_notifications();
            }
            let can_report = app
                .current_account()
                .is_some_and(|a| a.permissions.can_view_reports);
            if can_report && ui.add_enabled(!in_quiz, Button::new("📊 Reports")).clicked() {
                app.open_reports();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🚪 Log out").clicked() {
                    app.logout();
                }
            });
        });
    });
}

pub fn bottom_panel(app: &mut QuizApp, ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🌙 Dark mode").clicked() {
                app.config.dark_mode = true;
            }
            if ui.button("☀ Light mode").clicked() {
                app.config.dark_mode = false;
            }
            if app.is_loading() {
                ui.spinner();
                ui.label("Working…");
            }
        });
    });
}

/// Panel centred both ways, with a maximum content width.
pub fn centered_panel(ctx: &Context, est_height: f32, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        let extra = ((ui.available_height() - est_height) / 2.0).max(0.0);
        ui.add_space(extra);
        ui.vertical_centered(|ui| {
            Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    let w = ui.available_width().min(max_width);
                    ui.set_width(w);
                    inner(ui);
                });
        });
        ui.add_space(extra);
    });
}

pub fn simple_panel(ctx: &Context, max_width: f32, margin: egui::Margin, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        let w = ui.available_width().min(max_width);
        Frame::default()
            .fill(ui.visuals().window_fill())
            .inner_margin(margin)
            .show(ui, |ui| {
                ui.set_width(w);
                inner(ui);
            });
    });
}

/// Two equally sized buttons centred in `panel_width`, each with its own
/// enabled flag. Returns (left clicked, right clicked).
pub fn two_button_row(
    ui: &mut Ui,
    panel_width: f32,
    left: (&str, bool),
    right: (&str, bool),
) -> (bool, bool) {
    let btn_w = (panel_width - 8.0) / 2.0;
    let mut clicked_left = false;
    let mut clicked_right = false;
    ui.horizontal(|ui| {
        ui.add_space(((ui.available_width() - panel_width) / 2.0).max(0.0));
        clicked_left = ui
            .add_enabled_ui(left.1, |ui| ui.add_sized([btn_w, 36.0], Button::new(left.0)))
            .inner
            .clicked();
        clicked_right = ui
            .add_enabled_ui(right.1, |ui| ui.add_sized([btn_w, 36.0], Button::new(right.0)))
            .inner
            .clicked();
    });
    (clicked_left, clicked_right)
}

/// Inline feedback of the current form, if any.
pub fn message_label(ui: &mut Ui, message: &str) {
    if !message.is_empty() {
        ui.add_space(6.0);
        let color = ui.visuals().warn_fg_color;
        ui.colored_label(color, message);
    }
}

pub fn alert_window(app: &mut QuizApp, ctx: &Context) {
    let Some(text) = app.alert.clone() else {
        return;
    };
    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(text);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                app.dismiss_alert();
            }
        });
}

pub fn confirm_delete_window(app: &mut QuizApp, ctx: &Context) {
    let Some(name) = app
        .pending_delete
        .as_deref()
        .and_then(|id| app.accounts.get(id))
        .map(|a| a.name.clone())
    else {
        app.cancel_delete();
        return;
    };
    egui::Window::new("Delete account")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("Delete the account \"{name}\"? This cannot be undone."));
            ui.horizontal(|ui| {
                if ui.button("Yes, delete").clicked() {
                    // The error, if any, is already in the inline message.
                    let _ = app.confirm_delete();
                }
                if ui.button("No").clicked() {
                    app.cancel_delete();
                }
            });
        });
}
