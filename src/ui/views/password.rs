use crate::QuizApp;
use crate::accounts::MIN_PASSWORD_LEN;
use crate::ui::layout::{centered_panel, message_label};
use egui::{Button, Context, TextEdit};

pub fn ui_change_password(app: &mut QuizApp, ctx: &Context) {
    centered_panel(ctx, 220.0, 380.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🔑 Choose a new password");
            ui.label(format!(
                "Your password must be changed before continuing (at least {MIN_PASSWORD_LEN} characters)."
            ));
            ui.add_space(12.0);
            ui.add(
                TextEdit::singleline(&mut app.new_password)
                    .password(true)
                    .hint_text("New password"),
            );
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.add_sized([150.0, 32.0], Button::new("Save")).clicked() {
                    app.change_password();
                }
                if ui.add_sized([150.0, 32.0], Button::new("Log out")).clicked() {
                    app.logout();
                }
            });
            message_label(ui, &app.message);
        });
    });
}
