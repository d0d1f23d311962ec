use crate::QuizApp;
use crate::ui::layout::{centered_panel, message_label};
use egui::{Button, Context, RichText, TextEdit};

pub fn ui_login(app: &mut QuizApp, ctx: &Context) {
    centered_panel(ctx, 280.0, 380.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("📚 ExamiAI").size(28.0));
            ui.label("Quizzes and homework for every lesson");
            ui.add_space(18.0);

            ui.add(TextEdit::singleline(&mut app.login_form.name).hint_text("User name"));
            ui.add_space(6.0);
            let password = ui.add(
                TextEdit::singleline(&mut app.login_form.password)
                    .password(true)
                    .hint_text("Password"),
            );
            ui.add_space(12.0);

            let submitted = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.add_sized([200.0, 36.0], Button::new("Log in")).clicked() || submitted {
                app.login();
            }
            message_label(ui, &app.message);
        });
    });
}
