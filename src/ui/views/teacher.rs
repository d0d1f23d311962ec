use crate::QuizApp;
use crate::ui::layout::{centered_panel, message_label};
use crate::ui::views::selection::selection_form;
use egui::{Button, Context, RichText};

pub fn ui_teacher_dashboard(app: &mut QuizApp, ctx: &Context) {
    centered_panel(ctx, 460.0, 560.0, |ui| {
        ui.heading("🧑‍🏫 Create a test");
        ui.label(
            RichText::new(format!(
                "{} submissions recorded · {} notifications sent",
                app.history.len(),
                app.notifications.len()
            ))
            .weak(),
        );
        ui.add_space(12.0);

        selection_form(app, ui);
        ui.add_space(12.0);

        if ui
            .add_enabled(!app.is_loading(), Button::new("🔍 Find lessons").min_size([200.0, 36.0].into()))
            .clicked()
        {
            app.search_topics();
        }
        message_label(ui, &app.message);
    });
}
