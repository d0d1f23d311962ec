use crate::QuizApp;
use crate::ui::helpers::big_list_button;
use crate::ui::layout::{message_label, simple_panel};
use egui::{Context, Hyperlink, RichText, ScrollArea};

pub fn ui_topics(app: &mut QuizApp, ctx: &Context) {
    simple_panel(ctx, 640.0, egui::Margin::symmetric(24, 16), |ui| {
        ui.heading(format!(
            "📖 {} · {} · {}",
            app.selection.subject,
            app.selection.grade,
            app.selection.semester.label()
        ));
        ui.label(format!(
            "Pick a lesson to generate a {} with {} questions.",
            app.resource_kind.label().to_lowercase(),
            app.selection.question_count
        ));
        ui.add_space(10.0);

        let enabled = !app.is_loading();
        let width = ui.available_width();
        let mut chosen = None;
        ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
            for topic in &app.topics {
                if big_list_button(ui, topic, width, 36.0, enabled) {
                    chosen = Some(topic.clone());
                }
                ui.add_space(4.0);
            }
        });
        if let Some(topic) = chosen {
            app.select_topic(&topic);
        }
        if app.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Writing the questions…");
            });
        }

        if !app.sources.is_empty() {
            ui.add_space(10.0);
            ui.label(RichText::new("Sources").strong());
            for source in &app.sources {
                let title = if source.title.is_empty() { &source.uri } else { &source.title };
                ui.add(Hyperlink::from_label_and_url(title.as_str(), &source.uri));
            }
        }

        ui.add_space(10.0);
        if ui.button("⬅ Back").clicked() {
            app.go_home();
        }
        message_label(ui, &app.message);
    });
}
