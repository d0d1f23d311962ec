use crate::QuizApp;
use crate::scoring::Review;
use egui::{CentralPanel, Color32, Context, RichText, ScrollArea};

pub fn ui_results(app: &mut QuizApp, ctx: &Context) {
    let Some(summary) = app.result_summary() else {
        app.go_home();
        return;
    };
    let min = app.config.min_passing_score;

    CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            let panel_width = (ui.available_width() * 0.97).min(650.0);
            ui.set_width(panel_width);

            ui.heading("🏁 Results");
            ui.add_space(8.0);
            ui.label(RichText::new(summary.headline()).size(30.0).strong());
            let (verdict, color) = if summary.passed {
                ("Passed", Color32::from_rgb(40, 160, 70))
            } else {
                ("Not passed", Color32::from_rgb(200, 60, 60))
            };
            ui.label(RichText::new(format!("{verdict} (pass mark {min}%)")).color(color));
            ui.add_space(14.0);

            ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                for item in &summary.items {
                    ui.group(|ui| {
                        ui.set_width(panel_width - 24.0);
                        ui.label(RichText::new(format!("{} {}. {}", item.icon(), item.number, item.text)).strong());
                        match item.review {
                            Review::NeedsManualReview => {
                                let text = if item.response.trim().is_empty() {
                                    "(no answer)"
                                } else {
                                    item.response.as_str()
                                };
                                ui.label(format!("Your answer: {text}"));
                                ui.label(RichText::new("Graded by your teacher").weak());
                            }
                            _ => {
                                let chosen = item.chosen.as_deref().unwrap_or("(no answer)");
                                ui.label(format!("Your answer: {chosen}"));
                                if item.review != Review::Correct {
                                    if let Some(correct) = &item.correct {
                                        ui.label(format!("Correct answer: {correct}"));
                                    }
                                }
                            }
                        }
                    });
                    ui.add_space(4.0);
                }
            });

            ui.add_space(12.0);
            if ui.button("🏠 Back to start").clicked() {
                app.go_home();
            }
        });
    });
}
