use crate::QuizApp;
use egui::{Context, Grid, ScrollArea};

use crate::ui::layout::simple_panel;

pub fn ui_reports(app: &mut QuizApp, ctx: &Context) {
    let rows = app.report_rows();
    let totals = app.report_totals();

    simple_panel(ctx, 900.0, egui::Margin::symmetric(24, 16), |ui| {
        ui.heading("📊 Reports");
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(format!("Attempts: {}", totals.attempts));
            ui.separator();
            ui.label(format!("Average: {:.0}%", totals.average_percent));
            ui.separator();
            ui.label(format!("Pass rate: {:.0}%", totals.pass_rate));
        });
        ui.add_space(10.0);

        if rows.is_empty() {
            ui.label("No quizzes have been submitted yet.");
        } else {
            ScrollArea::vertical().max_height(480.0).show(ui, |ui| {
                Grid::new("reports_grid")
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for title in ["Date", "Student", "Grade", "Subject", "Lesson", "Type", "Score", ""] {
                            ui.strong(title);
                        }
                        ui.end_row();

                        for r in &rows {
                            ui.label(r.when.as_str());
                            ui.label(r.student.as_str());
                            ui.label(r.grade.as_str());
                            ui.label(r.subject.as_str());
                            ui.label(r.topic.as_str());
                            ui.label(r.kind.label());
                            ui.label(r.score.as_str());
                            ui.label(if r.passed { "✅" } else { "❌" });
                            ui.end_row();
                        }
                    });
            });
        }

        ui.add_space(10.0);
        if ui.button("⬅ Back").clicked() {
            app.go_home();
        }
    });
}
