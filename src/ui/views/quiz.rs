use crate::QuizApp;
use crate::ui::layout::two_button_row;
use crate::view_models::format_clock;
use egui::{Button, CentralPanel, Color32, Context, ProgressBar, RichText, ScrollArea, TextEdit};

pub fn ui_quiz(app: &mut QuizApp, ctx: &Context) {
    let Some(session) = app.session.as_ref() else {
        // Only for the frame in which the quiz was submitted.
        return;
    };
    let number = session.current_index + 1;
    let total = session.len();
    let remaining = session.seconds_remaining();
    let answered = session.answered_count();
    let is_first = session.current_index == 0;
    let is_last = session.is_last();
    let question = session.current_question().clone();
    let selected = session.selected_option();
    let mut response = session.response().to_owned();
    let heading = format!(
        "{} · {}",
        app.resource_kind.label(),
        session.selection.topic
    );

    CentralPanel::default().show(ctx, |ui| {
        let max_width = 650.0;
        let panel_width = (ui.available_width() * 0.97).min(max_width);

        ui.vertical_centered(|ui| {
            egui::Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(24, 20))
                .show(ui, |ui| {
                    ui.set_width(panel_width);
                    ui.horizontal(|ui| {
                        ui.heading(heading);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let clock = RichText::new(format!("⏱ {}", format_clock(remaining)))
                                .size(20.0)
                                .strong();
                            let clock = if remaining <= 60 {
                                clock.color(Color32::RED)
                            } else {
                                clock
                            };
                            ui.label(clock);
                        });
                    });
                    ui.add(
                        ProgressBar::new(answered as f32 / total as f32)
                            .text(format!("{answered} of {total} answered")),
                    );
                    ui.add_space(12.0);

                    ui.label(RichText::new(format!("Question {number} of {total}")).weak());
                    ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                        ui.label(RichText::new(&question.text).size(18.0));
                    });
                    ui.add_space(10.0);

                    if question.is_open_response() {
                        let edit = ui.add(
                            TextEdit::multiline(&mut response)
                                .desired_rows(6)
                                .desired_width(panel_width)
                                .hint_text("Write your answer here"),
                        );
                        if edit.changed() {
                            app.set_response(&response);
                        }
                    } else {
                        for (i, option) in question.options.iter().enumerate() {
                            let chosen = selected == Some(i);
                            let button = Button::selectable(chosen, option.as_str())
                                .min_size([panel_width, 34.0].into());
                            if ui.add(button).clicked() {
                                app.select_option(i);
                            }
                            ui.add_space(4.0);
                        }
                    }

                    ui.add_space(14.0);
                    let (back, forward) = two_button_row(
                        ui,
                        panel_width,
                        ("⬅ Previous", !is_first),
                        ("Next ➡", !is_last),
                    );
                    if back {
                        app.previous_question();
                    }
                    if forward {
                        app.next_question();
                    }

                    if is_last {
                        ui.add_space(10.0);
                        let submit = Button::new(RichText::new("✅ Submit").strong())
                            .min_size([panel_width, 38.0].into());
                        if ui.add(submit).clicked() {
                            app.submit_quiz();
                        }
                    }
                });
        });
    });
}
