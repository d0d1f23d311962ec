use crate::QuizApp;
use crate::model::{MAX_QUESTIONS, MIN_QUESTIONS, ResourceKind, Semester};
use crate::ui::helpers::{form_row, string_combo};
use crate::ui::layout::{centered_panel, message_label};
use egui::{Button, ComboBox, Context, RichText, Slider, Ui};

pub fn ui_selection(app: &mut QuizApp, ctx: &Context) {
    centered_panel(ctx, 420.0, 560.0, |ui| {
        ui.heading("🎯 What do you want to practise?");
        ui.add_space(12.0);

        if app.has_saved_progress {
            ui.group(|ui| {
                ui.label(RichText::new("You have an unfinished quiz.").strong());
                if ui.button("▶ Continue where I left off").clicked() {
                    app.resume_quiz();
                }
            });
            ui.add_space(10.0);
        }

        selection_form(app, ui);
        ui.add_space(12.0);

        let label = if app.is_loading() { "Searching…" } else { "🔍 Find lessons" };
        if ui
            .add_enabled(!app.is_loading(), Button::new(label).min_size([200.0, 36.0].into()))
            .clicked()
        {
            app.search_topics();
        }
        message_label(ui, &app.message);
    });
}

/// Grade, semester, subject, resource kind and question count.
pub fn selection_form(app: &mut QuizApp, ui: &mut Ui) {
    let grades = app.catalog.grades.clone();
    let subjects = app.catalog.subjects.clone();

    form_row(ui, "Grade", |ui| {
        string_combo(ui, "grade", "Choose a grade", &grades, &mut app.selection.grade);
    });
    form_row(ui, "Semester", |ui| {
        ComboBox::from_id_salt("semester")
            .selected_text(app.selection.semester.label())
            .show_ui(ui, |ui| {
                for semester in Semester::ALL {
                    ui.selectable_value(&mut app.selection.semester, semester, semester.label());
                }
            });
    });
    form_row(ui, "Subject", |ui| {
        string_combo(ui, "subject", "Choose a subject", &subjects, &mut app.selection.subject);
    });
    form_row(ui, "Type", |ui| {
        for kind in ResourceKind::ALL {
            ui.radio_value(&mut app.resource_kind, kind, kind.label());
        }
    });
    form_row(ui, "Questions", |ui| {
        let mut count = app.selection.question_count;
        if ui
            .add(Slider::new(&mut count, MIN_QUESTIONS..=MAX_QUESTIONS))
            .changed()
        {
            app.set_question_count(count);
        }
    });
}
