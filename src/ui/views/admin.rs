use crate::QuizApp;
use crate::accounts::Role;
use crate::ui::helpers::form_row;
use crate::ui::layout::{message_label, simple_panel};
use egui::{ComboBox, Context, Grid, RichText, Slider, TextEdit};

pub fn ui_admin_dashboard(app: &mut QuizApp, ctx: &Context) {
    simple_panel(ctx, 760.0, egui::Margin::symmetric(24, 16), |ui| {
        ui.heading("🛠 Administration");
        ui.add_space(10.0);

        ui.label(RichText::new("Accounts").strong());
        let rows: Vec<(String, String, Role, bool)> = app
            .deletable_accounts()
            .into_iter()
            .map(|a| (a.id.clone(), a.name.clone(), a.role, a.must_change_password))
            .collect();
        Grid::new("accounts_grid").striped(true).spacing([16.0, 4.0]).show(ui, |ui| {
            for (id, name, role, pending) in &rows {
                ui.label(name.as_str());
                ui.label(role.label());
                ui.label(if *pending { "password not set yet" } else { "" });
                if ui.button("🗑 Delete").clicked() {
                    app.request_delete(id);
                }
                ui.end_row();
            }
        });
        if rows.is_empty() {
            ui.label("Only your own account exists.");
        }

        ui.add_space(14.0);
        ui.label(RichText::new("New account").strong());
        form_row(ui, "Name", |ui| {
            ui.add(TextEdit::singleline(&mut app.new_account_form.name));
        });
        form_row(ui, "Password", |ui| {
            ui.add(TextEdit::singleline(&mut app.new_account_form.password).password(true));
        });
        form_row(ui, "Role", |ui| {
            ComboBox::from_id_salt("new_account_role")
                .selected_text(app.new_account_form.role.label())
                .show_ui(ui, |ui| {
                    for role in Role::ALL {
                        ui.selectable_value(&mut app.new_account_form.role, role, role.label());
                    }
                });
        });
        if ui.button("➕ Create account").clicked() {
            // Failures are shown through the inline message.
            let _ = app.add_account();
        }
        message_label(ui, &app.message);

        ui.add_space(14.0);
        ui.label(RichText::new("Settings").strong());
        form_row(ui, "Pass mark (%)", |ui| {
            let mut percent = app.config.min_passing_score;
            if ui.add(Slider::new(&mut percent, 0..=100)).changed() {
                app.set_min_passing_score(percent);
            }
        });
    });
}
