// src/ui/helpers.rs
use egui::{Button, ComboBox, Ui, Vec2};

pub fn big_list_button(ui: &mut Ui, label: &str, width: f32, height: f32, enabled: bool) -> bool {
    ui.add_enabled(enabled, Button::new(label).min_size(Vec2::new(width, height)))
        .clicked()
}

/// Combo box over a list of strings. An empty `selected` shows `placeholder`.
pub fn string_combo(ui: &mut Ui, id: &str, placeholder: &str, options: &[String], selected: &mut String) {
    let text = if selected.is_empty() {
        placeholder.to_owned()
    } else {
        selected.clone()
    };
    ComboBox::from_id_salt(id)
        .selected_text(text)
        .width(ui.available_width().min(320.0))
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(selected, option.clone(), option);
            }
        });
}

/// Label/value row used by the forms.
pub fn form_row(ui: &mut Ui, label: &str, add: impl FnOnce(&mut Ui)) {
    ui.horizontal(|ui| {
        ui.add_sized([140.0, 20.0], egui::Label::new(label));
        add(ui);
    });
}
