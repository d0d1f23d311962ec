use crate::QuizApp;
use crate::accounts::Role;
use crate::ui::layout::{message_label, simple_panel};
use egui::{Context, RichText, ScrollArea, TextEdit};

pub fn ui_notifications(app: &mut QuizApp, ctx: &Context) {
    let can_post = app.current_role().is_some_and(|r| r != Role::Student);

    simple_panel(ctx, 640.0, egui::Margin::symmetric(24, 16), |ui| {
        ui.heading("🔔 Notifications");
        ui.add_space(8.0);

        if can_post {
            ui.add(
                TextEdit::multiline(&mut app.notification_draft)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY)
                    .hint_text("Message for your students"),
            );
            if ui.button("📨 Send").clicked() {
                // Validation errors land in the inline message.
                let _ = app.send_notification();
            }
            message_label(ui, &app.message);
            ui.separator();
        }

        if app.notifications.is_empty() {
            ui.label("No notifications yet.");
        }
        ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
            for n in &app.notifications {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        RichText::new(format!("{} · {}", n.sender, n.sent_at.format("%Y-%m-%d %H:%M")))
                            .weak(),
                    );
                    ui.label(n.text.as_str());
                });
                ui.add_space(4.0);
            }
        });

        ui.add_space(10.0);
        if ui.button("⬅ Back").clicked() {
            app.go_home();
        }
    });
}
