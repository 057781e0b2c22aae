use campaign_timeline::timeline::TimelineIntent;
use egui::{Color32, Context, RichText, Window};

use crate::app::TimelineApp;
use crate::ui::theme;

/// Rename-swimlane dialog. Enter or "Rename" commits, Escape cancels.
pub fn show_rename_lane_dialog(app: &mut TimelineApp, ctx: &Context) {
    let Some((swimlane_id, mut name)) = app.rename_lane.take() else {
        return;
    };
    let mut commit = false;
    let mut cancel = false;

    Window::new(RichText::new("Rename Swimlane").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            let edit = ui.add_sized(
                [ui.available_width(), 24.0],
                egui::TextEdit::singleline(&mut name).hint_text("Swimlane name..."),
            );
            edit.request_focus();
            if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                commit = true;
            }
            ui.add_space(6.0);
            ui.separator();
            ui.horizontal(|ui| {
                let rename = egui::Button::new(RichText::new("Rename").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add(rename).clicked() {
                    commit = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        cancel = true;
    }
    let trimmed = name.trim().to_string();
    if commit && !trimmed.is_empty() {
        app.apply_intent(TimelineIntent::RenameSwimlane {
            swimlane_id,
            name: trimmed,
        });
    } else if !commit && !cancel {
        app.rename_lane = Some((swimlane_id, name));
    }
}

pub fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Campaign Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Plan marketing activities in swimlanes.");
                ui.label("Drag to move, pull edges to resize.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
