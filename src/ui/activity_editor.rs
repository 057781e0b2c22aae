use campaign_timeline::model::{palette, Activity, Board};
use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;
use uuid::Uuid;

use crate::ui::theme;

/// Actions the editor can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Save,
    Duplicate(Uuid),
    Delete(Uuid),
    Close,
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

/// Render the side-panel editor for a draft copy of one activity.
///
/// Edits stay in the draft until Save; the host turns that into an update.
pub fn show_activity_editor(
    draft: &mut Activity,
    board: &Board,
    read_only: bool,
    ui: &mut Ui,
) -> EditorAction {
    let mut action = EditorAction::None;
    let activity_id = draft.id;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(if read_only { "Activity" } else { "Edit Activity" })
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let close = ui.add(egui::Button::new(RichText::new(icons::X).color(theme::TEXT_DIM)).frame(false));
            if close.on_hover_text("Close").clicked() {
                action = EditorAction::Close;
            }
        });
    });
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.add_enabled_ui(!read_only, |ui| {
            field_label(ui, "Title");
            ui.add_sized(
                [ui.available_width(), 24.0],
                egui::TextEdit::singleline(&mut draft.title).font(egui::FontId::proportional(12.0)),
            );

            // ── Swimlane ─────────────────────────────────────────────────
            field_label(ui, "Swimlane");
            let lane_name = board
                .swimlane(draft.swimlane_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "?".to_string());
            egui::ComboBox::from_id_salt("activity_lane")
                .selected_text(RichText::new(lane_name).size(11.0))
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for lane in &board.swimlanes {
                        ui.selectable_value(&mut draft.swimlane_id, lane.id, &lane.name);
                    }
                });

            // ── Dates ────────────────────────────────────────────────────
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    field_label(ui, "Start");
                    let resp = ui.add(egui_extras::DatePickerButton::new(&mut draft.start).id_salt("activity_start"));
                    if resp.changed() && draft.start > draft.end {
                        draft.end = draft.start;
                    }
                });
                ui.add_space(8.0);
                ui.vertical(|ui| {
                    field_label(ui, "End");
                    let resp = ui.add(egui_extras::DatePickerButton::new(&mut draft.end).id_salt("activity_end"));
                    if resp.changed() && draft.end < draft.start {
                        draft.start = draft.end;
                    }
                });
            });
            ui.label(
                RichText::new(format!("{} day(s)", draft.span_days()))
                    .size(10.0)
                    .color(theme::TEXT_SECONDARY),
            );

            // ── Cost ─────────────────────────────────────────────────────
            field_label(ui, "Cost");
            ui.horizontal(|ui| {
                let mut has_cost = draft.cost.is_some();
                if ui.checkbox(&mut has_cost, "").changed() {
                    draft.cost = has_cost.then_some(0.0);
                }
                if let Some(cost) = draft.cost.as_mut() {
                    ui.add(egui::DragValue::new(cost).speed(10.0).range(0.0..=f64::MAX));
                }
            });

            field_label(ui, "Notes");
            ui.add_sized(
                [ui.available_width(), 60.0],
                egui::TextEdit::multiline(&mut draft.description)
                    .font(egui::FontId::proportional(11.0))
                    .hint_text("Channel, audience, owner..."),
            );

            // ── Color ────────────────────────────────────────────────────
            field_label(ui, "Color");
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
                for color in palette() {
                    let is_current = draft.color == *color;
                    let size = if is_current { 20.0 } else { 16.0 };
                    let (rect, resp) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
                    ui.painter().rect_filled(rect, egui::Rounding::same(3.0), *color);
                    if is_current {
                        ui.painter().rect_stroke(
                            rect.expand(1.0),
                            egui::Rounding::same(4.0),
                            egui::Stroke::new(2.0, Color32::WHITE),
                        );
                    }
                    if resp.clicked() {
                        draft.color = *color;
                    }
                }
            });

            ui.separator();
            show_dependencies(draft, board, ui);
        });

        ui.add_space(6.0);
        if !read_only {
            ui.horizontal(|ui| {
                let save = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add(save).clicked() {
                    action = EditorAction::Save;
                }
                if ui.button(format!("{} Duplicate", icons::COPY)).clicked() {
                    action = EditorAction::Duplicate(activity_id);
                }
                let delete = egui::Button::new(
                    RichText::new(format!("{} Delete", icons::TRASH)).color(theme::DANGER),
                );
                if ui.add(delete).clicked() {
                    action = EditorAction::Delete(activity_id);
                }
            });
        }
    });

    action
}

/// Prerequisite list with remove buttons and an "add" picker.
fn show_dependencies(draft: &mut Activity, board: &Board, ui: &mut Ui) {
    field_label(ui, "Depends on");

    let title_of = |id: Uuid| {
        board
            .activity(id)
            .map(|a| a.title.clone())
            .unwrap_or_else(|| "(missing)".to_string())
    };

    if draft.dependencies.is_empty() {
        ui.label(RichText::new("No prerequisites").size(9.5).color(theme::TEXT_DIM));
    }
    let mut remove = None;
    for dep in &draft.dependencies {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{} {}", icons::ARROW_RIGHT, title_of(*dep)))
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let del = ui.add(egui::Button::new(RichText::new(icons::X).size(9.0).color(theme::TEXT_DIM)).frame(false));
                if del.on_hover_text("Remove dependency").clicked() {
                    remove = Some(*dep);
                }
            });
        });
    }
    if let Some(dep) = remove {
        draft.dependencies.retain(|d| *d != dep);
    }

    let candidates: Vec<&Activity> = board
        .activities
        .iter()
        .filter(|a| a.id != draft.id && !draft.dependencies.contains(&a.id))
        .collect();
    if candidates.is_empty() {
        return;
    }
    egui::ComboBox::from_id_salt("activity_add_dep")
        .selected_text(RichText::new(format!("{} Add prerequisite", icons::PLUS)).size(11.0))
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for candidate in candidates {
                if ui.selectable_label(false, &candidate.title).clicked() {
                    draft.dependencies.push(candidate.id);
                }
            }
        });
}
