use campaign_timeline::settings::Density;
use campaign_timeline::timeline::TimelineScale;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

use crate::app::TimelineApp;
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Board").clicked() {
                app.new_board();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_board();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_board();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_board_as();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.controller.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.controller.zoom_out();
                ui.close_menu();
            }
            if ui.button(format!("  {} Pan Earlier   30 days", icons::ARROW_LEFT)).clicked() {
                app.controller.viewport.scroll_days(-30);
                ui.close_menu();
            }
            if ui.button(format!("  {} Pan Later      30 days", icons::ARROW_RIGHT)).clicked() {
                app.controller.viewport.scroll_days(30);
                ui.close_menu();
            }
            if ui.button("  Fit to Activities").clicked() {
                app.fit_viewport();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Timeline Scale").small().weak());
            for (scale, label) in [
                (TimelineScale::Days, "Days"),
                (TimelineScale::Weeks, "Weeks"),
                (TimelineScale::Months, "Months"),
            ] {
                if ui
                    .radio_value(&mut app.controller.viewport.scale, scale, label)
                    .clicked()
                {
                    ui.close_menu();
                }
            }
            ui.separator();
            ui.label(RichText::new("Density").small().weak());
            for (density, label) in [(Density::Compact, "Compact"), (Density::Detailed, "Detailed")] {
                if ui
                    .radio_value(&mut app.controller.settings.density, density, label)
                    .clicked()
                {
                    ui.close_menu();
                }
            }
            ui.separator();
            let mut read_only = app.controller.settings.read_only;
            if ui
                .checkbox(&mut read_only, format!("{} Read-only", icons::LOCK_SIMPLE))
                .clicked()
            {
                app.set_read_only(read_only);
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned board name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let unsaved = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.board.name, unsaved))
                    .size(11.0)
                    .weak(),
            );
            if app.controller.read_only() {
                ui.label(
                    RichText::new(format!("{} read-only", icons::LOCK_SIMPLE))
                        .size(11.0)
                        .color(theme::TEXT_DIM),
                );
            }
        });
    });
}
