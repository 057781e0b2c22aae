pub mod activity;
pub mod board;
pub mod swimlane;

pub use activity::Activity;
pub use board::{Applied, Board};
pub use swimlane::{BudgetUsage, Swimlane};

use egui::Color32;

// ── Activity color palette ───────────────────────────────────────────────────

pub const ACTIVITY_COLORS: &[Color32] = &[
    Color32::from_rgb(66, 133, 244),  // Blue
    Color32::from_rgb(52, 168, 83),   // Green
    Color32::from_rgb(171, 71, 188),  // Purple
    Color32::from_rgb(251, 140, 0),   // Orange
    Color32::from_rgb(3, 169, 244),   // Light blue
    Color32::from_rgb(229, 57, 53),   // Red
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 193, 7),   // Amber
];

/// Palette used to auto-assign colors to new activities.
pub fn palette() -> &'static [Color32] {
    ACTIVITY_COLORS
}
