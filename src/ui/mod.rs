pub mod activity_editor;
pub mod dialogs;
pub mod sidebar;
pub mod theme;
pub mod timeline_chart;
pub mod toolbar;
