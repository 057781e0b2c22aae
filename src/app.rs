use std::path::PathBuf;

use campaign_timeline::model::{Activity, Applied, Board, Swimlane};
use campaign_timeline::settings::DisplaySettings;
use campaign_timeline::timeline::dependencies::find_cycle;
use campaign_timeline::timeline::{TimelineController, TimelineIntent, TimelineViewport};
use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::ui;
use crate::ui::activity_editor::EditorAction;

/// Main application state.
pub struct TimelineApp {
    pub board: Board,
    pub controller: TimelineController,
    pub file_path: Option<PathBuf>,
    pub selected: Option<Uuid>,

    /// Draft copy of the activity open in the editor panel.
    pub editor: Option<Activity>,
    /// Swimlane being renamed, with the text typed so far.
    pub rename_lane: Option<(Uuid, String)>,
    pub show_about: bool,

    pub status_message: String,

    settings_path: PathBuf,
    saved_settings: DisplaySettings,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings_path = DisplaySettings::default_path();
        let settings = DisplaySettings::load(&settings_path);
        tracing::info!(path = %settings_path.display(), "display settings loaded");

        let board = Self::sample_board();
        let controller = TimelineController::new(&board.swimlanes, Self::viewport_for(&board), settings.clone());

        let app = Self {
            board,
            controller,
            file_path: None,
            selected: None,
            editor: None,
            rename_lane: None,
            show_about: false,
            status_message: "Ready".to_string(),
            settings_path,
            saved_settings: settings,
        };
        app.check_board();
        app
    }

    /// Demonstration board: one quarter of a product launch.
    fn sample_board() -> Board {
        let today = chrono::Local::now().date_naive();
        let day = |offset: i64| today + Duration::days(offset);
        let mut board = Board::new("Spring Launch");

        let email = Swimlane::new("Email");
        let social = Swimlane::new("Social");
        let paid = Swimlane::new("Paid Media").with_budget(12_000.0);
        let events = Swimlane::new("Events").with_budget(8_000.0);

        let brief = Activity::new("Campaign brief", day(-6), day(-2), email.id)
            .with_color(egui::Color32::from_rgb(66, 133, 244));
        let teaser = Activity::new("Teaser newsletter", day(0), day(2), email.id)
            .with_dependency(brief.id);
        let launch_mail = Activity::new("Launch announcement", day(14), day(14), email.id)
            .with_color(egui::Color32::from_rgb(229, 57, 53));
        let nurture = Activity::new("Nurture sequence", day(15), day(35), email.id)
            .with_dependency(launch_mail.id);

        let countdown = Activity::new("Countdown posts", day(4), day(13), social.id)
            .with_color(egui::Color32::from_rgb(171, 71, 188))
            .with_dependency(brief.id);
        let influencers = Activity::new("Influencer takeover", day(8), day(16), social.id)
            .with_color(egui::Color32::from_rgb(0, 188, 212));
        let ugc = Activity::new("UGC contest", day(17), day(30), social.id)
            .with_color(egui::Color32::from_rgb(171, 71, 188));

        let search = Activity::new("Search ads", day(10), day(40), paid.id)
            .with_color(egui::Color32::from_rgb(251, 140, 0))
            .with_cost(6_500.0);
        let display = Activity::new("Display retargeting", day(14), day(28), paid.id)
            .with_color(egui::Color32::from_rgb(255, 193, 7))
            .with_cost(4_200.0)
            .with_dependency(launch_mail.id);

        let webinar = Activity::new("Launch webinar", day(14), day(14), events.id)
            .with_color(egui::Color32::from_rgb(52, 168, 83))
            .with_cost(2_500.0);
        let expo = Activity::new("Trade expo", day(24), day(26), events.id)
            .with_color(egui::Color32::from_rgb(52, 168, 83))
            .with_cost(7_000.0)
            .with_dependency(webinar.id);

        board.swimlanes = vec![email, social, paid, events];
        board.activities = vec![
            brief,
            teaser,
            launch_mail,
            nurture,
            countdown,
            influencers,
            ugc,
            search,
            display,
            webinar,
            expo,
        ];
        board
    }

    fn viewport_for(board: &Board) -> TimelineViewport {
        let today = chrono::Local::now().date_naive();
        let mut viewport = TimelineViewport::new(today, today + Duration::days(60));
        if let Some((first, last)) = board.date_bounds() {
            viewport.fit(first, last);
        }
        viewport
    }

    /// Log data problems the timeline tolerates but the user should know about.
    fn check_board(&self) {
        let orphans = self
            .board
            .activities
            .iter()
            .filter(|a| self.board.swimlane(a.swimlane_id).is_none())
            .count();
        if orphans > 0 {
            tracing::warn!(orphans, "activities reference missing swimlanes and are hidden");
        }
        if let Some(cycle) = find_cycle(&self.board.activities) {
            tracing::warn!(length = cycle.len(), "dependency cycle between activities");
        }
    }

    // --- File operations ---

    fn replace_board(&mut self, board: Board, path: Option<PathBuf>) {
        let viewport = Self::viewport_for(&board);
        self.controller = TimelineController::new(&board.swimlanes, viewport, self.controller.settings.clone());
        self.board = board;
        self.file_path = path;
        self.selected = None;
        self.editor = None;
        self.rename_lane = None;
        self.check_board();
    }

    pub fn new_board(&mut self) {
        let mut board = Board::new("Untitled Board");
        board.swimlanes = vec![Swimlane::new("Swimlane 1")];
        self.replace_board(board, None);
        self.status_message = "New board created".to_string();
    }

    pub fn open_board(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Campaign Timeline", &["timeline.json", "json"])
            .pick_file()
        {
            match campaign_timeline::io::load_board(&path) {
                Ok(board) => {
                    self.replace_board(board, Some(path));
                    self.status_message = "Board loaded".to_string();
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to open board");
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_board(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.write_board(path);
        } else {
            self.save_board_as();
        }
    }

    pub fn save_board_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Campaign Timeline", &["timeline.json", "json"])
            .set_file_name(format!("{}.timeline.json", self.board.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.write_board(path);
        }
    }

    fn write_board(&mut self, path: PathBuf) {
        self.board.touch();
        match campaign_timeline::io::save_board(&self.board, &path) {
            Ok(()) => self.status_message = "Board saved".to_string(),
            Err(e) => {
                tracing::error!(error = %e, "failed to save board");
                self.status_message = format!("Error saving: {}", e);
            }
        }
    }

    // --- View ---

    pub fn fit_viewport(&mut self) {
        if let Some((first, last)) = self.board.date_bounds() {
            self.controller.viewport.fit(first, last);
        }
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.controller.settings.read_only = read_only;
        self.status_message = if read_only { "Read-only" } else { "Editing enabled" }.to_string();
    }

    // --- Intents ---

    /// Gate an intent raised outside the chart, then apply it.
    pub fn apply_intent(&mut self, intent: TimelineIntent) {
        if let Some(intent) = self.controller.request(intent) {
            self.commit(intent);
        }
    }

    /// Apply an intent that has already passed the controller.
    fn commit(&mut self, intent: TimelineIntent) {
        let label = intent.label();
        let touches_dependencies = matches!(intent, TimelineIntent::Update(_));
        match self.board.apply(intent) {
            Ok(Applied::Created(id)) => {
                if let Some(activity) = self.board.activity(id) {
                    self.status_message = format!("Added '{}'", activity.title);
                    self.open_editor(id);
                } else {
                    self.status_message = "Swimlane added".to_string();
                }
            }
            Ok(Applied::Show(id)) => self.open_editor(id),
            Ok(Applied::Changed) => {
                self.status_message = format!("Timeline updated ({label})");
                self.refresh_editor();
                if touches_dependencies {
                    self.check_board();
                }
            }
            Err(e) => {
                tracing::warn!(intent = label, error = %e, "intent rejected");
                self.status_message = format!("Could not apply change: {}", e);
            }
        }
    }

    fn open_editor(&mut self, id: Uuid) {
        self.selected = Some(id);
        self.editor = self.board.activity(id).cloned();
    }

    /// Re-read the edited activity after the board changed underneath it.
    fn refresh_editor(&mut self) {
        let Some(id) = self.editor.as_ref().map(|a| a.id) else {
            return;
        };
        match self.board.activity(id) {
            Some(activity) => self.editor = Some(activity.clone()),
            None => {
                self.editor = None;
                self.selected = None;
            }
        }
    }

    fn confirm_delete_lane(&mut self, swimlane_id: Uuid) {
        let Some(lane) = self.board.swimlane(swimlane_id) else {
            return;
        };
        let count = self
            .board
            .activities
            .iter()
            .filter(|a| a.swimlane_id == swimlane_id)
            .count();
        if count > 0 {
            let confirm = rfd::MessageDialog::new()
                .set_title("Delete Swimlane")
                .set_description(format!(
                    "Delete '{}' and its {} activit{}?",
                    lane.name,
                    count,
                    if count == 1 { "y" } else { "ies" }
                ))
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }
        self.apply_intent(TimelineIntent::DeleteSwimlane(swimlane_id));
    }

    fn handle_editor_action(&mut self, action: EditorAction) {
        match action {
            EditorAction::Save => {
                if let Some(draft) = self.editor.clone() {
                    self.apply_intent(TimelineIntent::Update(draft));
                }
            }
            EditorAction::Duplicate(id) => self.apply_intent(TimelineIntent::Duplicate(id)),
            EditorAction::Delete(id) => self.apply_intent(TimelineIntent::DeleteActivity(id)),
            EditorAction::Close => {
                self.editor = None;
                self.selected = None;
            }
            EditorAction::None => {}
        }
    }

    fn persist_settings(&mut self) {
        if self.controller.settings == self.saved_settings {
            return;
        }
        if let Err(e) = self.controller.settings.save(&self.settings_path) {
            tracing::warn!(path = %self.settings_path.display(), error = %e, "could not save display settings");
        }
        self.saved_settings = self.controller.settings.clone();
    }
}

fn format_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_board();
        }

        self.controller.sync(&self.board.swimlanes);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let viewport = &self.controller.viewport;
                        ui.label(
                            egui::RichText::new(format!(
                                "{} → {}  ·  {:.0} px/day  ·  Activities: {}  ·  Lanes: {}",
                                format_day(viewport.start),
                                format_day(viewport.end),
                                viewport.pixels_per_day(),
                                self.board.activities.len(),
                                self.board.swimlanes.len(),
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        if self.controller.machine().is_active() {
                            ui.label(
                                egui::RichText::new(self.controller.machine().state().name())
                                    .size(10.5)
                                    .color(ui::theme::ACCENT),
                            );
                        }
                    });
                });
            });

        // Left panel: activity editor
        let mut editor_action = EditorAction::None;
        if self.editor.is_some() {
            let read_only = self.controller.read_only();
            egui::SidePanel::left("activity_editor")
                .default_width(280.0)
                .min_width(220.0)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(8.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        if let Some(draft) = self.editor.as_mut() {
                            editor_action = ui::activity_editor::show_activity_editor(draft, &self.board, read_only, ui);
                        }
                    });
                });
        }
        self.handle_editor_action(editor_action);

        // Central panel: timeline
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let chart = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::timeline_chart::show_timeline(&self.board, &mut self.controller, self.selected, ui)
            })
            .inner;

        for intent in chart.intents {
            self.commit(intent);
        }
        if let Some(id) = chart.rename_lane {
            if let Some(lane) = self.board.swimlane(id) {
                self.rename_lane = Some((id, lane.name.clone()));
            }
        }
        if let Some(id) = chart.delete_lane {
            self.confirm_delete_lane(id);
        }

        // Dialogs
        if self.rename_lane.is_some() {
            ui::dialogs::show_rename_lane_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }

        self.persist_settings();
    }
}
