use std::collections::HashMap;

use campaign_timeline::model::{Activity, Board};
use campaign_timeline::settings::Density;
use campaign_timeline::timeline::dependencies::dependency_arrows;
use campaign_timeline::timeline::{
    BarZone, Hit, Interaction, PointerEvent, TimelineController, TimelineIntent, TimelineLayout,
    TimelineScale, TimelineViewport,
};
use chrono::{Datelike, NaiveDate};
use egui::epaint::CubicBezierShape;
use egui::{Color32, CursorIcon, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::ui::sidebar::{self, SidebarPress};
use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;

/// What the user did on the timeline this frame.
#[derive(Debug, Default)]
pub struct ChartInteraction {
    /// Intents that passed the read-only gate, in the order they happened.
    pub intents: Vec<TimelineIntent>,
    /// The user asked to rename this swimlane.
    pub rename_lane: Option<Uuid>,
    /// The user asked to delete this swimlane; the host confirms first.
    pub delete_lane: Option<Uuid>,
}

/// Screen placement of the lane area for this frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Top-left of the lane area (right of the sidebar, below the header).
    lanes: Pos2,
    /// Left edge of the sticky sidebar.
    sidebar_left: f32,
    sidebar_width: f32,
    /// Top edge of the sticky header.
    header_top: f32,
}

impl Frame {
    fn to_lane(&self, p: Pos2) -> Pos2 {
        Pos2::new(p.x - self.lanes.x, p.y - self.lanes.y)
    }

    fn to_screen(&self, rect: Rect) -> Rect {
        rect.translate(self.lanes.to_vec2())
    }

    fn in_sidebar(&self, p: Pos2) -> bool {
        p.x < self.sidebar_left + self.sidebar_width
    }

    fn in_header(&self, p: Pos2) -> bool {
        p.y < self.header_top + HEADER_HEIGHT
    }
}

/// Render the swimlane timeline and feed pointer input to the controller.
pub fn show_timeline(
    board: &Board,
    controller: &mut TimelineController,
    selected: Option<Uuid>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();

    // Ctrl+scroll / pinch steps through the zoom ladder.
    if ui.rect_contains_pointer(ui.max_rect()) {
        let zoom = ui.input(|i| i.zoom_delta());
        if zoom > 1.0 {
            controller.zoom_in();
        } else if zoom < 1.0 {
            controller.zoom_out();
        }
    }

    let available = ui.available_size();
    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let input_layout = controller.layout(&board.activities);
            let sidebar_width = controller.settings.sidebar_width;
            let content = Vec2::new(
                sidebar_width + controller.viewport.total_width(),
                HEADER_HEIGHT + input_layout.total_height() + sidebar::ADD_BUTTON_SPACE,
            );
            let (response, painter) =
                ui.allocate_painter(content.max(available), Sense::click_and_drag());
            let origin = response.rect.min;
            let clip = ui.clip_rect();
            let frame = Frame {
                lanes: Pos2::new(origin.x + sidebar_width, origin.y + HEADER_HEIGHT),
                sidebar_left: clip.left().max(origin.x),
                sidebar_width,
                header_top: clip.top().max(origin.y),
            };

            route_pointer(
                ui,
                &response,
                board,
                controller,
                &input_layout,
                frame,
                &mut interaction,
            );

            let layout = controller.layout(&board.activities);
            let by_id: HashMap<Uuid, &Activity> =
                board.activities.iter().map(|a| (a.id, a)).collect();
            let lanes_bottom = frame.lanes.y + layout.total_height();

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_lane_backgrounds(&painter, &layout, frame, response.rect.right());
            draw_grid(&painter, frame, &controller.viewport, lanes_bottom);
            draw_today_line(&painter, frame, &controller.viewport, lanes_bottom);
            draw_dependency_arrows(&painter, &board.activities, &layout, frame);

            let hovered_bar = hovered_bar(ui, &layout, frame, controller);
            let machine = controller.machine();
            let read_only = controller.read_only();
            let density = controller.settings.density;

            for bar in &layout.bars {
                let Some(activity) = by_id.get(&bar.activity_id) else {
                    continue;
                };
                let offset = machine.drag_offset(bar.activity_id).unwrap_or(Vec2::ZERO);
                let rect = frame.to_screen(bar.rect).translate(offset);
                let is_selected = selected == Some(bar.activity_id);
                draw_bar(&painter, rect, activity, density, is_selected, false);
                let show_handles = !read_only
                    && (is_selected || hovered_bar == Some(bar.activity_id))
                    && machine.state().bar_gesture().is_none();
                if show_handles {
                    draw_handles(&painter, rect);
                }
            }

            if let Some(gesture) = machine.state().bar_gesture() {
                if gesture.changed() {
                    if let Some(rect) = layout.ghost_rect(&gesture.ghost, gesture.row) {
                        draw_bar(&painter, frame.to_screen(rect), &gesture.ghost, density, false, true);
                    }
                }
            }

            draw_header(&painter, frame, &controller.viewport, response.rect.right());
            sidebar::draw_sidebar(
                &painter,
                board,
                &layout,
                frame.lanes.y,
                frame.sidebar_left,
                sidebar_width,
                frame.header_top,
                read_only,
            );
            draw_reorder_indicator(&painter, &layout, frame, machine.state(), response.rect.right());

            if machine.is_active() {
                ui.ctx().set_cursor_icon(active_cursor(machine.state()));
            } else if let Some(id) = hovered_bar {
                if let Some(activity) = by_id.get(&id) {
                    show_bar_tooltip(ui, board, activity);
                }
            }
        });

    interaction
}

/// Turn this frame's raw pointer state into machine events.
///
/// Move and release are only routed while a gesture is live; they are then
/// taken from anywhere on screen, so a release outside the canvas still ends
/// the gesture.
fn route_pointer(
    ui: &Ui,
    response: &egui::Response,
    board: &Board,
    controller: &mut TimelineController,
    layout: &TimelineLayout,
    frame: Frame,
    interaction: &mut ChartInteraction,
) {
    let (latest, pressed, released, double, time, escape) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.button_double_clicked(egui::PointerButton::Primary),
            i.time,
            i.key_pressed(egui::Key::Escape),
        )
    });

    let send = |controller: &mut TimelineController, event: PointerEvent, out: &mut ChartInteraction| {
        if let Some(intent) = controller.handle(event, &board.activities, layout) {
            out.intents.push(intent);
        }
    };

    if controller.machine().is_active() {
        if escape {
            send(controller, PointerEvent::Cancel, interaction);
        } else if let Some(p) = latest {
            let pos = frame.to_lane(p);
            if released {
                send(controller, PointerEvent::Up { pos, time }, interaction);
                // The second click of a double click ends its own press gesture first.
                if double && !frame.in_sidebar(p) {
                    send(controller, PointerEvent::DoubleClick { pos, time }, interaction);
                }
            } else {
                send(controller, PointerEvent::Move { pos }, interaction);
            }
        } else if released {
            send(controller, PointerEvent::Cancel, interaction);
        }
        return;
    }

    let Some(p) = latest else {
        return;
    };
    if !response.hovered() || frame.in_header(p) {
        return;
    }

    if frame.in_sidebar(p) {
        if !pressed {
            return;
        }
        let local = Pos2::new(p.x - frame.sidebar_left, p.y - frame.lanes.y);
        match sidebar::hit_test(local, layout, frame.sidebar_width) {
            SidebarPress::Label(swimlane_id) => {
                send(controller, PointerEvent::LaneDragStart { swimlane_id }, interaction);
            }
            SidebarPress::Rename(swimlane_id) => {
                if !controller.read_only() {
                    interaction.rename_lane = Some(swimlane_id);
                }
            }
            SidebarPress::Delete(swimlane_id) => {
                if !controller.read_only() {
                    interaction.delete_lane = Some(swimlane_id);
                }
            }
            SidebarPress::Add => {
                let name = format!("Swimlane {}", board.swimlanes.len() + 1);
                if let Some(intent) = controller.request(TimelineIntent::AddSwimlane { name }) {
                    interaction.intents.push(intent);
                }
            }
            SidebarPress::Nothing => {}
        }
        return;
    }

    let pos = frame.to_lane(p);
    if double {
        send(controller, PointerEvent::DoubleClick { pos, time }, interaction);
    } else if pressed {
        send(controller, PointerEvent::Down { pos, time }, interaction);
        // Press and release can land in the same frame.
        if released && controller.machine().is_active() {
            send(controller, PointerEvent::Up { pos, time }, interaction);
        }
    }
}

fn hovered_bar(ui: &Ui, layout: &TimelineLayout, frame: Frame, controller: &TimelineController) -> Option<Uuid> {
    let p = ui.input(|i| i.pointer.hover_pos())?;
    if frame.in_sidebar(p) || frame.in_header(p) || controller.machine().is_active() {
        return None;
    }
    match layout.hit_test(frame.to_lane(p)) {
        Hit::Bar { activity_id, zone } => {
            let icon = match zone {
                _ if controller.read_only() => CursorIcon::PointingHand,
                BarZone::Body => CursorIcon::Grab,
                BarZone::StartEdge | BarZone::EndEdge => CursorIcon::ResizeHorizontal,
            };
            ui.ctx().set_cursor_icon(icon);
            Some(activity_id)
        }
        Hit::LaneResizeHandle { .. } if !controller.read_only() => {
            ui.ctx().set_cursor_icon(CursorIcon::ResizeVertical);
            None
        }
        _ => None,
    }
}

fn active_cursor(state: &Interaction) -> CursorIcon {
    match state {
        Interaction::DraggingBar(_) | Interaction::ReorderingSwimlane { .. } => CursorIcon::Grabbing,
        Interaction::ResizingStart(_) | Interaction::ResizingEnd(_) => CursorIcon::ResizeHorizontal,
        Interaction::ResizingSwimlaneHeight { .. } => CursorIcon::ResizeVertical,
        Interaction::Idle | Interaction::PressingEmpty { .. } => CursorIcon::Default,
    }
}

fn draw_lane_backgrounds(painter: &egui::Painter, layout: &TimelineLayout, frame: Frame, right: f32) {
    for (i, band) in layout.bands.iter().enumerate() {
        let rect = Rect::from_min_max(
            Pos2::new(frame.lanes.x, frame.lanes.y + band.top),
            Pos2::new(right, frame.lanes.y + band.bottom()),
        );
        let fill = if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_LANE_ALT };
        painter.rect_filled(rect, 0.0, fill);
        painter.line_segment(
            [rect.left_bottom(), rect.right_bottom()],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );
    }
}

/// Vertical grid lines at each header tick.
fn draw_grid(painter: &egui::Painter, frame: Frame, viewport: &TimelineViewport, bottom: f32) {
    for date in header_ticks(viewport) {
        let x = frame.lanes.x + viewport.date_to_x(date);
        painter.line_segment(
            [Pos2::new(x, frame.lanes.y), Pos2::new(x, bottom)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

fn header_ticks(viewport: &TimelineViewport) -> Vec<NaiveDate> {
    let mut ticks = Vec::new();
    let mut date = viewport.start;
    match viewport.scale {
        TimelineScale::Days => {
            while date <= viewport.end {
                ticks.push(date);
                date += chrono::Duration::days(1);
            }
        }
        TimelineScale::Weeks => {
            let weekday = date.weekday().num_days_from_monday();
            date -= chrono::Duration::days(weekday as i64);
            while date <= viewport.end {
                ticks.push(date);
                date += chrono::Duration::days(7);
            }
        }
        TimelineScale::Months => {
            date = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
            while date <= viewport.end {
                ticks.push(date);
                let (y, m) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                date = NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(date + chrono::Duration::days(31));
            }
        }
    }
    ticks
}

fn draw_header(painter: &egui::Painter, frame: Frame, viewport: &TimelineViewport, right: f32) {
    let top = frame.header_top;
    let rect = Rect::from_min_max(Pos2::new(frame.lanes.x, top), Pos2::new(right, top + HEADER_HEIGHT));
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let header = painter.with_clip_rect(rect);
    for date in header_ticks(viewport) {
        let x = frame.lanes.x + viewport.date_to_x(date);
        match viewport.scale {
            TimelineScale::Days => {
                if viewport.pixels_per_day() >= 18.0 {
                    let is_weekend = date.weekday().num_days_from_monday() >= 5;
                    let color = if is_weekend { theme::TEXT_DIM } else { theme::TEXT_SECONDARY };
                    header.text(
                        Pos2::new(x + 3.0, top + 30.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%d").to_string(),
                        theme::font_sub(),
                        color,
                    );
                }
                if date.day() == 1 {
                    header.text(
                        Pos2::new(x + 3.0, top + 13.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%b %Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }
            }
            TimelineScale::Weeks => {
                header.text(
                    Pos2::new(x + 3.0, top + 30.0),
                    egui::Align2::LEFT_CENTER,
                    date.format("W%V").to_string(),
                    theme::font_sub(),
                    theme::TEXT_SECONDARY,
                );
                if date.day() <= 7 {
                    header.text(
                        Pos2::new(x + 3.0, top + 13.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%b %Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }
            }
            TimelineScale::Months => {
                header.text(
                    Pos2::new(x + 5.0, top + 22.0),
                    egui::Align2::LEFT_CENTER,
                    date.format("%b %Y").to_string(),
                    theme::font_header(),
                    theme::TEXT_PRIMARY,
                );
            }
        }
    }
}

fn draw_today_line(painter: &egui::Painter, frame: Frame, viewport: &TimelineViewport, bottom: f32) {
    let today = chrono::Local::now().date_naive();
    if today < viewport.start || today > viewport.end {
        return;
    }
    let x = frame.lanes.x + viewport.date_to_x(today) + viewport.pixels_per_day() / 2.0;
    painter.line_segment(
        [Pos2::new(x, frame.lanes.y), Pos2::new(x, bottom)],
        Stroke::new(1.5, theme::TODAY_LINE),
    );
}

fn draw_dependency_arrows(painter: &egui::Painter, activities: &[Activity], layout: &TimelineLayout, frame: Frame) {
    let shift = frame.lanes.to_vec2();
    let stroke = Stroke::new(1.2, theme::ARROW_COLOR);
    for arrow in dependency_arrows(activities, layout) {
        let points = arrow.curve.map(|p| p + shift);
        painter.add(CubicBezierShape::from_points_stroke(
            points,
            false,
            Color32::TRANSPARENT,
            stroke,
        ));
        painter.add(egui::Shape::convex_polygon(
            arrow.head.iter().map(|p| *p + shift).collect(),
            theme::ARROW_COLOR,
            Stroke::NONE,
        ));
    }
}

fn draw_bar(
    painter: &egui::Painter,
    bar_rect: Rect,
    activity: &Activity,
    density: Density,
    is_selected: bool,
    ghost: bool,
) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let opacity = if ghost { theme::GHOST_OPACITY } else { 1.0 };

    if !ghost {
        // Soft shadow
        painter.rect_filled(
            bar_rect.translate(Vec2::new(1.0, 2.0)),
            rounding,
            Color32::from_black_alpha(35),
        );
    }

    painter.rect_filled(bar_rect, rounding, activity.color.gamma_multiply(opacity));
    if ghost {
        painter.rect_stroke(bar_rect, rounding, Stroke::new(1.0, theme::HANDLE_COLOR.gamma_multiply(0.6)));
    } else {
        // Lighter top highlight
        let highlight = Rect::from_min_size(
            bar_rect.min,
            Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
        );
        painter.rect_filled(
            highlight,
            Rounding {
                nw: theme::BAR_ROUNDING,
                ne: theme::BAR_ROUNDING,
                sw: 0.0,
                se: 0.0,
            },
            Color32::from_white_alpha(25),
        );
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if bar_rect.width() > 30.0 {
        let clipped = painter.with_clip_rect(bar_rect.shrink(2.0));
        let text_color = theme::TEXT_ON_BAR.gamma_multiply(opacity);
        if density.shows_dates() && bar_rect.height() >= 32.0 {
            clipped.text(
                Pos2::new(bar_rect.left() + 6.0, bar_rect.top() + bar_rect.height() * 0.32),
                egui::Align2::LEFT_CENTER,
                &activity.title,
                theme::font_bar(),
                text_color,
            );
            clipped.text(
                Pos2::new(bar_rect.left() + 6.0, bar_rect.top() + bar_rect.height() * 0.72),
                egui::Align2::LEFT_CENTER,
                format!(
                    "{} → {}",
                    activity.start.format("%d %b"),
                    activity.end.format("%d %b")
                ),
                theme::font_small(),
                text_color.gamma_multiply(0.8),
            );
        } else {
            clipped.text(
                Pos2::new(bar_rect.left() + 6.0, bar_rect.center().y),
                egui::Align2::LEFT_CENTER,
                &activity.title,
                theme::font_bar(),
                text_color,
            );
        }
    }
}

/// Rounded pill handles on both ends of a bar.
fn draw_handles(painter: &egui::Painter, bar_rect: Rect) {
    let handle_h = bar_rect.height() * 0.55;
    let handle_y = bar_rect.center().y - handle_h / 2.0;
    let left = Rect::from_min_size(Pos2::new(bar_rect.left() - 1.5, handle_y), Vec2::new(4.0, handle_h));
    let right = Rect::from_min_size(Pos2::new(bar_rect.right() - 2.5, handle_y), Vec2::new(4.0, handle_h));
    painter.rect_filled(left, Rounding::same(2.0), theme::HANDLE_COLOR);
    painter.rect_filled(right, Rounding::same(2.0), theme::HANDLE_COLOR);
}

fn draw_reorder_indicator(
    painter: &egui::Painter,
    layout: &TimelineLayout,
    frame: Frame,
    state: &Interaction,
    right: f32,
) {
    let Interaction::ReorderingSwimlane {
        source_index,
        hover_index,
        ..
    } = *state
    else {
        return;
    };
    if source_index == hover_index {
        return;
    }
    let Some(band) = layout.bands.get(hover_index) else {
        return;
    };
    let y = frame.lanes.y + if hover_index < source_index { band.top } else { band.bottom() };
    painter.line_segment(
        [Pos2::new(frame.sidebar_left, y), Pos2::new(right, y)],
        Stroke::new(2.0, theme::ACCENT),
    );
}

fn show_bar_tooltip(ui: &Ui, board: &Board, activity: &Activity) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        egui::Id::new(("activity-tip", activity.id)),
        |ui| {
            ui.strong(&activity.title);
            ui.label(format!(
                "{} → {}",
                activity.start.format("%d/%m/%Y"),
                activity.end.format("%d/%m/%Y"),
            ));
            if let Some(lane) = board.swimlane(activity.swimlane_id) {
                ui.label(&lane.name);
            }
            if let Some(cost) = activity.cost {
                ui.label(format!("Cost: {cost:.2}"));
            }
        },
    );
}
