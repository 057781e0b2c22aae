//! Pointer-driven interaction state machine.
//!
//! One gesture is live at a time. A gesture starts from [`Interaction::Idle`]
//! on pointer-down, recomputes a private "ghost" on every move and is
//! consumed on release: committed as a [`TimelineIntent`] when the ghost
//! differs from where it started, discarded otherwise. Presses that arrive
//! while a gesture is live are ignored.
//!
//! A press on empty lane space is held until release and only becomes a
//! quick-create if the pointer stayed put. The press that completes a
//! double-click on that spot is swallowed, so a double-click creates once.

use chrono::NaiveDate;
use egui::{Pos2, Vec2};
use uuid::Uuid;

use super::coords::{pixels_to_day_delta, shift_date, y_to_swimlane_index};
use super::intent::TimelineIntent;
use super::lanes::move_index;
use super::layout::{BarZone, Hit, TimelineLayout};
use crate::model::Activity;
use crate::settings::MIN_SWIMLANE_HEIGHT;

/// Seconds after a drag-with-movement during which double-clicks are ignored.
pub const DOUBLE_CLICK_COOLDOWN: f64 = 0.3;
/// Pointer travel, in pixels, below which a press-release counts as a click.
pub const CLICK_SLOP: f32 = 3.0;
/// Length of an activity made by clicking empty lane space, in days.
pub const QUICK_CREATE_DAYS: i64 = 7;
/// Seconds after a quick-create during which a second press on the same spot
/// belongs to the same double-click.
pub const DOUBLE_CLICK_WINDOW: f64 = 0.3;
/// How far, in pixels, the second click of a double-click may land.
pub const DOUBLE_CLICK_RADIUS: f32 = 6.0;

/// Raw input fed to the machine, in lane-area coordinates.
///
/// `time` is seconds on any monotonic clock; only differences matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { pos: Pos2, time: f64 },
    Move { pos: Pos2 },
    Up { pos: Pos2, time: f64 },
    DoubleClick { pos: Pos2, time: f64 },
    /// Drag started on a swimlane label in the sidebar.
    LaneDragStart { swimlane_id: Uuid },
    /// Abort whatever is live without emitting anything (Escape).
    Cancel,
}

/// An in-progress move or resize of one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGesture {
    /// The activity as it was on pointer-down, range normalized.
    pub original: Activity,
    /// Provisional result. Never aliases the snapshot.
    pub ghost: Activity,
    pub origin: Pos2,
    pub pointer: Pos2,
    /// Row the bar occupied when the gesture began.
    pub row: usize,
}

impl BarGesture {
    fn new(activity: &Activity, origin: Pos2, row: usize) -> Self {
        let original = activity.normalized();
        Self {
            ghost: original.clone(),
            original,
            origin,
            pointer: origin,
            row,
        }
    }

    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer - self.origin
    }

    pub fn day_delta(&self, pixels_per_day: f32) -> i64 {
        pixels_to_day_delta(self.pointer_delta().x, pixels_per_day)
    }

    /// Whether the ghost's start, end or swimlane differ from the original.
    pub fn changed(&self) -> bool {
        self.ghost.placement_differs(&self.original)
    }

    fn moved(&self) -> bool {
        self.pointer_delta().length() > CLICK_SLOP
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    DraggingBar(BarGesture),
    ResizingStart(BarGesture),
    ResizingEnd(BarGesture),
    ResizingSwimlaneHeight {
        swimlane_id: Uuid,
        origin_y: f32,
        original_height: f32,
        height: f32,
    },
    ReorderingSwimlane {
        swimlane_id: Uuid,
        source_index: usize,
        hover_index: usize,
    },
    /// Press on empty lane space, waiting to see if it is a click.
    PressingEmpty {
        swimlane_id: Uuid,
        date: NaiveDate,
        origin: Pos2,
        pointer: Pos2,
    },
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::DraggingBar(_) => "dragging-bar",
            Self::ResizingStart(_) => "resizing-start",
            Self::ResizingEnd(_) => "resizing-end",
            Self::ResizingSwimlaneHeight { .. } => "resizing-swimlane-height",
            Self::ReorderingSwimlane { .. } => "reordering-swimlane",
            Self::PressingEmpty { .. } => "pressing-empty",
        }
    }

    pub fn bar_gesture(&self) -> Option<&BarGesture> {
        match self {
            Self::DraggingBar(g) | Self::ResizingStart(g) | Self::ResizingEnd(g) => Some(g),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionMachine {
    state: Interaction,
    last_drag_end: Option<f64>,
    /// Time and place of the last quick-create.
    last_quick_create: Option<(f64, Pos2)>,
}

impl InteractionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Interaction {
        &self.state
    }

    /// True while a gesture holds the pointer. Move and release input only
    /// needs routing here while this is set.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, Interaction::Idle)
    }

    /// The provisional activity of a live bar gesture.
    pub fn ghost(&self) -> Option<&Activity> {
        self.state.bar_gesture().map(|g| &g.ghost)
    }

    /// Raw pointer offset for the bar being dragged, so the original bar can
    /// track the pointer while the ghost shows the snapped result.
    pub fn drag_offset(&self, activity_id: Uuid) -> Option<Vec2> {
        match &self.state {
            Interaction::DraggingBar(g) if g.original.id == activity_id => Some(g.pointer_delta()),
            _ => None,
        }
    }

    /// Provisional height of the lane being resized.
    pub fn lane_height_preview(&self) -> Option<(Uuid, f32)> {
        match self.state {
            Interaction::ResizingSwimlaneHeight {
                swimlane_id,
                height,
                ..
            } => Some((swimlane_id, height)),
            _ => None,
        }
    }

    /// Source and hovered index of a live lane reorder.
    pub fn reorder_preview(&self) -> Option<(usize, usize)> {
        match self.state {
            Interaction::ReorderingSwimlane {
                source_index,
                hover_index,
                ..
            } => Some((source_index, hover_index)),
            _ => None,
        }
    }

    /// Feed one input event. Returns the intent it produced, if any.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        activities: &[Activity],
        layout: &TimelineLayout,
        read_only: bool,
    ) -> Option<TimelineIntent> {
        match event {
            PointerEvent::Down { pos, time } => self.pointer_down(pos, time, activities, layout, read_only),
            PointerEvent::Move { pos } => {
                self.pointer_move(pos, layout);
                None
            }
            PointerEvent::Up { pos, time } => {
                self.pointer_move(pos, layout);
                self.pointer_up(time, layout)
            }
            PointerEvent::DoubleClick { pos, time } => self.double_click(pos, time, layout, read_only),
            PointerEvent::LaneDragStart { swimlane_id } => {
                self.lane_drag_start(swimlane_id, layout, read_only);
                None
            }
            PointerEvent::Cancel => {
                if self.is_active() {
                    tracing::debug!(gesture = self.state.name(), "gesture cancelled");
                }
                self.state = Interaction::Idle;
                None
            }
        }
    }

    /// Whether a press at `pos` is the second half of a double-click whose
    /// first click already made an activity.
    fn completes_quick_create(&self, pos: Pos2, time: f64) -> bool {
        self.last_quick_create.is_some_and(|(at, origin)| {
            time - at < DOUBLE_CLICK_WINDOW && pos.distance(origin) <= DOUBLE_CLICK_RADIUS
        })
    }

    fn pointer_down(
        &mut self,
        pos: Pos2,
        time: f64,
        activities: &[Activity],
        layout: &TimelineLayout,
        read_only: bool,
    ) -> Option<TimelineIntent> {
        if self.is_active() {
            return None;
        }
        if self.completes_quick_create(pos, time) {
            tracing::debug!("second press of a quick-create double-click ignored");
            return None;
        }
        match layout.hit_test(pos) {
            Hit::Bar { activity_id, zone } => {
                let activity = activities.iter().find(|a| a.id == activity_id)?;
                if read_only {
                    return Some(TimelineIntent::Edit(activity.clone()));
                }
                let row = layout.bar(activity_id).map(|b| b.row).unwrap_or(0);
                let gesture = BarGesture::new(activity, pos, row);
                self.state = match zone {
                    BarZone::Body => Interaction::DraggingBar(gesture),
                    BarZone::StartEdge => Interaction::ResizingStart(gesture),
                    BarZone::EndEdge => Interaction::ResizingEnd(gesture),
                };
                tracing::debug!(gesture = self.state.name(), %activity_id, "gesture started");
                None
            }
            Hit::LaneResizeHandle { swimlane_id } => {
                if read_only {
                    return None;
                }
                let height = layout.band(swimlane_id)?.height;
                self.state = Interaction::ResizingSwimlaneHeight {
                    swimlane_id,
                    origin_y: pos.y,
                    original_height: height,
                    height,
                };
                tracing::debug!(gesture = self.state.name(), %swimlane_id, "gesture started");
                None
            }
            Hit::EmptyLane { swimlane_id, date } => {
                if read_only {
                    return None;
                }
                self.state = Interaction::PressingEmpty {
                    swimlane_id,
                    date,
                    origin: pos,
                    pointer: pos,
                };
                None
            }
            Hit::Nothing => None,
        }
    }

    fn pointer_move(&mut self, pos: Pos2, layout: &TimelineLayout) {
        let ppd = layout.pixels_per_day;
        match &mut self.state {
            Interaction::Idle => {}
            Interaction::DraggingBar(g) => {
                g.pointer = pos;
                let days = g.day_delta(ppd);
                g.ghost.start = shift_date(g.original.start, days);
                g.ghost.end = shift_date(g.original.end, days);
                g.ghost.swimlane_id = layout.swimlane_at(pos.y).unwrap_or(g.original.swimlane_id);
                tracing::trace!(days, swimlane = %g.ghost.swimlane_id, "drag ghost");
            }
            Interaction::ResizingStart(g) => {
                g.pointer = pos;
                let days = g.day_delta(ppd);
                g.ghost.start = shift_date(g.original.start, days).min(g.original.end);
                tracing::trace!(days, start = %g.ghost.start, "resize-start ghost");
            }
            Interaction::ResizingEnd(g) => {
                g.pointer = pos;
                let days = g.day_delta(ppd);
                g.ghost.end = shift_date(g.original.end, days).max(g.original.start);
                tracing::trace!(days, end = %g.ghost.end, "resize-end ghost");
            }
            Interaction::ResizingSwimlaneHeight {
                origin_y,
                original_height,
                height,
                ..
            } => {
                *height = (*original_height + pos.y - *origin_y).max(MIN_SWIMLANE_HEIGHT);
            }
            Interaction::ReorderingSwimlane { hover_index, .. } => {
                if let Some(idx) = y_to_swimlane_index(pos.y, &layout.bands) {
                    *hover_index = idx;
                }
            }
            Interaction::PressingEmpty { pointer, .. } => *pointer = pos,
        }
    }

    fn pointer_up(&mut self, time: f64, layout: &TimelineLayout) -> Option<TimelineIntent> {
        match std::mem::take(&mut self.state) {
            Interaction::Idle => None,
            Interaction::DraggingBar(g) | Interaction::ResizingStart(g) | Interaction::ResizingEnd(g) => {
                if g.moved() {
                    self.last_drag_end = Some(time);
                }
                if g.changed() {
                    tracing::debug!(
                        activity_id = %g.ghost.id,
                        start = %g.ghost.start,
                        end = %g.ghost.end,
                        "gesture committed"
                    );
                    Some(TimelineIntent::Update(g.ghost))
                } else if g.moved() {
                    tracing::debug!(activity_id = %g.original.id, "gesture discarded");
                    None
                } else {
                    Some(TimelineIntent::Edit(g.original))
                }
            }
            Interaction::ResizingSwimlaneHeight {
                swimlane_id, height, ..
            } => {
                tracing::debug!(%swimlane_id, height, "swimlane resized");
                Some(TimelineIntent::ResizeSwimlane { swimlane_id, height })
            }
            Interaction::ReorderingSwimlane {
                swimlane_id,
                source_index,
                hover_index,
            } => {
                if hover_index == source_index {
                    return None;
                }
                let mut order = layout.lane_order();
                if order.get(source_index) != Some(&swimlane_id) {
                    // The lane list changed under the gesture.
                    tracing::debug!(%swimlane_id, "reorder source moved, dropping");
                    return None;
                }
                move_index(&mut order, source_index, hover_index).ok()?;
                tracing::debug!(%swimlane_id, from = source_index, to = hover_index, "swimlanes reordered");
                Some(TimelineIntent::ReorderSwimlanes(order))
            }
            Interaction::PressingEmpty {
                swimlane_id,
                date,
                origin,
                pointer,
            } => {
                if (pointer - origin).length() > CLICK_SLOP {
                    tracing::debug!(%swimlane_id, "empty-space drag, nothing created");
                    return None;
                }
                tracing::debug!(%swimlane_id, %date, "quick create");
                self.last_quick_create = Some((time, origin));
                Some(TimelineIntent::QuickCreate {
                    start: date,
                    end: shift_date(date, QUICK_CREATE_DAYS - 1),
                    swimlane_id,
                })
            }
        }
    }

    fn double_click(
        &mut self,
        pos: Pos2,
        time: f64,
        layout: &TimelineLayout,
        read_only: bool,
    ) -> Option<TimelineIntent> {
        if read_only || self.is_active() {
            return None;
        }
        if let Some(ended) = self.last_drag_end {
            if time - ended < DOUBLE_CLICK_COOLDOWN {
                tracing::debug!("double-click suppressed after drag");
                return None;
            }
        }
        if self.completes_quick_create(pos, time) {
            self.last_quick_create = None;
            return None;
        }
        match layout.hit_test(pos) {
            Hit::Bar { activity_id, .. } => Some(TimelineIntent::Duplicate(activity_id)),
            Hit::LaneResizeHandle { swimlane_id } => {
                tracing::debug!(%swimlane_id, "swimlane height reset");
                Some(TimelineIntent::ResetSwimlaneHeight(swimlane_id))
            }
            _ => None,
        }
    }

    fn lane_drag_start(&mut self, swimlane_id: Uuid, layout: &TimelineLayout, read_only: bool) {
        if read_only || self.is_active() {
            return;
        }
        if let Some(source_index) = layout.band_index(swimlane_id) {
            self.state = Interaction::ReorderingSwimlane {
                swimlane_id,
                source_index,
                hover_index: source_index,
            };
            tracing::debug!(gesture = self.state.name(), %swimlane_id, "gesture started");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Swimlane;
    use crate::settings::LayoutMetrics;
    use crate::timeline::coords::TimelineViewport;
    use crate::model::Board;
    use crate::timeline::lanes::SwimlaneManager;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    struct Fixture {
        lanes: Vec<Swimlane>,
        activities: Vec<Activity>,
        layout: TimelineLayout,
        machine: InteractionMachine,
    }

    impl Fixture {
        fn new() -> Self {
            let lanes = vec![
                Swimlane::new("Email"),
                Swimlane::new("Social"),
                Swimlane::new("Events"),
                Swimlane::new("PR"),
            ];
            let activities = vec![
                Activity::new("A", date(1, 5), date(1, 9), lanes[0].id),
                Activity::new("B", date(1, 20), date(1, 22), lanes[1].id),
            ];
            let layout = Self::layout_for(&activities, &lanes);
            Self {
                lanes,
                activities,
                layout,
                machine: InteractionMachine::new(),
            }
        }

        fn layout_for(activities: &[Activity], lanes: &[Swimlane]) -> TimelineLayout {
            let mut viewport = TimelineViewport::new(date(1, 1), date(3, 1));
            viewport.set_zoom_index(4); // 12 px/day
            let metrics = LayoutMetrics {
                row_height: 30.0,
                row_gap: 2.0,
                header_padding: 10.0,
            };
            TimelineLayout::compute(activities, &SwimlaneManager::new(lanes), &viewport, metrics)
        }

        /// Take a fresh snapshot, as the host hands one over each frame.
        fn refresh(&mut self, activities: Vec<Activity>) {
            self.layout = Self::layout_for(&activities, &self.lanes);
            self.activities = activities;
        }

        fn send(&mut self, event: PointerEvent) -> Option<TimelineIntent> {
            self.machine.handle(event, &self.activities, &self.layout, false)
        }

        fn send_read_only(&mut self, event: PointerEvent) -> Option<TimelineIntent> {
            self.machine.handle(event, &self.activities, &self.layout, true)
        }

        fn rect(&self, idx: usize) -> egui::Rect {
            self.layout.bar(self.activities[idx].id).unwrap().rect
        }
    }

    fn down(pos: Pos2) -> PointerEvent {
        PointerEvent::Down { pos, time: 0.0 }
    }

    fn up(pos: Pos2, time: f64) -> PointerEvent {
        PointerEvent::Up { pos, time }
    }

    #[test]
    fn dragging_two_days_right_shifts_both_ends() {
        let mut f = Fixture::new();
        let start = f.rect(0).center();
        assert_eq!(f.send(down(start)), None);
        assert_eq!(f.machine.state().name(), "dragging-bar");

        let end = start + Vec2::new(24.0, 0.0);
        f.send(PointerEvent::Move { pos: end });
        assert_eq!(f.machine.ghost().unwrap().start, date(1, 7));
        assert_eq!(f.machine.drag_offset(f.activities[0].id), Some(Vec2::new(24.0, 0.0)));

        let Some(TimelineIntent::Update(updated)) = f.send(up(end, 1.0)) else {
            panic!("expected an update");
        };
        assert_eq!((updated.start, updated.end), (date(1, 7), date(1, 11)));
        assert_eq!(updated.swimlane_id, f.lanes[0].id);
        assert_eq!(updated.title, "A");
        assert!(!f.machine.is_active());
    }

    #[test]
    fn dragging_down_changes_swimlane() {
        let mut f = Fixture::new();
        let start = f.rect(0).center();
        let social = *f.layout.band(f.lanes[1].id).unwrap();
        f.send(down(start));
        let target = Pos2::new(start.x, social.center());
        let Some(TimelineIntent::Update(updated)) = f.send(up(target, 1.0)) else {
            panic!("expected an update");
        };
        assert_eq!(updated.swimlane_id, f.lanes[1].id);
        assert_eq!(updated.start, f.activities[0].start);
    }

    #[test]
    fn fast_drag_past_the_last_lane_lands_in_it() {
        let mut f = Fixture::new();
        let start = f.rect(0).center();
        f.send(down(start));
        f.send(PointerEvent::Move { pos: Pos2::new(start.x, 10_000.0) });
        assert_eq!(f.machine.ghost().unwrap().swimlane_id, f.lanes[3].id);
    }

    #[test]
    fn click_without_movement_opens_instead_of_updating() {
        let mut f = Fixture::new();
        let pos = f.rect(0).center();
        f.send(down(pos));
        assert_eq!(f.send(up(pos, 0.1)), Some(TimelineIntent::Edit(f.activities[0].clone())));
    }

    #[test]
    fn sub_day_jitter_is_discarded() {
        let mut f = Fixture::new();
        let pos = f.rect(0).center();
        f.send(down(pos));
        assert_eq!(f.send(up(pos + Vec2::new(5.0, 0.0), 0.1)), None);
    }

    #[test]
    fn resizing_start_past_end_clamps_to_end() {
        let mut f = Fixture::new();
        let rect = f.rect(0);
        let grab = Pos2::new(rect.left() + 1.0, rect.center().y);
        f.send(down(grab));
        assert_eq!(f.machine.state().name(), "resizing-start");
        let Some(TimelineIntent::Update(updated)) = f.send(up(grab + Vec2::new(600.0, 0.0), 1.0)) else {
            panic!("expected an update");
        };
        assert_eq!(updated.start, date(1, 9));
        assert_eq!(updated.end, date(1, 9));
    }

    #[test]
    fn resizing_end_before_start_clamps_to_start() {
        let mut f = Fixture::new();
        let rect = f.rect(0);
        let grab = Pos2::new(rect.right() - 1.0, rect.center().y);
        f.send(down(grab));
        assert_eq!(f.machine.state().name(), "resizing-end");
        f.send(PointerEvent::Move { pos: grab + Vec2::new(12.0, 0.0) });
        assert_eq!(f.machine.ghost().unwrap().end, date(1, 10));
        let Some(TimelineIntent::Update(updated)) = f.send(up(grab - Vec2::new(600.0, 0.0), 1.0)) else {
            panic!("expected an update");
        };
        assert_eq!((updated.start, updated.end), (date(1, 5), date(1, 5)));
    }

    #[test]
    fn resize_keeps_swimlane_even_when_pointer_leaves_lane() {
        let mut f = Fixture::new();
        let rect = f.rect(0);
        let grab = Pos2::new(rect.right() - 1.0, rect.center().y);
        f.send(down(grab));
        f.send(PointerEvent::Move { pos: grab + Vec2::new(24.0, 300.0) });
        assert_eq!(f.machine.ghost().unwrap().swimlane_id, f.lanes[0].id);
    }

    #[test]
    fn second_press_during_a_gesture_is_inert() {
        let mut f = Fixture::new();
        let first = f.rect(0).center();
        f.send(down(first));
        assert_eq!(f.send(down(f.rect(1).center())), None);
        assert_eq!(f.machine.ghost().unwrap().id, f.activities[0].id);
    }

    #[test]
    fn lane_height_resize_is_floored_and_always_emitted() {
        let mut f = Fixture::new();
        let email = *f.layout.band(f.lanes[0].id).unwrap();
        let grab = Pos2::new(400.0, email.bottom());
        f.send(down(grab));
        f.send(PointerEvent::Move { pos: grab - Vec2::new(0.0, 500.0) });
        assert_eq!(f.machine.lane_height_preview(), Some((f.lanes[0].id, MIN_SWIMLANE_HEIGHT)));
        assert_eq!(
            f.send(up(grab + Vec2::new(0.0, 20.0), 1.0)),
            Some(TimelineIntent::ResizeSwimlane {
                swimlane_id: f.lanes[0].id,
                height: email.height + 20.0
            })
        );
        // Releasing without movement still reports the (unchanged) height.
        f.send(down(grab));
        assert_eq!(
            f.send(up(grab, 2.0)),
            Some(TimelineIntent::ResizeSwimlane {
                swimlane_id: f.lanes[0].id,
                height: email.height
            })
        );
    }

    #[test]
    fn reorder_from_two_to_zero() {
        let mut f = Fixture::new();
        let ids: Vec<Uuid> = f.lanes.iter().map(|l| l.id).collect();
        f.send(PointerEvent::LaneDragStart { swimlane_id: ids[2] });
        let top = f.layout.band(ids[0]).unwrap().center();
        f.send(PointerEvent::Move { pos: Pos2::new(10.0, top) });
        assert_eq!(f.machine.reorder_preview(), Some((2, 0)));
        assert_eq!(
            f.send(up(Pos2::new(10.0, top), 1.0)),
            Some(TimelineIntent::ReorderSwimlanes(vec![ids[2], ids[0], ids[1], ids[3]]))
        );
    }

    #[test]
    fn reorder_dropped_in_place_emits_nothing() {
        let mut f = Fixture::new();
        let id = f.lanes[1].id;
        let y = f.layout.band(id).unwrap().center();
        f.send(PointerEvent::LaneDragStart { swimlane_id: id });
        assert_eq!(f.send(up(Pos2::new(10.0, y), 1.0)), None);
    }

    #[test]
    fn empty_space_click_quick_creates_a_week() {
        let mut f = Fixture::new();
        let events = *f.layout.band(f.lanes[2].id).unwrap();
        let pos = Pos2::new(9.0 * 12.0 + 1.0, events.center());
        assert_eq!(f.send(down(pos)), None);
        assert_eq!(f.machine.state().name(), "pressing-empty");
        assert_eq!(
            f.send(up(pos, 0.1)),
            Some(TimelineIntent::QuickCreate {
                start: date(1, 10),
                end: date(1, 16),
                swimlane_id: f.lanes[2].id
            })
        );
        assert!(!f.machine.is_active());
    }

    #[test]
    fn dragging_across_empty_space_creates_nothing() {
        let mut f = Fixture::new();
        let events = f.layout.band(f.lanes[2].id).unwrap().center();
        let pos = Pos2::new(200.0, events);
        assert_eq!(f.send(down(pos)), None);
        f.send(PointerEvent::Move { pos: pos + Vec2::new(60.0, 0.0) });
        assert_eq!(f.send(up(pos + Vec2::new(60.0, 0.0), 0.5)), None);
        assert!(!f.machine.is_active());
    }

    #[test]
    fn empty_space_press_alone_creates_nothing() {
        let mut f = Fixture::new();
        let events = f.layout.band(f.lanes[2].id).unwrap().center();
        assert_eq!(f.send(down(Pos2::new(200.0, events))), None);
        assert_eq!(f.send(PointerEvent::Cancel), None);
    }

    #[test]
    fn double_click_on_empty_space_creates_once() {
        let mut f = Fixture::new();
        let mut board = Board::new("Launch");
        board.swimlanes = f.lanes.clone();
        board.activities = f.activities.clone();

        let events = f.layout.band(f.lanes[2].id).unwrap().center();
        let pos = Pos2::new(200.0, events);
        let mut emitted = Vec::new();
        for event in [
            PointerEvent::Down { pos, time: 0.0 },
            PointerEvent::Up { pos, time: 0.05 },
        ] {
            emitted.extend(f.send(event));
        }
        // The host applies the first click before the second press arrives.
        for intent in emitted.clone() {
            board.apply(intent).unwrap();
        }
        f.refresh(board.activities.clone());
        assert!(matches!(f.layout.hit_test(pos), Hit::Bar { .. }));

        let mut second = Vec::new();
        for event in [
            PointerEvent::Down { pos, time: 0.15 },
            PointerEvent::Up { pos, time: 0.2 },
            PointerEvent::DoubleClick { pos, time: 0.2 },
        ] {
            second.extend(f.send(event));
        }
        for intent in second.clone() {
            board.apply(intent).unwrap();
        }

        let labels: Vec<&str> = emitted.iter().chain(&second).map(|i| i.label()).collect();
        assert_eq!(labels, vec!["quick-create"]);
        assert_eq!(board.activities.len(), 3);
    }

    #[test]
    fn press_after_the_double_click_window_is_handled_normally() {
        let mut f = Fixture::new();
        let events = f.layout.band(f.lanes[2].id).unwrap().center();
        let pos = Pos2::new(200.0, events);
        f.send(down(pos));
        f.send(up(pos, 0.0));
        assert!(f.machine.last_quick_create.is_some());
        // Well past the double-click window the press is handled normally.
        f.send(PointerEvent::Down { pos, time: 2.0 });
        assert_eq!(f.machine.state().name(), "pressing-empty");
    }

    #[test]
    fn double_click_on_lane_edge_resets_its_height() {
        let mut f = Fixture::new();
        let email = *f.layout.band(f.lanes[0].id).unwrap();
        let grab = Pos2::new(400.0, email.bottom());
        assert_eq!(
            f.send(PointerEvent::DoubleClick { pos: grab, time: 1.0 }),
            Some(TimelineIntent::ResetSwimlaneHeight(f.lanes[0].id))
        );
        assert_eq!(f.send_read_only(PointerEvent::DoubleClick { pos: grab, time: 2.0 }), None);
    }

    #[test]
    fn double_click_duplicates_unless_a_drag_just_ended() {
        let mut f = Fixture::new();
        let pos = f.rect(0).center();
        assert_eq!(
            f.send(PointerEvent::DoubleClick { pos, time: 5.0 }),
            Some(TimelineIntent::Duplicate(f.activities[0].id))
        );

        f.send(down(pos));
        f.send(up(pos + Vec2::new(36.0, 0.0), 10.0));
        let moved = f.layout.bar(f.activities[0].id).unwrap().rect.center();
        assert_eq!(f.send(PointerEvent::DoubleClick { pos: moved, time: 10.1 }), None);
        assert_eq!(
            f.send(PointerEvent::DoubleClick { pos: moved, time: 10.5 }),
            Some(TimelineIntent::Duplicate(f.activities[0].id))
        );
    }

    #[test]
    fn read_only_blocks_mutation_but_allows_opening() {
        let mut f = Fixture::new();
        let bar = f.rect(0).center();
        assert_eq!(f.send_read_only(down(bar)), Some(TimelineIntent::Edit(f.activities[0].clone())));
        assert!(!f.machine.is_active());

        let events = f.layout.band(f.lanes[2].id).unwrap().center();
        assert_eq!(f.send_read_only(down(Pos2::new(50.0, events))), None);
        assert_eq!(f.send_read_only(PointerEvent::DoubleClick { pos: bar, time: 1.0 }), None);
        f.send_read_only(PointerEvent::LaneDragStart { swimlane_id: f.lanes[0].id });
        assert!(!f.machine.is_active());
    }

    #[test]
    fn cancel_discards_the_ghost() {
        let mut f = Fixture::new();
        let pos = f.rect(0).center();
        f.send(down(pos));
        f.send(PointerEvent::Move { pos: pos + Vec2::new(48.0, 0.0) });
        assert_eq!(f.send(PointerEvent::Cancel), None);
        assert!(!f.machine.is_active());
        assert_eq!(f.send(up(pos, 1.0)), None);
    }

    #[test]
    fn inverted_upstream_range_is_normalized_on_capture() {
        let mut f = Fixture::new();
        f.activities[0].end = date(1, 1); // before its Jan 5 start
        let pos = f.rect(0).center();
        f.send(down(pos));
        let ghost = f.machine.ghost().unwrap();
        assert_eq!((ghost.start, ghost.end), (date(1, 5), date(1, 5)));
        // A plain click is still a click, not a silent repair.
        assert_eq!(f.send(up(pos, 1.0)), Some(TimelineIntent::Edit(f.activities[0].normalized())));
    }
}
