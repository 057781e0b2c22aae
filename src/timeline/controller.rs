//! Per-board timeline state and the read-only gate.

use uuid::Uuid;

use super::coords::TimelineViewport;
use super::interaction::{InteractionMachine, PointerEvent};
use super::intent::TimelineIntent;
use super::lanes::SwimlaneManager;
use super::layout::TimelineLayout;
use crate::model::{Activity, Swimlane};
use crate::settings::DisplaySettings;

/// Everything the timeline owns between frames: lane order and heights,
/// the viewport, display settings and the live gesture.
///
/// The activity snapshot is borrowed per call and never stored.
#[derive(Debug, Clone)]
pub struct TimelineController {
    pub viewport: TimelineViewport,
    pub settings: DisplaySettings,
    lanes: SwimlaneManager,
    machine: InteractionMachine,
}

impl TimelineController {
    pub fn new(swimlanes: &[Swimlane], mut viewport: TimelineViewport, settings: DisplaySettings) -> Self {
        viewport.set_zoom_index(settings.zoom_index());
        Self {
            viewport,
            settings,
            lanes: SwimlaneManager::new(swimlanes),
            machine: InteractionMachine::new(),
        }
    }

    /// Take in the owner's current swimlane list.
    pub fn sync(&mut self, swimlanes: &[Swimlane]) {
        self.lanes.sync(swimlanes);
    }

    pub fn lanes(&self) -> &SwimlaneManager {
        &self.lanes
    }

    pub fn machine(&self) -> &InteractionMachine {
        &self.machine
    }

    pub fn read_only(&self) -> bool {
        self.settings.read_only
    }

    /// Rebuild the frame geometry. A lane being resized uses its live height.
    pub fn layout(&self, activities: &[Activity]) -> TimelineLayout {
        let metrics = self.settings.metrics();
        match self.machine.lane_height_preview() {
            Some((id, height)) => {
                let mut lanes = self.lanes.clone();
                // Preview heights are already floored; an unknown id just skips the preview.
                let _ = lanes.resize(id, height);
                TimelineLayout::compute(activities, &lanes, &self.viewport, metrics)
            }
            None => TimelineLayout::compute(activities, &self.lanes, &self.viewport, metrics),
        }
    }

    /// Route pointer input through the state machine.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        activities: &[Activity],
        layout: &TimelineLayout,
    ) -> Option<TimelineIntent> {
        let intent = self
            .machine
            .handle(event, activities, layout, self.settings.read_only)?;
        self.request(intent)
    }

    /// Pass an intent raised outside the gesture machine (sidebar and bar
    /// affordances, dialogs) through the read-only gate and apply its local
    /// presentation effect.
    pub fn request(&mut self, intent: TimelineIntent) -> Option<TimelineIntent> {
        if self.settings.read_only && intent.is_mutating() {
            tracing::debug!(intent = intent.label(), "suppressed in read-only mode");
            return None;
        }
        match &intent {
            TimelineIntent::ResizeSwimlane { swimlane_id, height } => {
                if let Err(e) = self.lanes.resize(*swimlane_id, *height) {
                    tracing::warn!(error = %e, "resize for a lane the timeline does not show");
                }
            }
            TimelineIntent::ReorderSwimlanes(order) => self.apply_order(order),
            TimelineIntent::ResetSwimlaneHeight(swimlane_id) => {
                let _ = self.lanes.reset_height(*swimlane_id);
            }
            TimelineIntent::RenameSwimlane { swimlane_id, name } => {
                let _ = self.lanes.rename(*swimlane_id, name.clone());
            }
            TimelineIntent::DeleteSwimlane(id) => {
                let _ = self.lanes.remove(*id);
            }
            _ => {}
        }
        Some(intent)
    }

    fn apply_order(&mut self, order: &[Uuid]) {
        for (to, id) in order.iter().enumerate() {
            if let Some(from) = self.lanes.index_of(*id) {
                if from != to && to < self.lanes.len() {
                    let _ = self.lanes.reorder(from, to);
                }
            }
        }
    }

    pub fn zoom_in(&mut self) {
        if self.viewport.zoom_in() {
            self.settings.zoom_index = self.viewport.zoom_index();
        }
    }

    pub fn zoom_out(&mut self) {
        if self.viewport.zoom_out() {
            self.settings.zoom_index = self.viewport.zoom_index();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use egui::{Pos2, Vec2};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn controller(lanes: &[Swimlane]) -> TimelineController {
        let viewport = TimelineViewport::new(date(1, 1), date(3, 1));
        TimelineController::new(lanes, viewport, DisplaySettings::default())
    }

    #[test]
    fn read_only_gate_drops_mutations_but_not_viewing() {
        let lanes = vec![Swimlane::new("Email")];
        let mut c = controller(&lanes);
        c.settings.read_only = true;
        assert_eq!(c.request(TimelineIntent::DeleteSwimlane(lanes[0].id)), None);
        assert_eq!(c.lanes().len(), 1);
        let activity = Activity::new("Launch", date(1, 2), date(1, 3), lanes[0].id);
        assert_eq!(
            c.request(TimelineIntent::Edit(activity.clone())),
            Some(TimelineIntent::Edit(activity))
        );
    }

    #[test]
    fn height_reset_survives_the_next_snapshot() {
        let mut board = crate::model::Board::new("Launch");
        board.swimlanes = vec![Swimlane::new("Email")];
        let id = board.swimlanes[0].id;
        let mut c = controller(&board.swimlanes);

        let resize = c.request(TimelineIntent::ResizeSwimlane { swimlane_id: id, height: 140.0 });
        board.apply(resize.unwrap()).unwrap();
        c.sync(&board.swimlanes);
        assert_eq!(c.lanes().get(id).unwrap().manual_height, Some(140.0));

        let reset = c.request(TimelineIntent::ResetSwimlaneHeight(id));
        board.apply(reset.unwrap()).unwrap();
        c.sync(&board.swimlanes);
        assert_eq!(board.swimlanes[0].height, None);
        assert_eq!(c.lanes().get(id).unwrap().manual_height, None);
    }

    #[test]
    fn committed_lane_resize_applies_locally() {
        let lanes = vec![Swimlane::new("Email"), Swimlane::new("Social")];
        let mut c = controller(&lanes);
        let layout = c.layout(&[]);
        let band = *layout.band(lanes[0].id).unwrap();
        let grab = Pos2::new(300.0, band.bottom());

        c.handle(PointerEvent::Down { pos: grab, time: 0.0 }, &[], &layout);
        c.handle(PointerEvent::Move { pos: grab + Vec2::new(0.0, 30.0) }, &[], &layout);
        let live = c.layout(&[]);
        assert_eq!(live.band(lanes[0].id).unwrap().height, band.height + 30.0);
        assert_eq!(live.band(lanes[1].id).unwrap().top, band.height + 30.0);

        let intent = c.handle(PointerEvent::Up { pos: grab + Vec2::new(0.0, 30.0), time: 1.0 }, &[], &layout);
        assert!(matches!(intent, Some(TimelineIntent::ResizeSwimlane { .. })));
        assert_eq!(c.lanes().get(lanes[0].id).unwrap().manual_height, Some(band.height + 30.0));
    }

    #[test]
    fn committed_reorder_applies_locally() {
        let lanes = vec![Swimlane::new("A"), Swimlane::new("B"), Swimlane::new("C")];
        let mut c = controller(&lanes);
        let order = vec![lanes[2].id, lanes[0].id, lanes[1].id];
        c.request(TimelineIntent::ReorderSwimlanes(order.clone()));
        assert_eq!(c.lanes().ids(), order);
    }

    #[test]
    fn zoom_is_remembered_in_settings() {
        let mut c = controller(&[]);
        let before = c.settings.zoom_index;
        c.zoom_in();
        assert_eq!(c.settings.zoom_index, before + 1);
        assert_eq!(c.viewport.zoom_index(), before + 1);
    }
}
