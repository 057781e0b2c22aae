//! Absolute geometry for one frame: lane bands, bar rectangles and hit-testing.
//!
//! Coordinates are relative to the top-left of the lane area (below the date
//! header, right of the sidebar). The whole layout is rebuilt from the
//! snapshot each frame and discarded afterwards.

use std::collections::HashMap;

use chrono::NaiveDate;
use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

use super::coords::{date_to_offset, shift_date, y_to_swimlane_index, SwimlaneBand, TimelineViewport};
use super::lanes::SwimlaneManager;
use super::packing::{pack_rows, PackedLane};
use crate::model::Activity;
use crate::settings::LayoutMetrics;

/// Width of the resize hit-zone centred on each end of a bar.
pub const HANDLE_WIDTH: f32 = 7.0;
/// Height of the resize hit-zone centred on each lane's bottom edge.
pub const LANE_HANDLE_HEIGHT: f32 = 6.0;
pub const MIN_BAR_WIDTH: f32 = 6.0;

/// Which part of a bar the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarZone {
    Body,
    StartEdge,
    EndEdge,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Bar { activity_id: Uuid, zone: BarZone },
    LaneResizeHandle { swimlane_id: Uuid },
    EmptyLane { swimlane_id: Uuid, date: NaiveDate },
    Nothing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub activity_id: Uuid,
    pub swimlane_id: Uuid,
    pub row: usize,
    pub rect: Rect,
}

impl BarGeometry {
    fn handle_width(&self) -> f32 {
        // Keep the body grabbable on very short bars.
        HANDLE_WIDTH.min(self.rect.width() / 3.0)
    }

    pub fn start_handle(&self) -> Rect {
        let w = self.handle_width();
        Rect::from_min_max(
            Pos2::new(self.rect.left() - w / 2.0, self.rect.top()),
            Pos2::new(self.rect.left() + w / 2.0, self.rect.bottom()),
        )
    }

    pub fn end_handle(&self) -> Rect {
        let w = self.handle_width();
        Rect::from_min_max(
            Pos2::new(self.rect.right() - w / 2.0, self.rect.top()),
            Pos2::new(self.rect.right() + w / 2.0, self.rect.bottom()),
        )
    }
}

#[derive(Debug, Clone)]
pub struct TimelineLayout {
    pub origin: NaiveDate,
    pub pixels_per_day: f32,
    pub metrics: LayoutMetrics,
    pub bands: Vec<SwimlaneBand>,
    pub bars: Vec<BarGeometry>,
    /// Activities whose swimlane is not in the lane list; they are not drawn.
    pub orphans: usize,
}

impl TimelineLayout {
    /// Pack every lane and place every bar.
    pub fn compute(
        activities: &[Activity],
        lanes: &SwimlaneManager,
        viewport: &TimelineViewport,
        metrics: LayoutMetrics,
    ) -> Self {
        let mut by_lane: HashMap<Uuid, Vec<&Activity>> = HashMap::new();
        for activity in activities {
            by_lane.entry(activity.swimlane_id).or_default().push(activity);
        }

        let packed: HashMap<Uuid, PackedLane<'_>> = lanes
            .lanes()
            .iter()
            .map(|lane| {
                let members = by_lane.remove(&lane.id).unwrap_or_default();
                (lane.id, pack_rows(members))
            })
            .collect();
        let orphans = by_lane.values().map(Vec::len).sum();

        let bands = lanes.bands(&metrics, |id| {
            packed.get(&id).map(PackedLane::row_count).unwrap_or(0)
        });

        let mut layout = Self {
            origin: viewport.start,
            pixels_per_day: viewport.pixels_per_day(),
            metrics,
            bands,
            bars: Vec::with_capacity(activities.len()),
            orphans,
        };

        let mut bars = Vec::with_capacity(activities.len());
        for band in &layout.bands {
            let Some(lane) = packed.get(&band.swimlane_id) else {
                continue;
            };
            for (row, activity) in lane.placements() {
                bars.push(BarGeometry {
                    activity_id: activity.id,
                    swimlane_id: band.swimlane_id,
                    row,
                    rect: layout.bar_rect(activity, band, row),
                });
            }
        }
        layout.bars = bars;
        layout
    }

    /// Rectangle an activity occupies in `row` of `band`.
    pub fn bar_rect(&self, activity: &Activity, band: &SwimlaneBand, row: usize) -> Rect {
        let (start, end) = activity.normalized_range();
        let x = date_to_offset(start, self.origin, self.pixels_per_day);
        let days = (end - start).num_days() + 1;
        let width = (days as f32 * self.pixels_per_day).max(MIN_BAR_WIDTH);
        Rect::from_min_size(
            Pos2::new(x, band.top + self.metrics.row_top(row)),
            Vec2::new(width, self.metrics.row_height),
        )
    }

    /// Where a provisional activity would draw: its candidate lane, at the
    /// original row when that row fits inside the lane, otherwise the top row.
    pub fn ghost_rect(&self, ghost: &Activity, row_hint: usize) -> Option<Rect> {
        let band = self.band(ghost.swimlane_id)?;
        let fits = self.metrics.row_top(row_hint) + self.metrics.row_height <= band.height;
        let row = if fits { row_hint } else { 0 };
        Some(self.bar_rect(ghost, band, row))
    }

    pub fn bar(&self, activity_id: Uuid) -> Option<&BarGeometry> {
        self.bars.iter().find(|b| b.activity_id == activity_id)
    }

    pub fn band(&self, swimlane_id: Uuid) -> Option<&SwimlaneBand> {
        self.bands.iter().find(|b| b.swimlane_id == swimlane_id)
    }

    pub fn band_index(&self, swimlane_id: Uuid) -> Option<usize> {
        self.bands.iter().position(|b| b.swimlane_id == swimlane_id)
    }

    /// Swimlane under `y`, falling back to the nearest one.
    pub fn swimlane_at(&self, y: f32) -> Option<Uuid> {
        y_to_swimlane_index(y, &self.bands).map(|idx| self.bands[idx].swimlane_id)
    }

    pub fn lane_order(&self) -> Vec<Uuid> {
        self.bands.iter().map(|b| b.swimlane_id).collect()
    }

    pub fn total_height(&self) -> f32 {
        self.bands.last().map(SwimlaneBand::bottom).unwrap_or(0.0)
    }

    /// The calendar day whose column contains `x`.
    pub fn day_at(&self, x: f32) -> NaiveDate {
        if self.pixels_per_day <= 0.0 {
            return self.origin;
        }
        shift_date(self.origin, (x / self.pixels_per_day).floor() as i64)
    }

    /// What lies under `pos`. Bars win over lane handles, which win over
    /// empty lane space; later bars are on top.
    pub fn hit_test(&self, pos: Pos2) -> Hit {
        for bar in self.bars.iter().rev() {
            let zone = if bar.start_handle().contains(pos) {
                BarZone::StartEdge
            } else if bar.end_handle().contains(pos) {
                BarZone::EndEdge
            } else if bar.rect.contains(pos) {
                BarZone::Body
            } else {
                continue;
            };
            return Hit::Bar {
                activity_id: bar.activity_id,
                zone,
            };
        }

        if let Some(band) = self
            .bands
            .iter()
            .find(|b| (pos.y - b.bottom()).abs() <= LANE_HANDLE_HEIGHT / 2.0)
        {
            return Hit::LaneResizeHandle {
                swimlane_id: band.swimlane_id,
            };
        }

        match self.bands.iter().find(|b| b.contains(pos.y)) {
            Some(band) if pos.x >= 0.0 => Hit::EmptyLane {
                swimlane_id: band.swimlane_id,
                date: self.day_at(pos.x),
            },
            _ => Hit::Nothing,
        }
    }
}
