//! Calendar date ↔ pixel mapping.
//!
//! Horizontal positions are always derived from an integer day difference
//! multiplied by the zoom factor, never accumulated, so repeated conversions
//! cannot drift. Every pixel delta snaps to whole days.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discrete pixels-per-day zoom ladder, smallest to largest.
pub const ZOOM_LEVELS: &[f32] = &[2.0, 4.0, 6.0, 8.0, 12.0, 18.0, 24.0, 32.0, 48.0, 64.0, 80.0];

/// Index into [`ZOOM_LEVELS`] used for new viewports (18 px/day).
pub const DEFAULT_ZOOM_INDEX: usize = 5;

/// Horizontal offset of `date` from `origin`.
pub fn date_to_offset(date: NaiveDate, origin: NaiveDate, pixels_per_day: f32) -> f32 {
    (date - origin).num_days() as f32 * pixels_per_day
}

/// Whole days represented by a pixel delta, rounded to the nearest day.
pub fn pixels_to_day_delta(pixel_delta: f32, pixels_per_day: f32) -> i64 {
    if pixels_per_day <= 0.0 || !pixel_delta.is_finite() {
        return 0;
    }
    (pixel_delta / pixels_per_day).round() as i64
}

/// Inverse of [`date_to_offset`], snapping to the nearest day.
pub fn offset_to_date(offset: f32, origin: NaiveDate, pixels_per_day: f32) -> NaiveDate {
    shift_date(origin, pixels_to_day_delta(offset, pixels_per_day))
}

/// `date + days`, saturating at the ends of the supported calendar.
pub fn shift_date(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Vertical extent of one swimlane, in lane-area coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwimlaneBand {
    pub swimlane_id: Uuid,
    pub top: f32,
    pub height: f32,
}

impl SwimlaneBand {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> f32 {
        self.top + self.height / 2.0
    }

    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Index of the band containing `y`, or the band with the nearest center.
///
/// Fast drags routinely leave every band; they resolve to the closest one
/// instead of being dropped. `None` only when there are no bands.
pub fn y_to_swimlane_index(y: f32, bands: &[SwimlaneBand]) -> Option<usize> {
    if let Some(idx) = bands.iter().position(|b| b.contains(y)) {
        return Some(idx);
    }
    bands
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (a.center() - y)
                .abs()
                .total_cmp(&(b.center() - y).abs())
        })
        .map(|(idx, _)| idx)
}

/// Swimlane whose band contains `y`, or the nearest one.
pub fn y_to_swimlane(y: f32, bands: &[SwimlaneBand]) -> Option<Uuid> {
    y_to_swimlane_index(y, bands).map(|idx| bands[idx].swimlane_id)
}

/// Controls what scale the timeline header displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineScale {
    Days,
    Weeks,
    Months,
}

/// The visible horizontal window of the timeline.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// Timeline origin: the date at x = 0.
    pub start: NaiveDate,
    /// The rightmost date laid out.
    pub end: NaiveDate,
    /// Current header scale.
    pub scale: TimelineScale,
    zoom_index: usize,
}

impl TimelineViewport {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: end.max(start),
            scale: TimelineScale::Weeks,
            zoom_index: DEFAULT_ZOOM_INDEX,
        }
    }

    pub fn pixels_per_day(&self) -> f32 {
        ZOOM_LEVELS[self.zoom_index]
    }

    pub fn zoom_index(&self) -> usize {
        self.zoom_index
    }

    /// Jump to a rung of the zoom ladder. Out-of-range indices clamp to the ends.
    pub fn set_zoom_index(&mut self, index: usize) {
        self.zoom_index = index.min(ZOOM_LEVELS.len() - 1);
    }

    /// Convert a date to an x-pixel offset from the viewport start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        date_to_offset(date, self.start, self.pixels_per_day())
    }

    /// Convert an x-pixel offset back to a date.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        offset_to_date(x, self.start, self.pixels_per_day())
    }

    /// Total width in pixels of the laid-out range, including the last day.
    pub fn total_width(&self) -> f32 {
        self.date_to_x(self.end) + self.pixels_per_day()
    }

    /// Step one rung up the zoom ladder. Returns false at the top.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom_index + 1 < ZOOM_LEVELS.len() {
            self.zoom_index += 1;
            true
        } else {
            false
        }
    }

    /// Step one rung down the zoom ladder. Returns false at the bottom.
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom_index > 0 {
            self.zoom_index -= 1;
            true
        } else {
            false
        }
    }

    /// Pan the viewport by a number of days.
    pub fn scroll_days(&mut self, days: i64) {
        self.start = shift_date(self.start, days);
        self.end = shift_date(self.end, days);
    }

    /// Re-frame around a date range with some lead-in and run-out.
    pub fn fit(&mut self, first: NaiveDate, last: NaiveDate) {
        self.start = shift_date(first, -7);
        self.end = shift_date(last.max(first), 30);
    }
}
