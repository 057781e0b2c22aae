//! Greedy interval packing of a swimlane's activities into display rows.
//!
//! Activities are taken in start-date order and each goes into the first row
//! whose last activity ends strictly before it starts. Processing in start
//! order makes this first-fit optimal: the row count equals the largest set
//! of activities that all overlap on one day.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::Activity;
use crate::settings::{LayoutMetrics, MIN_SWIMLANE_HEIGHT};

/// Row assignment for one swimlane. Recomputed every frame, never stored.
#[derive(Debug, Clone, Default)]
pub struct PackedLane<'a> {
    /// Rows top to bottom, each listing activities left to right.
    pub rows: Vec<Vec<&'a Activity>>,
}

impl<'a> PackedLane<'a> {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_of(&self, activity_id: Uuid) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.iter().any(|a| a.id == activity_id))
    }

    /// Activities with their row index, in placement order.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &'a Activity)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, items)| items.iter().map(move |a| (row, *a)))
    }
}

/// Pack activities into non-overlapping rows.
///
/// The sort is stable, so activities starting on the same day keep their
/// input order. Ranges are read normalized; an inverted range packs as a
/// single day at its start.
pub fn pack_rows<'a, I>(activities: I) -> PackedLane<'a>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut ordered: Vec<&'a Activity> = activities.into_iter().collect();
    ordered.sort_by_key(|a| a.normalized_range().0);

    let mut rows: Vec<Vec<&'a Activity>> = Vec::new();
    let mut row_ends: Vec<NaiveDate> = Vec::new();

    for activity in ordered {
        let (start, end) = activity.normalized_range();
        match row_ends.iter().position(|last_end| *last_end < start) {
            Some(row) => {
                rows[row].push(activity);
                row_ends[row] = end;
            }
            None => {
                rows.push(vec![activity]);
                row_ends.push(end);
            }
        }
    }

    PackedLane { rows }
}

/// Display height of a lane: the manual override if set, otherwise enough
/// for the packed rows. Never below [`MIN_SWIMLANE_HEIGHT`].
pub fn lane_height(row_count: usize, metrics: &LayoutMetrics, manual: Option<f32>) -> f32 {
    manual
        .unwrap_or_else(|| metrics.content_height(row_count))
        .max(MIN_SWIMLANE_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn activity(title: &str, start: NaiveDate, end: NaiveDate) -> Activity {
        Activity::new(title, start, end, Uuid::nil())
    }

    fn titles(lane: &PackedLane<'_>) -> Vec<Vec<String>> {
        lane.rows
            .iter()
            .map(|row| row.iter().map(|a| a.title.clone()).collect())
            .collect()
    }

    #[test]
    fn overlapping_goes_down_and_gap_reuses_first_row() {
        let a = activity("A", date(1, 1), date(1, 5));
        let b = activity("B", date(1, 3), date(1, 10));
        let c = activity("C", date(1, 20), date(1, 25));
        let lane = pack_rows([&a, &b, &c]);
        assert_eq!(titles(&lane), vec![vec!["A", "C"], vec!["B"]]);
        assert_eq!(lane.row_count(), 2);
    }

    #[test]
    fn input_order_does_not_matter_for_start_sorting() {
        let a = activity("A", date(1, 1), date(1, 5));
        let b = activity("B", date(1, 3), date(1, 10));
        let c = activity("C", date(1, 20), date(1, 25));
        let lane = pack_rows([&c, &b, &a]);
        assert_eq!(titles(&lane), vec![vec!["A", "C"], vec!["B"]]);
    }

    #[test]
    fn identical_single_days_never_share_a_row() {
        let a = activity("A", date(2, 1), date(2, 1));
        let b = activity("B", date(2, 1), date(2, 1));
        let lane = pack_rows([&a, &b]);
        assert_eq!(titles(&lane), vec![vec!["A"], vec!["B"]]);
    }

    #[test]
    fn touching_ranges_need_separate_rows() {
        // Ends are inclusive: A occupies Jan 5, so B starting Jan 5 overlaps.
        let a = activity("A", date(1, 1), date(1, 5));
        let b = activity("B", date(1, 5), date(1, 8));
        let c = activity("C", date(1, 6), date(1, 8));
        let lane = pack_rows([&a, &b, &c]);
        assert_eq!(titles(&lane), vec![vec!["A", "C"], vec!["B"]]);
    }

    #[test]
    fn ties_keep_input_order() {
        let a = activity("first", date(3, 1), date(3, 2));
        let b = activity("second", date(3, 1), date(3, 9));
        let c = activity("third", date(3, 1), date(3, 4));
        let lane = pack_rows([&a, &b, &c]);
        assert_eq!(titles(&lane), vec![vec!["first"], vec!["second"], vec!["third"]]);
    }

    #[test]
    fn three_way_overlap_forces_three_rows() {
        let a = activity("A", date(1, 8), date(1, 12));
        let b = activity("B", date(1, 1), date(1, 10));
        let c = activity("C", date(1, 10), date(1, 15));
        assert_eq!(pack_rows([&a, &b, &c]).row_count(), 3);
    }

    #[test]
    fn inverted_range_packs_as_its_start_day() {
        let bad = activity("bad", date(1, 10), date(1, 2));
        let next = activity("next", date(1, 11), date(1, 12));
        let lane = pack_rows([&bad, &next]);
        assert_eq!(lane.row_count(), 1);
    }

    #[test]
    fn row_of_and_placements_agree() {
        let a = activity("A", date(1, 1), date(1, 5));
        let b = activity("B", date(1, 3), date(1, 10));
        let lane = pack_rows([&a, &b]);
        assert_eq!(lane.row_of(b.id), Some(1));
        let rows: Vec<usize> = lane.placements().map(|(row, _)| row).collect();
        assert_eq!(rows, vec![0, 1]);
        assert_eq!(lane.row_of(Uuid::new_v4()), None);
    }

    #[test]
    fn height_prefers_manual_override_but_keeps_floor() {
        let m = LayoutMetrics {
            row_height: 30.0,
            row_gap: 2.0,
            header_padding: 10.0,
        };
        assert_eq!(lane_height(0, &m, None), 42.0);
        assert_eq!(lane_height(2, &m, None), 74.0);
        assert_eq!(lane_height(2, &m, Some(200.0)), 200.0);
        assert_eq!(lane_height(2, &m, Some(5.0)), MIN_SWIMLANE_HEIGHT);
    }
}
