use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::activity::Activity;
use super::swimlane::Swimlane;
use crate::error::{Error, Result};
use crate::timeline::TimelineIntent;

/// A planning board: the activity and swimlane snapshot the timeline renders.
///
/// This is the host side of the timeline boundary. It owns the data and
/// applies the intents the timeline emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    pub swimlanes: Vec<Swimlane>,
    pub activities: Vec<Activity>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            name: "Untitled Board".to_string(),
            swimlanes: Vec::new(),
            activities: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

/// What applying an intent did, for the status bar.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Changed,
    Created(Uuid),
    /// The intent asks the host to show an activity rather than change it.
    Show(Uuid),
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn activity(&self, id: Uuid) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn swimlane(&self, id: Uuid) -> Option<&Swimlane> {
        self.swimlanes.iter().find(|s| s.id == id)
    }

    /// Earliest start and latest end across all activities.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.activities.iter().map(|a| a.normalized_range().0).min()?;
        let end = self.activities.iter().map(|a| a.normalized_range().1).max()?;
        Some((start, end))
    }

    /// Apply one timeline intent to the snapshot.
    pub fn apply(&mut self, intent: TimelineIntent) -> Result<Applied> {
        let applied = match intent {
            TimelineIntent::Update(activity) => {
                if self.swimlane(activity.swimlane_id).is_none() {
                    return Err(Error::UnknownSwimlane(activity.swimlane_id));
                }
                let slot = self
                    .activities
                    .iter_mut()
                    .find(|a| a.id == activity.id)
                    .ok_or(Error::UnknownActivity(activity.id))?;
                *slot = activity.normalized();
                Applied::Changed
            }
            TimelineIntent::ReorderSwimlanes(order) => {
                self.reorder_swimlanes(&order)?;
                Applied::Changed
            }
            TimelineIntent::QuickCreate {
                start,
                end,
                swimlane_id,
            } => {
                if self.swimlane(swimlane_id).is_none() {
                    return Err(Error::UnknownSwimlane(swimlane_id));
                }
                let palette = crate::model::palette();
                let mut activity = Activity::new("New activity", start, end.max(start), swimlane_id);
                activity.color = palette[self.activities.len() % palette.len()];
                let id = activity.id;
                self.activities.push(activity);
                Applied::Created(id)
            }
            TimelineIntent::Duplicate(id) => {
                let source = self.activity(id).ok_or(Error::UnknownActivity(id))?;
                let copy = source.duplicate();
                let copy_id = copy.id;
                self.activities.push(copy);
                Applied::Created(copy_id)
            }
            TimelineIntent::DeleteActivity(id) => {
                let before = self.activities.len();
                self.activities.retain(|a| a.id != id);
                if self.activities.len() == before {
                    return Err(Error::UnknownActivity(id));
                }
                Applied::Changed
            }
            TimelineIntent::Edit(activity) => {
                if self.activity(activity.id).is_none() {
                    return Err(Error::UnknownActivity(activity.id));
                }
                Applied::Show(activity.id)
            }
            TimelineIntent::RenameSwimlane { swimlane_id, name } => {
                let lane = self.swimlane_mut(swimlane_id)?;
                lane.name = name;
                Applied::Changed
            }
            TimelineIntent::ResizeSwimlane {
                swimlane_id,
                height,
            } => {
                let lane = self.swimlane_mut(swimlane_id)?;
                lane.height = Some(height);
                Applied::Changed
            }
            TimelineIntent::ResetSwimlaneHeight(swimlane_id) => {
                self.swimlane_mut(swimlane_id)?.height = None;
                Applied::Changed
            }
            TimelineIntent::AddSwimlane { name } => {
                let lane = Swimlane::new(name);
                let id = lane.id;
                self.swimlanes.push(lane);
                Applied::Created(id)
            }
            TimelineIntent::DeleteSwimlane(id) => {
                let before = self.swimlanes.len();
                self.swimlanes.retain(|s| s.id != id);
                if self.swimlanes.len() == before {
                    return Err(Error::UnknownSwimlane(id));
                }
                // The board drops the lane's activities with it.
                self.activities.retain(|a| a.swimlane_id != id);
                Applied::Changed
            }
        };
        if matches!(applied, Applied::Changed | Applied::Created(_)) {
            self.touch();
        }
        Ok(applied)
    }

    fn swimlane_mut(&mut self, id: Uuid) -> Result<&mut Swimlane> {
        self.swimlanes
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(Error::UnknownSwimlane(id))
    }

    fn reorder_swimlanes(&mut self, order: &[Uuid]) -> Result<()> {
        if order.len() != self.swimlanes.len() {
            return Err(Error::InvalidOrder);
        }
        let mut reordered: Vec<Swimlane> = Vec::with_capacity(order.len());
        for id in order {
            if reordered.iter().any(|s| s.id == *id) {
                return Err(Error::InvalidOrder);
            }
            let lane = self.swimlane(*id).ok_or(Error::InvalidOrder)?;
            reordered.push(lane.clone());
        }
        self.swimlanes = reordered;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn board() -> Board {
        let mut board = Board::new("Q1 launch");
        board.swimlanes = vec![
            Swimlane::new("Email"),
            Swimlane::new("Social"),
            Swimlane::new("Events"),
        ];
        let email = board.swimlanes[0].id;
        board.activities = vec![Activity::new("Teaser", date(1, 6), date(1, 10), email)];
        board
    }

    #[test]
    fn update_replaces_the_activity() {
        let mut board = board();
        let mut moved = board.activities[0].clone();
        moved.start = date(1, 8);
        moved.end = date(1, 12);
        moved.swimlane_id = board.swimlanes[1].id;
        assert_eq!(board.apply(TimelineIntent::Update(moved.clone())).unwrap(), Applied::Changed);
        assert_eq!(board.activities[0], moved);
    }

    #[test]
    fn update_into_unknown_lane_is_rejected() {
        let mut board = board();
        let mut moved = board.activities[0].clone();
        moved.swimlane_id = Uuid::new_v4();
        assert!(matches!(
            board.apply(TimelineIntent::Update(moved)),
            Err(Error::UnknownSwimlane(_))
        ));
    }

    #[test]
    fn quick_create_adds_activity_in_lane() {
        let mut board = board();
        let lane = board.swimlanes[2].id;
        let applied = board
            .apply(TimelineIntent::QuickCreate {
                start: date(2, 3),
                end: date(2, 9),
                swimlane_id: lane,
            })
            .unwrap();
        let Applied::Created(id) = applied else {
            panic!("expected a created activity");
        };
        let created = board.activity(id).unwrap();
        assert_eq!(created.swimlane_id, lane);
        assert_eq!(created.span_days(), 7);
    }

    #[test]
    fn edit_shows_without_touching() {
        let mut board = board();
        let before = board.modified;
        let activity = board.activities[0].clone();
        assert_eq!(
            board.apply(TimelineIntent::Edit(activity.clone())).unwrap(),
            Applied::Show(activity.id)
        );
        assert_eq!(board.modified, before);
        let mut stray = activity;
        stray.id = Uuid::new_v4();
        assert!(board.apply(TimelineIntent::Edit(stray)).is_err());
    }

    #[test]
    fn height_reset_clears_the_manual_height() {
        let mut board = board();
        let lane = board.swimlanes[0].id;
        board
            .apply(TimelineIntent::ResizeSwimlane { swimlane_id: lane, height: 120.0 })
            .unwrap();
        assert_eq!(board.swimlanes[0].height, Some(120.0));
        board.apply(TimelineIntent::ResetSwimlaneHeight(lane)).unwrap();
        assert_eq!(board.swimlanes[0].height, None);
    }

    #[test]
    fn reorder_follows_the_given_ids() {
        let mut board = board();
        let ids: Vec<Uuid> = board.swimlanes.iter().map(|s| s.id).collect();
        let order = vec![ids[2], ids[0], ids[1]];
        board.apply(TimelineIntent::ReorderSwimlanes(order.clone())).unwrap();
        let now: Vec<Uuid> = board.swimlanes.iter().map(|s| s.id).collect();
        assert_eq!(now, order);
    }

    #[test]
    fn reorder_with_foreign_id_is_rejected() {
        let mut board = board();
        let order = vec![Uuid::new_v4(), board.swimlanes[1].id, board.swimlanes[2].id];
        assert!(matches!(
            board.apply(TimelineIntent::ReorderSwimlanes(order)),
            Err(Error::InvalidOrder)
        ));
        assert_eq!(board.swimlanes.len(), 3);
    }

    #[test]
    fn deleting_a_lane_drops_its_activities() {
        let mut board = board();
        let email = board.swimlanes[0].id;
        board.apply(TimelineIntent::DeleteSwimlane(email)).unwrap();
        assert!(board.activities.is_empty());
        assert_eq!(board.swimlanes.len(), 2);
    }

    #[test]
    fn duplicate_appends_a_copy() {
        let mut board = board();
        let id = board.activities[0].id;
        board.apply(TimelineIntent::Duplicate(id)).unwrap();
        assert_eq!(board.activities.len(), 2);
        assert_ne!(board.activities[1].id, id);
    }
}
