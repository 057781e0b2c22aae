//! Swimlane order and display heights.
//!
//! Order is the position in the list. Height is a manual override when the
//! user has dragged the lane's bottom edge, otherwise whatever the packed
//! rows need. The manager knows nothing about the activities in a lane.

use uuid::Uuid;

use super::coords::SwimlaneBand;
use super::packing::lane_height;
use crate::error::{Error, Result};
use crate::model::Swimlane;
use crate::settings::{LayoutMetrics, MIN_SWIMLANE_HEIGHT};

#[derive(Debug, Clone, PartialEq)]
pub struct LaneEntry {
    pub id: Uuid,
    pub name: String,
    pub manual_height: Option<f32>,
}

impl From<&Swimlane> for LaneEntry {
    fn from(lane: &Swimlane) -> Self {
        Self {
            id: lane.id,
            name: lane.name.clone(),
            manual_height: lane.height,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SwimlaneManager {
    lanes: Vec<LaneEntry>,
}

/// Remove the item at `from` and insert it at `to`.
pub fn move_index<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let len = items.len();
    if from >= len {
        return Err(Error::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(Error::IndexOutOfRange { index: to, len });
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

impl SwimlaneManager {
    pub fn new(swimlanes: &[Swimlane]) -> Self {
        Self {
            lanes: swimlanes.iter().map(LaneEntry::from).collect(),
        }
    }

    /// Adopt the order and names of a fresh snapshot.
    ///
    /// A height stored in the snapshot wins; otherwise a local override made
    /// since the last snapshot is kept so a resize does not snap back while
    /// the owner persists it.
    pub fn sync(&mut self, swimlanes: &[Swimlane]) {
        let previous = std::mem::take(&mut self.lanes);
        self.lanes = swimlanes
            .iter()
            .map(|lane| {
                let mut entry = LaneEntry::from(lane);
                if entry.manual_height.is_none() {
                    entry.manual_height = previous
                        .iter()
                        .find(|p| p.id == lane.id)
                        .and_then(|p| p.manual_height);
                }
                entry
            })
            .collect();
    }

    pub fn lanes(&self) -> &[LaneEntry] {
        &self.lanes
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.lanes.iter().map(|l| l.id).collect()
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.lanes.iter().position(|l| l.id == id)
    }

    pub fn get(&self, id: Uuid) -> Option<&LaneEntry> {
        self.lanes.iter().find(|l| l.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut LaneEntry> {
        self.lanes
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(Error::UnknownSwimlane(id))
    }

    /// Move the lane at `from` to `to`. Returns the new order.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<Vec<Uuid>> {
        move_index(&mut self.lanes, from, to)?;
        Ok(self.ids())
    }

    /// Set an explicit height, floored at [`MIN_SWIMLANE_HEIGHT`].
    pub fn resize(&mut self, id: Uuid, height: f32) -> Result<f32> {
        let height = height.max(MIN_SWIMLANE_HEIGHT);
        self.get_mut(id)?.manual_height = Some(height);
        Ok(height)
    }

    /// Drop a manual height so the lane fits its rows again.
    pub fn reset_height(&mut self, id: Uuid) -> Result<()> {
        self.get_mut(id)?.manual_height = None;
        Ok(())
    }

    pub fn rename(&mut self, id: Uuid, name: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn add(&mut self, swimlane: &Swimlane) {
        self.lanes.push(LaneEntry::from(swimlane));
    }

    /// Stop tracking a lane. What happens to its activities is the caller's call.
    pub fn remove(&mut self, id: Uuid) -> Result<LaneEntry> {
        let idx = self.index_of(id).ok_or(Error::UnknownSwimlane(id))?;
        Ok(self.lanes.remove(idx))
    }

    /// Accumulate lane bands top to bottom.
    ///
    /// `row_count` reports how many packed rows a lane holds; it only matters
    /// for lanes without a manual height.
    pub fn bands<F>(&self, metrics: &LayoutMetrics, row_count: F) -> Vec<SwimlaneBand>
    where
        F: Fn(Uuid) -> usize,
    {
        let mut top = 0.0;
        self.lanes
            .iter()
            .map(|lane| {
                let height = lane_height(row_count(lane.id), metrics, lane.manual_height);
                let band = SwimlaneBand {
                    swimlane_id: lane.id,
                    top,
                    height,
                };
                top += height;
                band
            })
            .collect()
    }
}
