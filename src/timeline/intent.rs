//! Requests the timeline emits for its owner to apply.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::Activity;

/// Requests the timeline hands to the surrounding application.
///
/// The timeline never applies these to the activity snapshot itself; the
/// owner persists them and supplies a fresh snapshot on the next frame.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineIntent {
    /// Committed move or resize. Carries the whole activity with the new
    /// start, end and swimlane; every other field is unchanged.
    Update(Activity),
    /// Committed swimlane reorder, as the full list of ids in their new order.
    ReorderSwimlanes(Vec<Uuid>),
    QuickCreate {
        start: NaiveDate,
        end: NaiveDate,
        swimlane_id: Uuid,
    },
    Duplicate(Uuid),
    DeleteActivity(Uuid),
    /// Plain click on a bar: open the activity for viewing or editing.
    Edit(Activity),
    RenameSwimlane {
        swimlane_id: Uuid,
        name: String,
    },
    ResizeSwimlane {
        swimlane_id: Uuid,
        height: f32,
    },
    /// Drop a lane's manual height so it fits its rows again.
    ResetSwimlaneHeight(Uuid),
    AddSwimlane {
        name: String,
    },
    DeleteSwimlane(Uuid),
}

impl TimelineIntent {
    /// Whether this intent changes data. Suppressed when the timeline is read-only.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Edit(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Update(_) => "update",
            Self::ReorderSwimlanes(_) => "reorder-swimlanes",
            Self::QuickCreate { .. } => "quick-create",
            Self::Duplicate(_) => "duplicate",
            Self::DeleteActivity(_) => "delete-activity",
            Self::Edit(_) => "edit",
            Self::RenameSwimlane { .. } => "rename-swimlane",
            Self::ResizeSwimlane { .. } => "resize-swimlane",
            Self::ResetSwimlaneHeight(_) => "reset-swimlane-height",
            Self::AddSwimlane { .. } => "add-swimlane",
            Self::DeleteSwimlane(_) => "delete-swimlane",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn viewing_intents_are_not_mutating() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let activity = Activity::new("Webinar", day, day, Uuid::new_v4());
        assert!(!TimelineIntent::Edit(activity).is_mutating());
        assert!(TimelineIntent::ResetSwimlaneHeight(Uuid::new_v4()).is_mutating());
        assert!(TimelineIntent::Duplicate(Uuid::new_v4()).is_mutating());
        assert!(TimelineIntent::AddSwimlane { name: "Events".into() }.is_mutating());
    }
}
