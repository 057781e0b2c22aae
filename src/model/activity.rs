use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A titled, date-ranged unit of marketing work shown as a bar on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub title: String,
    /// First day of the activity (inclusive).
    pub start: NaiveDate,
    /// Last day of the activity (inclusive).
    pub end: NaiveDate,
    pub swimlane_id: Uuid,
    /// Prerequisite activity ids. Only the forward edge is stored.
    #[serde(default)]
    pub dependencies: Vec<Uuid>,
    #[serde(default)]
    pub description: String,
    /// Spend counted against the swimlane budget.
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(with = "color_serde")]
    pub color: Color32,
}

impl Activity {
    /// Create a new activity with a fresh id and the default bar color.
    pub fn new(
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        swimlane_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start,
            end,
            swimlane_id,
            dependencies: Vec::new(),
            description: String::new(),
            cost: None,
            color: Color32::from_rgb(70, 130, 180), // Steel blue
        }
    }

    pub fn with_dependency(mut self, prerequisite: Uuid) -> Self {
        self.dependencies.push(prerequisite);
        self
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Date range with the end clamped to the start.
    ///
    /// Upstream data is not trusted to keep `start <= end`; every place that
    /// lays out or manipulates an activity reads its range through here.
    pub fn normalized_range(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end.max(self.start))
    }

    /// Copy of this activity with its range normalized.
    pub fn normalized(&self) -> Self {
        let (start, end) = self.normalized_range();
        Self {
            start,
            end,
            ..self.clone()
        }
    }

    /// Number of days covered, counting both ends.
    pub fn span_days(&self) -> i64 {
        let (start, end) = self.normalized_range();
        (end - start).num_days() + 1
    }

    /// True if the start, end or swimlane differ from `other`.
    pub fn placement_differs(&self, other: &Activity) -> bool {
        self.start != other.start || self.end != other.end || self.swimlane_id != other.swimlane_id
    }

    /// Copy with a new id, used by the duplicate gesture.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: format!("{} (copy)", self.title),
            ..self.clone()
        }
    }
}

/// Serde helper for `Color32`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        color.to_array().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [r, g, b, a]: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Color32::from_rgba_premultiplied(r, g, b, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn inverted_range_is_normalized() {
        let a = Activity::new("Launch email", date(3, 10), date(3, 4), Uuid::new_v4());
        assert_eq!(a.normalized_range(), (date(3, 10), date(3, 10)));
        assert_eq!(a.span_days(), 1);
    }

    #[test]
    fn span_counts_both_ends() {
        let a = Activity::new("Webinar promo", date(1, 1), date(1, 5), Uuid::new_v4());
        assert_eq!(a.span_days(), 5);
    }

    #[test]
    fn duplicate_gets_fresh_id_and_keeps_placement() {
        let a = Activity::new("Billboard", date(2, 1), date(2, 14), Uuid::new_v4());
        let copy = a.duplicate();
        assert_ne!(copy.id, a.id);
        assert!(!copy.placement_differs(&a));
        assert_eq!(copy.title, "Billboard (copy)");
    }

    #[test]
    fn color_survives_json() {
        let a = Activity::new("Podcast ad", date(4, 1), date(4, 2), Uuid::new_v4())
            .with_color(Color32::from_rgb(1, 2, 3));
        let json = serde_json::to_string(&a).unwrap();
        let back: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
