//! Display configuration: density, zoom, sidebar width and card height.
//!
//! Not part of the scheduling data. Persisted as `settings.json` in the OS
//! config directory so the timeline reopens the way it was left.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::timeline::coords::{DEFAULT_ZOOM_INDEX, ZOOM_LEVELS};

/// Floor for any swimlane height, manual or computed.
pub const MIN_SWIMLANE_HEIGHT: f32 = 40.0;

/// How much each bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Density {
    /// Title only, short bars.
    Compact,
    /// Title and date range, taller bars.
    Detailed,
}

impl Density {
    pub fn default_card_height(self) -> f32 {
        match self {
            Density::Compact => 24.0,
            Density::Detailed => 40.0,
        }
    }

    pub fn shows_dates(self) -> bool {
        matches!(self, Density::Detailed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub density: Density,
    pub zoom_index: usize,
    pub sidebar_width: f32,
    /// Bar height override; `None` uses the density default.
    pub card_height: Option<f32>,
    /// Suppresses every mutating gesture. Not persisted.
    #[serde(skip)]
    pub read_only: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            density: Density::Detailed,
            zoom_index: DEFAULT_ZOOM_INDEX,
            sidebar_width: 220.0,
            card_height: None,
            read_only: false,
        }
    }
}

impl DisplaySettings {
    pub fn card_height(&self) -> f32 {
        self.card_height
            .unwrap_or_else(|| self.density.default_card_height())
            .clamp(16.0, 96.0)
    }

    pub fn zoom_index(&self) -> usize {
        self.zoom_index.min(ZOOM_LEVELS.len() - 1)
    }

    /// Row geometry used by packing heights and bar placement.
    pub fn metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            row_height: self.card_height(),
            row_gap: 4.0,
            header_padding: 12.0,
        }
    }

    /// Load settings from `path`, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Where settings live: the OS config dir, or the working directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "CampaignTimeline")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("settings.json"))
    }
}

/// Vertical row geometry inside a swimlane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub row_height: f32,
    pub row_gap: f32,
    /// Space above the first row of each lane.
    pub header_padding: f32,
}

impl LayoutMetrics {
    /// Height a lane needs to show `row_count` packed rows.
    pub fn content_height(&self, row_count: usize) -> f32 {
        row_count.max(1) as f32 * (self.row_height + self.row_gap) + self.header_padding
    }

    /// Top of row `row` relative to the lane's top edge.
    pub fn row_top(&self, row: usize) -> f32 {
        self.header_padding + row as f32 * (self.row_height + self.row_gap)
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        DisplaySettings::default().metrics()
    }
}
