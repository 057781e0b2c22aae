//! Swimlane timeline planner for marketing activities.
//!
//! - **`model`**: `Activity`, `Swimlane` and the `Board` that owns them
//! - **`timeline`**: layout and direct-manipulation engine
//! - **`settings`**: display density, zoom and sidebar configuration
//! - **`io`**: board files

pub mod error;
pub mod io;
pub mod model;
pub mod settings;
pub mod timeline;

pub use error::{Error, Result};
