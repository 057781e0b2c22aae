//! The timeline core: row packing, date/pixel mapping, lane geometry,
//! dependency arrows and the drag/resize interaction machine.
//!
//! Everything here is synchronous and side-effect free apart from the
//! [`TimelineController`]'s own gesture and lane state. Changes to data
//! leave as [`TimelineIntent`]s.

pub mod controller;
pub mod coords;
pub mod dependencies;
pub mod intent;
pub mod interaction;
pub mod lanes;
pub mod layout;
pub mod packing;

pub use controller::TimelineController;
pub use coords::{TimelineScale, TimelineViewport};
pub use intent::TimelineIntent;
pub use interaction::{Interaction, InteractionMachine, PointerEvent};
pub use layout::{BarZone, Hit, TimelineLayout};
