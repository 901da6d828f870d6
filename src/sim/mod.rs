//! Disc simulation module
//!
//! All physics lives here. This module must stay free of device code:
//! - Single-threaded, one frame at a time
//! - Seeded RNG only
//! - Structural changes to the disc store are deferred to the end of a frame
//! - No rendering or sensor dependencies

pub mod collision;
pub mod disc;
pub mod forces;
pub mod merge;
pub mod params;
pub mod state;
pub mod tick;
pub mod viewport;

pub use collision::{Interaction, PassContext, PassStats, apply_impulse, interaction, reflect_at_bounds, resolve_pass};
pub use disc::{Disc, DiscColor, DiscId, DiscStore};
pub use forces::{ForceModel, TiltCalibration, dampening};
pub use merge::{MergeCandidate, consolidate, merge_discs};
pub use params::{Mode, SimParams};
pub use state::{FrameStats, Simulation};
pub use tick::{FrameInput, InputEvent, apply_event, tick};
pub use viewport::{ScreenDisc, Viewport};
