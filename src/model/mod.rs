//! Everything about the solar system that doesn't need a window: which bodies
//! exist, where they are, and what the pointer is doing to them.

pub mod clock;
pub mod interaction;
pub mod orrery;
pub mod registry;
pub mod starfield;

pub use clock::FrameClock;
pub use interaction::{CameraPose, Cursor, InteractionState, LookTarget, Selection};
pub use orrery::{OrbitState, Orrery};
pub use registry::{Body, BodyDetails, BodyID, BodyInfo, Registry};
