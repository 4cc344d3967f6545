pub mod error;
pub mod geometry;
pub mod math;
pub mod placement;
pub mod room;
pub mod scene;
pub mod tessellation;

pub use error::{Result, RoomError};
