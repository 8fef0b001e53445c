//! Screen structure extraction: device and layout inference over a component tree.

mod builder;
pub mod layout;
mod model;

pub use builder::ScreenBuilder;
pub use model::*;
