//! User-role detection from layer names and ancestry.

mod detector;
mod model;

pub use detector::{RoleDetector, RoleSignal};
pub use model::*;
