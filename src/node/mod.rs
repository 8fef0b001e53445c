pub mod conversion;
pub mod definition;
pub mod index;
pub mod raw;

pub use conversion::*;
pub use definition::*;
pub use index::*;
pub use raw::*;
