pub mod axis;
pub mod document;
pub mod party;

pub use axis::*;
pub use document::*;
pub use party::*;
