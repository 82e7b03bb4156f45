//! Coalition aggregation over a loaded party table.
//!
//! Everything here is browser-free: the page controller feeds checkbox
//! states and the location search string in, and gets selections, derived
//! statistics, marker geometry and a rewritten search string back.

pub mod display;
pub mod marker;
pub mod query;
pub mod reducer;
pub mod selection;
pub mod stats;
pub mod table;

pub use display::*;
pub use marker::*;
pub use query::*;
pub use reducer::*;
pub use selection::*;
pub use stats::*;
pub use table::*;
