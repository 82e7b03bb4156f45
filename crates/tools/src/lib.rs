pub mod extract;
pub mod seats;

pub use extract::*;
