pub mod bounds;

pub use bounds::{Bounds, total_area};
