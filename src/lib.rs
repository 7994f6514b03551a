//! Step-by-step fill preview for water-sort tube layouts.

pub mod config;
pub mod errors;
pub mod filler;
pub mod model;
pub mod palette;
pub mod playback;
pub mod wizard;
