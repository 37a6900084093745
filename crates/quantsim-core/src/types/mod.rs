//! Core data types for the simulation engine.

mod bar;
mod dataset;
mod fill;
mod position;

pub use bar::Bar;
pub use dataset::{Dataset, StepBars};
pub use fill::{Fill, Side};
pub use position::Position;
