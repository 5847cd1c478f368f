//! Step definitions for the close-task scenarios.

pub mod world;

mod given;
mod then;
mod when;
