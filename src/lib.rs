//! Farmstead library crate — re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the actual game entry point.
//! This library crate exposes the same modules so that `tests/` integration
//! tests can drive the simulation without needing a window or GPU.

pub mod shared;
pub mod input;
pub mod calendar;
pub mod player;
pub mod farming;
pub mod actions;
pub mod ui;
pub mod data;
