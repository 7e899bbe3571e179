//! State machine module for the analysis dashboard
//!
//! Provides an explicit dashboard state with two modes:
//! - Inactive: values frozen, gauge resting at 50, no ticks
//! - Active: confidence random-walks and indicators re-draw every tick
//!
//! The controller drives the state from commands and a periodic ticker.

mod controller;
mod machine;

pub use controller::{DashboardCommand, DashboardController, DashboardStatus, StatusReply};
pub use machine::{Dashboard, DashboardSnapshot, ResetPolicy};
