//! Aircon bridge: library crate for the LINE webhook server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `ac-e2e-tests`) can reach `AppState`, `build_router` and the
//! dispatch pipeline.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod routes;
pub mod state;
