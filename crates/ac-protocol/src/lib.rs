pub mod commands;
pub mod topics;

pub use commands::*;
