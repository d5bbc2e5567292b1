// LogSheet - lib.rs
//
// Library entry point, exposing every layer for the command-line front end
// and for integration testing.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
