// LogSheet - platform/mod.rs
//
// Platform abstraction layer: file reading/writing and the preset file.
// Dependencies: standard library, toml, serde.
// Must NOT depend on: core, app.

pub mod config;
pub mod fs;
