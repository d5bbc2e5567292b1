// LogSheet - core/mod.rs
//
// Core business logic layer: parse -> filter -> derive -> summarise ->
// assemble -> render.
// Must NOT depend on: app, platform, or any filesystem access.

pub mod assemble;
pub mod derive;
pub mod export;
pub mod filter;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod summary;
