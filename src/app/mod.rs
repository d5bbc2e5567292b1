// LogSheet - app/mod.rs
//
// Application layer: session state, export settings, load/export actions.
// Dependencies: core, platform, util.

pub mod session;
pub mod settings;
pub mod state;
