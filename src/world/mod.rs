//! World module - arena setup and initial enemy placement.

mod plugin;

pub use plugin::WorldPlugin;
