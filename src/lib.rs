//! Simulation core for an interactive 3D showroom scene.
//!
//! A user-controlled actor walks a room; proximity to a console reveals a slider,
//! walking past the gate line slides the gate open, and decorative bodies are held
//! in place against physics drift. Rendering, overlay UI, physics and media are
//! reached only through the traits in [`sinks`].

pub mod app;
pub mod assets;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod platform;
pub mod script;
pub mod simulation;
pub mod sinks;
pub mod systems;
