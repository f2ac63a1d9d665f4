//! Particle field simulation library
//!
//! A frame-driven 2D particle simulation: circular particles integrate their
//! velocity under optional gravity, freeze on border or pairwise collapse
//! depending on runtime policy, and are pulled by attractor fields.  The
//! [`simulation::Simulation`] driver owns all state; the Bevy systems in
//! [`graphics`] and [`input`] are a thin front end over it.

pub mod collision;
pub mod config;
pub mod constants;
pub mod controls;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod input;
pub mod lifecycle;
pub mod particle;
pub mod random;
pub mod simulation;
pub mod spatial;
