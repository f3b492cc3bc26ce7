//! GraphQuest - graph engine for a shortest-path puzzle game
//!
//! This crate generates seeded random directed weighted graphs, computes the
//! optimal route from a start node to a goal node through a set of required
//! nodes, and validates and scores the paths players submit against it.
//! Transport, persistence and presentation are left to the host application.

pub mod api;
pub mod config;
pub mod core;
pub mod services;
pub mod utils;
