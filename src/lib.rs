//! Minute-resolution household electrical load profile simulator.

pub mod config;
pub mod data;
/// Device models for household loads (bulbs, appliances).
pub mod devices;
pub mod io;
/// Simulation engines, calendar, orchestrator, and resampling modules.
pub mod sim;
