//! Device simulation components for household load modeling.

/// Cycle-based household appliance model.
pub mod appliance;
/// Light bulb model with heat-gain conversion.
pub mod bulb;
pub mod types;

// Re-export the main types for convenience
pub use appliance::Appliance;
pub use appliance::ApplianceSpec;
pub use bulb::Bulb;
pub use types::Load;
pub use types::MINUTES_PER_DAY;
pub use types::OCC_SLOTS_PER_DAY;
