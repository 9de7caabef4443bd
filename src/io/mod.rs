//! Input/output helpers.

/// CSV export for profile tables.
pub mod export;
