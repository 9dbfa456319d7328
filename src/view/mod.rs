//! Derived views: read-only projections of the current filtered rows.

pub mod chart;
pub mod correlation;
pub mod gauge;
