//! Endpoint-specific API operations.

pub mod uploads;
