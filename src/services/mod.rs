//! Outbound service clients used by the route handlers.

pub mod gateway;
