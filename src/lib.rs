//! Paddock — auth frontend for the kart-racing betting game.
//!
//! Terminates the browser-facing login/session endpoints, proxies them to
//! the game backend, owns the HTTP-only token cookies, and ships the
//! in-process session client consumed by UI layers.

pub mod client;
pub mod config;
pub mod credentials;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
