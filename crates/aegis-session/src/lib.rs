//! Session & navigation authorization core for the AegisX dashboard.
//!
//! This crate contains:
//! - **TokenStore**: bearer-token persistence and fail-closed validity checks
//! - **RoutePolicy**: the pure path-authorization gate
//! - **NavigationController**: the Idle/Transitioning state machine that
//!   mediates every path transition and suppresses redirect loops
//! - **LoadingCoordinator**: reference-counted global busy indicator
//!
//! Platform effects (durable storage, browser history, wall clock) sit
//! behind small traits so the same core runs under WASM in the dashboard
//! and natively in tests.

pub mod auth;
pub mod gate;
pub mod loading;
pub mod models;
pub mod nav;
