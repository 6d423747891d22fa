//! swap-api: HTTP API layer for swapd
//!
//! Provides a JSON API for the browser front-end and wallet to drive quotes,
//! allowance checks, and unsigned transaction building.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{ApiError, AppState, PendingRecord, PendingStatus, SwapSession, WalletState};
