//! Terminal rendition of the live strategy dashboard: polls the API, prints
//! the strategy card and protocol scoring, and forwards user commands as
//! strategy actions.

pub mod client;
pub mod format;
pub mod render;
pub mod runner;

pub use client::{AegisClient, ClientError};
pub use runner::{run_dashboard, Command, Dashboard};
