pub mod health;
pub mod metrics;
pub mod protocols;
pub mod strategy;
pub mod ws;
