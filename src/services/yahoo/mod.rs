//! Yahoo Finance daily bars over the public chart API.

pub mod client;
pub mod messages;
pub mod provider;

pub use client::{YahooRestClient, DEFAULT_BASE_URL};
pub use provider::YahooMarketDataProvider;
