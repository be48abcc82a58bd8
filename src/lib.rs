pub mod api;
pub mod config;
pub mod dates;
pub mod offer;
pub mod provider;
pub mod search;
