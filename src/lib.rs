pub mod config;
pub mod error;
pub mod directory;
pub mod datasets;
pub mod geoip;
pub mod location;
pub mod wizard;
pub mod session;
pub mod scraper;
pub mod dashboard;

pub use error::{GatewayError, Result};
