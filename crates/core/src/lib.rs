pub mod config;
pub mod error;
pub mod event_bus;
pub mod types;

pub use config::AppConfig;
pub use error::{DialerError, DialerResult};
