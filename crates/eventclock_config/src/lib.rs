pub mod demo;
pub mod error;
pub mod unit;

pub use crate::demo::DemoConfig;
pub use crate::error::ConfigError;
pub use crate::unit::TimeUnit;
