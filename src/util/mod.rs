//! Errors and logging setup shared by the core and the driver.

mod error;
pub mod logging;

pub use error::{ConfigError, TimingError};
pub use logging::init_logging;
