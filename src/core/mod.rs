

pub mod config;
pub mod error;

pub use self::config::{SearchConfig, SearchLimits};
pub use self::error::{PadronError, Result};
