//! Logging
//!
//! Leveled logger trait used by the reader and the exporter.

mod console_logger;
mod logger;

pub use console_logger::ConsoleLogger;
pub use logger::{LogLevel, Logger, NullLogger};
