//! Standard store hooks.

mod filter;
mod logging;

pub use filter::FilterHook;
pub use logging::LoggingHook;
