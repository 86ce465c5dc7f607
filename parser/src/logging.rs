//! FILENAME: parser/src/logging.rs
//! PURPOSE: Category-tagged logging macros shared by the parser and engine crates.
//! CONTEXT: Thin wrappers over the `log` facade. The category becomes the log
//! target so a host can filter e.g. only "EVAL" records. Nothing here installs
//! a logger; that is the host application's job.

#[doc(hidden)]
pub use log;

#[macro_export]
macro_rules! log_trace {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::trace!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::warn!(target: $cat, $($arg)*)
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_debug;`
pub use log_debug;
pub use log_info;
pub use log_trace;
pub use log_warn;
