//! Logging bootstrap for hosts embedding the widget engine.
//!
//! Console output plus an optional daily-rolling NDJSON file, level-controlled
//! through `RUST_LOG` with a caller-supplied fallback filter.

pub mod logger;

pub use logger::init_logging;
