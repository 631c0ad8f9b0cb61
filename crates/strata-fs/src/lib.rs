//! Filesystem abstraction for Strata
//!
//! Provides normalized path handling, atomic I/O, an injectable file access
//! capability and format-aware document parsing for settings files.

pub mod access;
pub mod checksum;
pub mod constants;
pub mod error;
pub mod format;
pub mod io;
pub mod path;

pub use access::{FileAccess, LocalFs, MemoryFs};
pub use constants::StrataPath;
pub use error::{Error, Result};
pub use format::DocumentFormat;
pub use path::NormalizedPath;
