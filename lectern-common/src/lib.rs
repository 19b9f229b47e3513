//! # Lectern Common Library
//!
//! Shared code for the Lectern recording archive:
//! - Error types
//! - Archive root resolution and TOML configuration
//! - Lecture time windows and composite folder names
//! - Module display color records

pub mod color;
pub mod config;
pub mod error;
pub mod timewindow;

pub use color::DisplayColor;
pub use error::{Error, Result};
pub use timewindow::TimeWindow;
