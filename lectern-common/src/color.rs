//! Module display color records
//!
//! A module's color is persisted as a text field inside `module_info.txt`.
//! The current write format is four fixed-point components `r,g,b,a`; the
//! reader additionally accepts the legacy `Color(r, g, b, a, ...)` debug
//! shape found in archives written by earlier releases. Parsing never
//! fails hard: anything unreadable falls back to black.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Legacy color field shape: `Color(r, g, b, a, <colorspace>)`
static LEGACY_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Color\(([\d.]+), ([\d.]+), ([\d.]+), ([\d.]+).*?\)").unwrap());

/// RGBA display color with components in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl DisplayColor {
    /// Opaque black, the documented fallback for unreadable records
    pub const BLACK: DisplayColor = DisplayColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Opaque red
    pub const RED: DisplayColor = DisplayColor {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a persisted color field, accepting both the current
    /// `r,g,b,a` format and the legacy `Color(r, g, b, a, ...)` shape.
    ///
    /// Soft-fails to [`DisplayColor::BLACK`] on anything unreadable.
    pub fn parse(field: &str) -> DisplayColor {
        let field = field.trim();

        if let Some(color) = Self::parse_versioned(field) {
            return color;
        }
        if let Some(color) = Self::parse_legacy(field) {
            return color;
        }

        tracing::warn!("Unreadable color field {:?}, defaulting to black", field);
        DisplayColor::BLACK
    }

    /// Current format: four comma-separated decimal components
    fn parse_versioned(field: &str) -> Option<DisplayColor> {
        let mut parts = field.split(',');
        let color = DisplayColor {
            r: parts.next()?.trim().parse().ok()?,
            g: parts.next()?.trim().parse().ok()?,
            b: parts.next()?.trim().parse().ok()?,
            a: parts.next()?.trim().parse().ok()?,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(color)
    }

    /// Legacy format: the platform color object's debug representation
    fn parse_legacy(field: &str) -> Option<DisplayColor> {
        let captures = LEGACY_COLOR.captures(field)?;
        Some(DisplayColor {
            r: captures[1].parse().ok()?,
            g: captures[2].parse().ok()?,
            b: captures[3].parse().ok()?,
            a: captures[4].parse().ok()?,
        })
    }
}

impl Default for DisplayColor {
    fn default() -> Self {
        DisplayColor::BLACK
    }
}

impl fmt::Display for DisplayColor {
    /// The persisted write format: `r,g,b,a` with fixed three-decimal fields
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3},{:.3},{:.3},{:.3}",
            self.r, self.g, self.b, self.a
        )
    }
}
