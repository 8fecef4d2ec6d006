//! Rendering backends
//!
//! - `defaults`: Default sizes and settings
//! - `svg`: SVG generation

pub mod defaults;
pub mod svg;

use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Renderer type named in the scene configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RendererKind {
    #[default]
    Svg,
}

impl FromStr for RendererKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(RendererKind::Svg),
            _ => Err(ConfigError::UnknownRenderer { name: s.to_string() }),
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererKind::Svg => write!(f, "svg"),
        }
    }
}
