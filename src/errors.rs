//! Error types with diagnostics using miette
//!
//! Coordinate conversion never fails. Errors come from building a scene
//! with unusable sizes, from addressing a node the wrong way, or from XML
//! serialization.

use miette::Diagnostic;
use thiserror::Error;

use crate::scene::NodeId;
use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors that occur while turning a `SceneConfig` into a `Scene`
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid scene {dimension}: {source}")]
    #[diagnostic(
        code(phy::config::scene_size),
        help("scene sizes are in pixels and must be positive")
    )]
    SceneSize {
        dimension: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("invalid user {dimension}: {source}")]
    #[diagnostic(
        code(phy::config::extent),
        help("the user-unit width or height must be positive; leave both unset for the default of 20")
    )]
    Extent {
        dimension: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("invalid origin: {source}")]
    #[diagnostic(code(phy::config::origin))]
    Origin {
        #[source]
        source: NumericError,
    },

    #[error("invalid frame rate: {source}")]
    #[diagnostic(code(phy::config::fps))]
    Fps {
        #[source]
        source: NumericError,
    },

    #[error("unknown renderer type: {name}")]
    #[diagnostic(code(phy::config::renderer), help("supported renderer types: svg"))]
    UnknownRenderer { name: String },
}

// ============================================================================
// Scene Errors
// ============================================================================

/// Errors raised by scene-graph operations
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown node {0}")]
    #[diagnostic(
        code(phy::scene::unknown_node),
        help("node ids are only valid in the scene that created them")
    )]
    UnknownNode(NodeId),

    #[error("node {id} is a {kind}, not a line")]
    #[diagnostic(code(phy::scene::not_a_line))]
    NotALine { id: NodeId, kind: &'static str },

    #[error("node {id} is a {kind}, not a group")]
    #[diagnostic(code(phy::scene::not_a_group))]
    NotAGroup { id: NodeId, kind: &'static str },

    #[error("cannot attach node {child} under its own descendant {parent}")]
    #[diagnostic(code(phy::scene::cycle))]
    Cycle { parent: NodeId, child: NodeId },

    #[error("invalid axis {field}: {source}")]
    #[diagnostic(
        code(phy::scene::axis),
        help("an axis needs finish > start, a positive step and length, and a finite extension")
    )]
    Axis {
        field: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("SVG serialization failed: {message}")]
    #[diagnostic(code(phy::render::svg))]
    Render { message: String },
}
