//! Centralized error types for the scene.
//!
//! Asset failures are logged and leave the corresponding feature absent; entity
//! lookups degrade to no-ops where the caller guards them. Only precondition
//! violations (such as an actor model shipping too few clips) propagate out of
//! a tick.

use bevy_ecs::entity::Entity;

/// Main error type for the scene.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Failures reported by an asset loader's error callback.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    #[error("Model '{model}' has no clip at index {index} ('{name}')")]
    MissingClip { model: String, index: usize, name: &'static str },

    #[error("Clip '{0}' has a non-positive duration")]
    EmptyClip(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    #[error("Entity {0} does not exist or has no pose")]
    NotFound(Entity),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Proximity zone '{zone}' has a non-positive threshold ({threshold})")]
    InvalidThreshold { zone: String, threshold: f32 },

    #[error("Proximity zone '{zone}' has a negative hysteresis band ({band})")]
    InvalidHysteresis { zone: String, band: f32 },

    #[error("{0} must be positive")]
    NonPositive(&'static str),

    #[error("Duplicate pinned body name: {0}")]
    DuplicatePinned(String),
}

/// Failures parsing an input script line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Line {line}: expected '<frame> <action> [args..]'")]
    Malformed { line: usize },

    #[error("Line {line}: invalid frame number '{value}'")]
    InvalidFrame { line: usize, value: String },

    #[error("Line {line}: unknown action '{value}'")]
    UnknownAction { line: usize, value: String },

    #[error("Line {line}: unknown key '{value}'")]
    UnknownKey { line: usize, value: String },

    #[error("Line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
