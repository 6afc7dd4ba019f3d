//! Error types for the settings crate.
//!
//! This module provides structured error types for overlay configuration
//! files, validation, and preset management.

use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file could not be loaded.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// The configuration file could not be saved.
    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// A configuration validation error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A preset operation failed.
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),
}

/// Errors related to configuration validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A configuration value is out of valid range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },

    /// The platform has no configuration directory.
    #[error("No configuration directory available")]
    NoConfigDirectory,
}

/// Errors related to geometry presets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresetError {
    /// No preset with this id exists.
    #[error("Preset not found: {0}")]
    NotFound(String),

    /// Builtin presets cannot be saved over or deleted.
    #[error("Preset '{0}' is builtin and immutable")]
    Builtin(String),

    /// A preset name is empty.
    #[error("Preset name must not be empty")]
    EmptyName,
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
