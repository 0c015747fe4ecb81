//! Error Types
//!
//! This module defines the error types used throughout the export core.
//!
//! # Overview
//!
//! The main error type [`RigkitError`] covers all failure modes including:
//! - Scene serialization rejections
//! - Container packing errors (JSON / base64)
//! - Per-clip humanoid bake failures
//! - Parent restoration errors after an export
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, RigkitError>`.

use thiserror::Error;

/// The main error type for the export core.
///
/// Every failure is caught and logged at the component boundary where it
/// occurs; nothing is allowed to propagate past
/// [`ExportOrchestrator::export`](crate::export::orchestrator::ExportOrchestrator::export),
/// which reports per-file outcomes instead.
#[derive(Error, Debug)]
pub enum RigkitError {
    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// The generic scene serializer rejected the export subtree.
    #[error("Scene serialization failed: {0}")]
    SerializationFailed(String),

    /// JSON encoding error while building a glTF document.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Base64 decoding error (inline buffer payload or data URL).
    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    // ========================================================================
    // Export Pipeline Errors
    // ========================================================================
    /// A mesh had no recorded (or no surviving) original parent when
    /// parenting was restored after an export.
    #[error("No original parent recorded for node '{0}' after export")]
    ReparentFailed(String),

    /// Humanoid retargeting failed for one clip; other clips still process.
    #[error("Humanoid bake failed for clip '{clip}': {reason}")]
    BakeFailed {
        /// Name of the clip that failed to bake
        clip: String,
        /// Human-readable failure cause
        reason: String,
    },

    /// File delivery rejected a produced file.
    #[error("File delivery failed for '{filename}': {reason}")]
    DeliveryFailed {
        /// Target filename of the failed delivery
        filename: String,
        /// Human-readable failure cause
        reason: String,
    },
}

/// Alias for `Result<T, RigkitError>`.
pub type Result<T> = std::result::Result<T, RigkitError>;
