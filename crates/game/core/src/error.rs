//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g. `InventoryError`, `CombatError`) are defined in
//! their respective modules alongside the operations they validate. This module
//! provides the classification shared by all of them.
//!
//! No error produced by the core is fatal to the game: every failure leaves the
//! state untouched and the caller decides whether to re-prompt, skip or fall back.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the action can be retried or replaced (mana too low,
///   inventory full, failed load falling back to a new game)
/// - **Validation**: invalid input that should be re-prompted (bad index,
///   unknown direction or command)
/// - **Internal**: unexpected state inconsistency (a bug)
/// - **Fatal**: the surrounding application cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable, SCREAMING_SNAKE_CASE code per variant
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
