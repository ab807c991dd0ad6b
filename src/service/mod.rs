//! Boundary between the stores and whatever drives them (the CLI, a web
//! layer). Store errors are logged here and reduced to plain outcomes;
//! callers never see an error value.

use crate::error::{StorageError, ValidationError};

pub mod accounts;
pub mod inventory;

pub use accounts::{AccountService, SignUp};
pub use inventory::{Dashboard, InventoryService};

/// Result of a write as seen by the consuming layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// A user or material with the same key already exists.
    Duplicate,
    /// Input failed validation and the store was not touched.
    Rejected,
    Failed,
}

impl Outcome {
    #[must_use]
    pub fn is_done(self) -> bool {
        self == Outcome::Done
    }

    fn from_store<T>(op: &'static str, result: Result<T, StorageError>) -> Self {
        match result {
            Ok(_) => Outcome::Done,
            Err(err) if err.is_duplicate() => {
                tracing::info!(op, error = %err, "Write rejected as duplicate");
                Outcome::Duplicate
            }
            Err(err) => {
                tracing::warn!(op, error = %err, "Write failed");
                Outcome::Failed
            }
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn check_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidPrice(price))
    }
}

fn rejected(op: &'static str, err: &ValidationError) -> Outcome {
    tracing::debug!(op, error = %err, "Input rejected");
    Outcome::Rejected
}

/// Log a failed read and fall back to `default`.
fn or_log<T>(op: &'static str, result: Result<T, StorageError>, default: T) -> T {
    result.unwrap_or_else(|err| {
        tracing::warn!(op, error = %err, "Read failed");
        default
    })
}
