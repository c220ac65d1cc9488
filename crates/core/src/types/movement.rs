//! Movement direction and derived lifecycle status.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Direction of a stock movement, as the backend encodes it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    /// Stock entering the warehouse.
    In,
    /// Stock leaving the warehouse.
    Out,
}

impl MovementType {
    /// Human-readable label for list and detail views.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::In => "Inbound",
            Self::Out => "Outbound",
        }
    }

    /// The exact wire value (`IN` / `OUT`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`MovementType`] from form input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("movement type must be IN or OUT")]
pub struct MovementTypeParseError;

impl FromStr for MovementType {
    type Err = MovementTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            _ => Err(MovementTypeParseError),
        }
    }
}

/// Lifecycle state of a movement.
///
/// The backend does not store an explicit state field; the state is derived
/// from the `authorized` and `is_cancelled` booleans it returns. Cancellation
/// wins over authorization and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementStatus {
    /// Neither authorized nor cancelled; still editable and deletable.
    Pending,
    /// Authorized; stock effect committed. May only be cancelled.
    Authorized,
    /// Cancelled; terminal regardless of prior authorization.
    Cancelled,
}

impl MovementStatus {
    /// Derive the status from the backend's two booleans.
    #[must_use]
    pub const fn from_flags(authorized: bool, is_cancelled: bool) -> Self {
        if is_cancelled {
            Self::Cancelled
        } else if authorized {
            Self::Authorized
        } else {
            Self::Pending
        }
    }

    /// Human-readable label for list and detail views.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Authorized => "Authorized",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether the movement has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for MovementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_derivation() {
        assert_eq!(
            MovementStatus::from_flags(false, false),
            MovementStatus::Pending
        );
        assert_eq!(
            MovementStatus::from_flags(true, false),
            MovementStatus::Authorized
        );
        assert_eq!(
            MovementStatus::from_flags(false, true),
            MovementStatus::Cancelled
        );
    }

    #[test]
    fn test_cancellation_wins_over_authorization() {
        // A movement cancelled after authorization is cancelled, full stop.
        assert_eq!(
            MovementStatus::from_flags(true, true),
            MovementStatus::Cancelled
        );
    }

    #[test]
    fn test_movement_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&MovementType::In).expect("serialize"),
            "\"IN\""
        );
        assert_eq!(
            serde_json::from_str::<MovementType>("\"OUT\"").expect("deserialize"),
            MovementType::Out
        );
    }

    #[test]
    fn test_movement_type_parse() {
        assert_eq!("IN".parse::<MovementType>(), Ok(MovementType::In));
        assert_eq!(" OUT ".parse::<MovementType>(), Ok(MovementType::Out));
        assert!("entrada".parse::<MovementType>().is_err());
        assert!("".parse::<MovementType>().is_err());
    }
}
