//! Coded business enums
//!
//! Persistence layers store these as small integer codes; service layers
//! want the variants. [`CodedEnum`] ties the two together and gives every
//! enum a uniform `from_code` / `label_for` resolution surface.

use serde::{Deserialize, Serialize};

/// An enum with a stable storage code and a display label.
pub trait CodedEnum: Sized + Copy + 'static {
    /// Storage code type, usually a small integer.
    type Code: PartialEq + Copy;

    /// Stable code stored in the database.
    fn code(&self) -> Self::Code;

    /// Human-readable label.
    fn label(&self) -> &'static str;

    /// Every variant, in declaration order.
    fn variants() -> &'static [Self];

    /// Resolve a variant by its code.
    fn from_code(code: Self::Code) -> Option<Self> {
        Self::variants().iter().copied().find(|variant| variant.code() == code)
    }

    /// Resolve a label by code, falling back to `default` for unknown codes.
    fn label_for(code: Self::Code, default: &'static str) -> &'static str {
        Self::from_code(code).map_or(default, |variant| variant.label())
    }
}

/// Yes/no flag, stored as `TINYINT(1)` (1 = yes, 0 = no).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YesNo {
    /// Affirmative, stored as 1.
    Yes,
    /// Negative, stored as 0.
    No,
}

impl YesNo {
    /// Convert from a bool.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }

    /// The flag as a bool.
    pub fn as_bool(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl CodedEnum for YesNo {
    type Code = u8;

    fn code(&self) -> u8 {
        match self {
            Self::Yes => 1,
            Self::No => 0,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    fn variants() -> &'static [Self] {
        &[Self::Yes, Self::No]
    }
}

/// Whether a record is usable, stored as `TINYINT(1)` (1 = enabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnableStatus {
    /// Record is active, stored as 1.
    Enabled,
    /// Record is switched off, stored as 0.
    Disabled,
}

impl CodedEnum for EnableStatus {
    type Code = u8;

    fn code(&self) -> u8 {
        match self {
            Self::Enabled => 1,
            Self::Disabled => 0,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }

    fn variants() -> &'static [Self] {
        &[Self::Enabled, Self::Disabled]
    }
}

/// Soft-deletion marker, stored as `TINYINT(1)` (1 = deleted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteStatus {
    /// Record is live, stored as 0.
    Active,
    /// Record is soft-deleted, stored as 1.
    Deleted,
}

impl CodedEnum for DeleteStatus {
    type Code = u8;

    fn code(&self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Deleted => 1,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }

    fn variants() -> &'static [Self] {
        &[Self::Active, Self::Deleted]
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for enums.
    use super::*;

    /// Validates `CodedEnum::from_code` behavior for the resolution scenario.
    ///
    /// Assertions:
    /// - Known codes resolve to their variant; unknown codes resolve to
    ///   `None`.
    #[test]
    fn test_from_code_resolution() {
        assert_eq!(YesNo::from_code(1), Some(YesNo::Yes));
        assert_eq!(YesNo::from_code(0), Some(YesNo::No));
        assert_eq!(YesNo::from_code(7), None);

        assert_eq!(EnableStatus::from_code(1), Some(EnableStatus::Enabled));
        assert_eq!(DeleteStatus::from_code(1), Some(DeleteStatus::Deleted));
    }

    /// Validates `CodedEnum::label_for` falls back for unknown codes.
    #[test]
    fn test_label_for_with_fallback() {
        assert_eq!(YesNo::label_for(1, "unknown"), "yes");
        assert_eq!(YesNo::label_for(9, "unknown"), "unknown");
    }

    /// Validates `YesNo` bool conversions round-trip.
    #[test]
    fn test_yes_no_bool_round_trip() {
        assert_eq!(YesNo::from_bool(true), YesNo::Yes);
        assert_eq!(YesNo::from_bool(false), YesNo::No);
        assert!(YesNo::Yes.as_bool());
        assert!(!YesNo::No.as_bool());
    }

    /// Validates the serde wire form uses screaming snake case names.
    #[test]
    fn test_serde_wire_form() {
        assert_eq!(serde_json::to_string(&EnableStatus::Enabled).unwrap(), "\"ENABLED\"");
        let back: DeleteStatus = serde_json::from_str("\"DELETED\"").unwrap();
        assert_eq!(back, DeleteStatus::Deleted);
    }

    /// Validates every variant's code round-trips through `from_code`.
    #[test]
    fn test_codes_round_trip_for_all_variants() {
        for variant in YesNo::variants() {
            assert_eq!(YesNo::from_code(variant.code()), Some(*variant));
        }
        for variant in EnableStatus::variants() {
            assert_eq!(EnableStatus::from_code(variant.code()), Some(*variant));
        }
        for variant in DeleteStatus::variants() {
            assert_eq!(DeleteStatus::from_code(variant.code()), Some(*variant));
        }
    }
}
