//! Store-assigned numeric identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raised when a store-assigned identifier is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdValidationError;

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identifier must be a positive integer")
    }
}

impl std::error::Error for IdValidationError {}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        #[serde(try_from = "i64", into = "i64")]
        #[schema(value_type = i64, example = 1)]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(raw: i64) -> Result<Self, IdValidationError> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err(IdValidationError)
                }
            }

            /// Raw value for persistence filters.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a stored genre.
    GenreId
);
define_id!(
    /// Identifier of a stored question.
    QuestionId
);
define_id!(
    /// Identifier of a stored choice.
    ChoiceId
);
define_id!(
    /// Identifier of a stored answer.
    AnswerId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-7)]
    fn non_positive_ids_are_rejected(#[case] raw: i64) {
        assert_eq!(QuestionId::new(raw), Err(IdValidationError));
    }

    #[test]
    fn serde_rejects_zero() {
        let result: Result<GenreId, _> = serde_json::from_str("0");
        assert!(result.is_err());
        let id: GenreId = serde_json::from_str("12").expect("positive id");
        assert_eq!(id.get(), 12);
    }
}
