//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `UserId` where a `BankId` is expected.
//! Identities are assigned by the storage collaborator; `0` means "not yet stored".

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Identity of a record that has not been stored yet.
            pub const UNASSIGNED: Self = Self(0);

            /// Creates an ID from a raw storage identity.
            #[must_use]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Returns the raw storage identity.
            #[must_use]
            pub const fn into_inner(self) -> u32 {
                self.0
            }

            /// Returns true once storage has assigned an identity.
            #[must_use]
            pub const fn is_assigned(self) -> bool {
                self.0 > 0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(BankId, "Unique identifier for a bank.");
typed_id!(AccountId, "Unique identifier for a bank account.");
typed_id!(InvestmentId, "Unique identifier for an investment.");
typed_id!(ExpenseId, "Unique identifier for a recurring monthly expense.");

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
