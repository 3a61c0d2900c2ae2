//! Strongly-typed identifiers for domain entities
//!
//! Using newtype wrappers around UUIDs provides type safety and prevents
//! accidental mixing of different identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Contract domain identifiers
define_id!(ContractId, "CON");
define_id!(PaymentId, "PAY");
define_id!(BeneficiaryId, "BEN");

// Insurance catalog identifiers
define_id!(InsuranceId, "INS");
define_id!(ConditionId, "CND");

// Client identifiers
define_id!(ClientId, "CLI");
define_id!(AttachmentId, "ATT");

// Refund domain identifiers
define_id!(RefundRequestId, "RFD");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_id_display() {
        let id = ContractId::new();
        let display = id.to_string();
        assert!(display.starts_with("CON-"));
    }

    #[test]
    fn test_id_parsing() {
        let original = ContractId::new();
        let parsed: ContractId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let refund_id = RefundRequestId::from(uuid);
        let back: Uuid = refund_id.into();
        assert_eq!(uuid, back);
    }
}
