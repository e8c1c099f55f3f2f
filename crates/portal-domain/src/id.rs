//! Newtype wrappers for record identifiers.
//!
//! Ids are opaque strings. Documents written by older clients carry
//! base36 timestamp ids, so the wrappers never assume a UUID shape.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Fresh client-side id (time-ordered, assumed collision-free).
            pub fn generate() -> Self {
                Self(Uuid::now_v7().simple().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_owned()))
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

record_id!(
    /// Identifies an account.
    AccountId
);

record_id!(
    /// Identifies a department.
    DepartmentId
);

record_id!(
    /// Identifies an employee record (not the display code).
    EmployeeId
);

record_id!(
    /// Identifies a submitted request.
    RequestId
);
