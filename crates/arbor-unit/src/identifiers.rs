use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::UnitError;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: String) -> Self {
                Self(value)
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, UnitError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(UnitError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

newtype!(
    OwnerId,
    "Stable identifier for unit owners (`kind:name`, lowercase, URL-safe).",
    r"^(human|service|agent|org):[a-z][a-z0-9_-]{0,62}$"
);
newtype!(
    Nonce,
    "Per-unit nonce: 16 to 64 lowercase hex characters.",
    r"^[0-9a-f]{16,64}$"
);
newtype!(
    Credential,
    "Opaque credential token: 8 to 128 URL-safe characters.",
    r"^[A-Za-z0-9_-]{8,128}$"
);
newtype!(
    Timestamp,
    "UTC RFC3339 timestamp with `Z` suffix.",
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z$"
);
