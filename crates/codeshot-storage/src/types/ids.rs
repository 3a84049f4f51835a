//! Strongly-typed identifiers (avoid mixing plain strings arbitrarily).
//!
//! Identifiers are opaque strings on the wire: lookups must accept whatever
//! the client sends (a malformed id is simply "not found", never a parse
//! error). Freshly generated ids are UUIDv7 strings, so they are time-ordered
//! and never collide with client-supplied sentinels like `"temp"`.

use std::fmt;

use uuid::Uuid;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a fresh time-ordered identifier.
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// User identifier.
    UserId
);
string_id!(
    /// Preset identifier.
    PresetId
);
string_id!(
    /// Project identifier.
    ProjectId
);
string_id!(
    /// Editor tab identifier.
    TabId
);
