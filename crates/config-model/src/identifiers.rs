//! Newtype coordinate identifiers.
//!
//! The three parts of a configuration coordinate are all strings on the wire,
//! but swapping an application name for a profile name silently addresses the
//! wrong document. Each part is therefore a distinct newtype.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label used when the caller does not name one.
pub const DEFAULT_LABEL: &str = "main";

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Name of the application whose configuration is requested (e.g. `"orders-svc"`).
    ApplicationName
}

string_id! {
    /// Environment profile of the application (e.g. `"dev"`, `"prod"`).
    ProfileName
}

string_id! {
    /// Branch or tag in the configuration repository (e.g. `"main"`).
    Label
}

impl Label {
    /// Returns the `"main"` label.
    pub fn main() -> Self {
        Self(DEFAULT_LABEL.to_string())
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::main()
    }
}

// ---------------------------------------------------------------------------

/// Correlates the request and response records emitted for one dispatched call.
///
/// Generated fresh for every call; never sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new random request identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
