//! Identifiers for network vertices and cable runs.
//!
//! This module provides [`NodeId`] and [`SegmentId`]. Both are plain owned
//! strings with a total lexicographic order, which the layout engine relies on
//! for every tie-break. Identifiers carry no global state, so two engines
//! running on different threads never share anything through them.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from its textual form.
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Returns the textual form of the identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_identifier!(
    /// Identifier of a network vertex (connector, splice or free point).
    ///
    /// # Examples
    ///
    /// ```
    /// use wirenet_core::identifier::NodeId;
    ///
    /// let a = NodeId::new("A");
    /// let b = NodeId::from("B");
    ///
    /// assert!(a < b);
    /// assert_eq!(a, "A");
    /// ```
    NodeId
);

string_identifier!(
    /// Identifier of a segment (a physical cable run between two nodes).
    SegmentId
);
