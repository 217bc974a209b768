//! Strongly typed string identifiers.
//!
//! Every identifier that crosses the engine boundary is a string owned by an
//! external store (layout editor, SKU-master store, run store, file import).
//! Wrapping them keeps a `PalletId` from being passed where a `LocationId`
//! is expected.  All ids serialize transparently as plain strings.

use std::fmt;

use rand::Rng;

/// Generate a typed id wrapper around `String`.
macro_rules! string_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub String);

        impl $name {
            #[inline]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// `true` if the id is empty or whitespace only.
            #[inline]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identity of a warehouse layout in the layout store.
    pub struct LayoutId;
}

string_id! {
    /// Identity of a SKU master in the SKU-master store.
    pub struct SkuMasterId;
}

string_id! {
    /// Identity of one simulation output.
    pub struct RunId;
}

string_id! {
    /// A pallet: the group of pick lines routed as a single trip.
    pub struct PalletId;
}

string_id! {
    /// Pick location exposed by a PICK cell.  Unique within a layout.
    pub struct LocationId;
}

string_id! {
    /// Stock-keeping unit code.
    pub struct Sku;
}

impl RunId {
    /// 128 random bits rendered as 32 lowercase hex digits.
    pub fn random() -> Self {
        let bits: u128 = rand::thread_rng().r#gen();
        RunId(format!("{bits:032x}"))
    }
}
