//! Status taxonomies shared by classification and presentation
//!
//! Every enumerated field of a record (payment status, ticket status, asset
//! kind, ...) is a closed set of wire values. Values outside the set are kept
//! verbatim so they re-serialize unchanged, and are presented like the
//! taxonomy's fallback member.

use serde::{Deserialize, Serialize};

/// Presentation class of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Gray
    Neutral,
    /// Blue
    Info,
    /// Green
    Success,
    /// Yellow
    Warning,
    /// Orange
    Caution,
    /// Red
    Danger,
    /// Purple
    Accent,
}

/// Common interface of a status taxonomy
pub trait Taxonomy {
    /// Wire values of every known member, in display order
    const KNOWN: &'static [&'static str];

    /// Wire value (the raw value for unknown members)
    fn as_str(&self) -> &str;

    /// Human-readable label
    fn label(&self) -> &str;

    /// Badge tone
    fn tone(&self) -> Tone;

    /// Whether the value belongs to the known set
    fn is_known(&self) -> bool;
}

/// Declares a taxonomy enum with an `Other(String)` catch-all
///
/// `fallback` names the member used as the default value and as the
/// presentation of unknown values.
macro_rules! taxonomy {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident (fallback = $fallback:ident) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($wire:literal, $label:literal, $tone:ident)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "Option<::serde_json::Value>", into = "String")]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// Value outside the known set, kept verbatim
            Other(String),
        }

        impl $crate::models::Taxonomy for $name {
            const KNOWN: &'static [&'static str] = &[$($wire),+];

            fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(raw) => raw.as_str(),
                }
            }

            fn label(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Other(raw) => raw.as_str(),
                }
            }

            fn tone(&self) -> $crate::models::Tone {
                match self {
                    $(Self::$variant => $crate::models::Tone::$tone,)+
                    Self::Other(_) => <Self as $crate::models::Taxonomy>::tone(&Self::$fallback),
                }
            }

            fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$fallback
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                match raw.trim() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(raw.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::from(raw.as_str())
            }
        }

        impl From<Option<String>> for $name {
            fn from(raw: Option<String>) -> Self {
                raw.map(Self::from).unwrap_or_default()
            }
        }

        impl From<Option<::serde_json::Value>> for $name {
            fn from(raw: Option<::serde_json::Value>) -> Self {
                Self::from(raw.as_ref().and_then($crate::models::lenient::scalar_text))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                match value {
                    $name::Other(raw) => raw,
                    known => $crate::models::Taxonomy::as_str(&known).to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::models::Taxonomy::as_str(self))
            }
        }
    };
}

pub(crate) use taxonomy;
