//! Strongly-typed identifiers for DigitalOcean resources.
//!
//! DigitalOcean v1 identifies every resource by an integer. Wrapping each
//! kind in its own type keeps a size id from being passed where an image id
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed integer identifier types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                s.trim().parse::<u64>().map(Self).map_err(|_| {
                    Error::ConfigError(format!(
                        "invalid {}: `{s}`",
                        stringify!($name)
                    ))
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(DropletId, "Droplet identifier");
id_type!(ImageId, "Image identifier");
id_type!(SizeId, "Size identifier");
id_type!(RegionId, "Region identifier");
id_type!(SshKeyId, "SSH key identifier");
id_type!(DomainId, "Domain identifier");
id_type!(RecordId, "Domain record identifier");

/// A domain addressed either by numeric id or by its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainRef {
    /// Numeric domain id.
    Id(DomainId),
    /// Domain name such as `example.com`.
    Name(String),
}

impl DomainRef {
    /// Renders the reference as a single percent-encoded path segment.
    ///
    /// Only `[A-Za-z0-9-._*]` pass through unescaped; `~` becomes `%7E`.
    #[must_use]
    pub fn to_path_segment(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            // form encoding turns spaces into `+`, which is literal in a path
            Self::Name(name) => url::form_urlencoded::byte_serialize(name.as_bytes())
                .collect::<String>()
                .replace('+', "%20"),
        }
    }
}

impl From<DomainId> for DomainRef {
    fn from(id: DomainId) -> Self {
        Self::Id(id)
    }
}

impl From<u64> for DomainRef {
    fn from(id: u64) -> Self {
        Self::Id(DomainId::new(id))
    }
}

impl From<&str> for DomainRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for DomainRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for DomainRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}
