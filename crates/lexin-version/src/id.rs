//! Identifiers for entities, versions and change requests
//!
//! All identifiers are opaque strings on the wire. Freshly generated ones embed
//! a ULID so they sort by creation time and never collide within a workspace.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use ulid::Ulid;

/// Entity family discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A project owning documents and designs
    Project,
    /// A requirement document
    Prd,
    /// A design artifact
    Ui,
}

impl EntityKind {
    /// Wire name (`project`, `prd`, `ui`)
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Prd => "prd",
            Self::Ui => "ui",
        }
    }

    /// Human-readable name for messages
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Prd => "requirement document",
            Self::Ui => "design artifact",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "project" => Ok(Self::Project),
            "prd" | "document" | "doc" => Ok(Self::Prd),
            "ui" | "design" => Ok(Self::Ui),
            other => Err(UnknownEntityKind(other.to_string())),
        }
    }
}

/// Parse failure for [`EntityKind`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind: {0} (expected project, prd or ui)")]
pub struct UnknownEntityKind(pub String);

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier
            #[inline]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier text
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True for the empty identifier
            #[inline]
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
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

string_id!(
    /// Identifier of a document, design or project
    EntityId
);

string_id!(
    /// Identifier of one version inside an entity's history
    VersionId
);

string_id!(
    /// Identifier of a recorded change request
    ChangeRequestId
);

impl EntityId {
    /// Fresh identifier for a newly created entity
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }
}

impl VersionId {
    /// Fresh identifier for version `number` of an entity of `kind`
    ///
    /// Shaped `{ulid}-{kind}-v{number}`.
    #[must_use]
    pub fn generate(kind: EntityKind, number: u32) -> Self {
        Self(format!("{}-{}-v{number}", Ulid::new(), kind.as_str()))
    }

    /// Identifier synthesized for the first version of a legacy record
    #[must_use]
    pub fn legacy_initial(entity: &EntityId) -> Self {
        Self(format!("{entity}-v1"))
    }
}

impl ChangeRequestId {
    /// Fresh identifier shaped `{kind}-{entity}-{ulid}`
    #[must_use]
    pub fn generate(kind: EntityKind, entity: &EntityId) -> Self {
        Self(format!("{}-{entity}-{}", kind.as_str(), Ulid::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_names() {
        assert_eq!(serde_json::to_string(&EntityKind::Prd).unwrap(), "\"prd\"");
        assert_eq!(serde_json::to_string(&EntityKind::Ui).unwrap(), "\"ui\"");
        assert_eq!("design".parse::<EntityKind>().unwrap(), EntityKind::Ui);
        assert!("mockup".parse::<EntityKind>().is_err());
    }

    #[test]
    fn generated_version_ids_are_unique_and_tagged() {
        let a = VersionId::generate(EntityKind::Prd, 3);
        let b = VersionId::generate(EntityKind::Prd, 3);
        assert_ne!(a, b);
        assert!(a.as_str().ends_with("-prd-v3"));
    }

    #[test]
    fn change_request_id_embeds_owner() {
        let owner = EntityId::new("42");
        let id = ChangeRequestId::generate(EntityKind::Ui, &owner);
        assert!(id.as_str().starts_with("ui-42-"));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = EntityId::new("1700000000000");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1700000000000\"");
        assert_eq!(VersionId::legacy_initial(&id).as_str(), "1700000000000-v1");
    }
}
