#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};

use crate::parsers::parser;

/// A student as named by a submission folder, eg. `Doe, Jane (jdoe42)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// The folder name exactly as it was discovered.
    raw:         String,
    /// Family name, trimmed.
    last_name:   String,
    /// Given name(s), trimmed.
    first_name:  String,
    /// Roster key, matched verbatim against the grade book.
    external_id: String,
}

impl Identity {
    /// Creates an identity from already split parts.
    pub fn new(
        raw: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        Self {
            raw:         raw.into(),
            last_name:   last_name.into(),
            first_name:  first_name.into(),
            external_id: external_id.into(),
        }
    }

    /// The unparsed folder name.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Given name(s).
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Roster key.
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// Folder name used when writing compiled comments; underscores in the raw
    /// name become commas.
    pub fn folder_name(&self) -> String {
        self.raw.replace('_', ",")
    }
}

/// Parses a submission folder name into an [`Identity`].
///
/// The whole string must match `<last><sep> <first> (<id>)` where `<sep>` is a
/// comma or an underscore followed by whitespace. Anything else yields `None`;
/// there is no partial identity.
pub fn parse_identity(raw: &str) -> Option<Identity> {
    parser::identity(raw)
        .ok()
        .map(|(last, first, id)| Identity::new(raw, last, first, id))
}
