//! # Record Identity Newtypes
//!
//! Newtype wrappers for the identifiers the record store hands to the
//! engine. Identifiers are opaque: the engine never parses them, it only
//! carries them into results (ledger steps, standing reports) so the
//! calling layer can link a derived value back to its source record.
//!
//! Type-level distinction keeps an incident id from being passed where a
//! case id is expected.

use serde::{Deserialize, Serialize};

/// Identifier of a criminal-execution case file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub String);

/// Identifier of a recorded incident (remission grant, misconduct ruling).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(pub String);

impl CaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl IncidentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for IncidentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_bare_strings() {
        let id = IncidentId::new("inc-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"inc-42\"");
        let case: CaseId = serde_json::from_str("\"0001234-56.2020.8.26.0050\"").unwrap();
        assert_eq!(case.as_str(), "0001234-56.2020.8.26.0050");
    }

    #[test]
    fn test_display_is_raw_id() {
        assert_eq!(IncidentId::new("a1").to_string(), "a1");
        assert_eq!(CaseId::new("c9").to_string(), "c9");
    }
}
