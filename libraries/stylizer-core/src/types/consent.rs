/// Consent record for using a reference voice
use serde::{Deserialize, Serialize};

/// Parsed authorization for using a reference speaker's recording.
///
/// `consent` is required; a record without it does not deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub consent: bool,

    #[serde(default)]
    pub speaker_name: Option<String>,

    #[serde(default)]
    pub scope: Option<String>,
}

impl ConsentRecord {
    /// Speaker name for audit logs, `"unknown"` when absent
    pub fn speaker_name(&self) -> &str {
        self.speaker_name.as_deref().unwrap_or("unknown")
    }

    /// Declared scope of use, empty when absent
    pub fn scope(&self) -> &str {
        self.scope.as_deref().unwrap_or("")
    }

    /// True only when consent was explicitly granted
    pub fn is_granted(&self) -> bool {
        self.consent
    }
}
