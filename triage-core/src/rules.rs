use serde::{Deserialize, Serialize};

/// Numeric cut-offs used by the status and priority rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RuleThresholds {
    /// Amounts strictly above this are high priority
    #[serde(default = "default_high_priority_amount")]
    pub high_priority_amount: f64,
    /// Exported orders strictly above this get a note row
    #[serde(default = "default_high_value_note_amount")]
    pub high_value_note_amount: f64,
    /// Lookup payloads at or above this count as confirmed
    #[serde(default = "default_lookup_payload_floor")]
    pub lookup_payload_floor: f64,
    /// Lookup orders must stay strictly below this to be processed
    #[serde(default = "default_lookup_amount_ceiling")]
    pub lookup_amount_ceiling: f64,
}

fn default_high_priority_amount() -> f64 { 200.0 }
fn default_high_value_note_amount() -> f64 { 150.0 }
fn default_lookup_payload_floor() -> f64 { 50.0 }
fn default_lookup_amount_ceiling() -> f64 { 100.0 }

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            high_priority_amount: default_high_priority_amount(),
            high_value_note_amount: default_high_value_note_amount(),
            lookup_payload_floor: default_lookup_payload_floor(),
            lookup_amount_ceiling: default_lookup_amount_ceiling(),
        }
    }
}
