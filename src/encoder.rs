//! Report encoding
//!
//! This module wraps engine results in a versioned envelope for downstream
//! consumers (dashboards, report assemblers, automation webhooks). The
//! envelope records who produced the result and for which scope and window.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::types::{CompanyId, TimeWindow};
use crate::{ENGINE_VERSION, PRODUCER_NAME};

/// Current envelope schema version
pub const ENVELOPE_VERSION: &str = "1.0.0";

/// Producer metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// What the result was computed over, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub scope: CompanyId,
    pub window_start_utc: String,
    pub window_end_utc: String,
    pub computed_at_utc: String,
}

/// Versioned wrapper around an engine result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope<T> {
    pub envelope_version: String,
    /// Result kind, e.g. `personal_mood` or `sentiment_tally`
    pub kind: String,
    pub producer: Producer,
    pub provenance: Provenance,
    pub result: T,
}

/// Encoder for producing report envelopes
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Wrap a result in an envelope
    pub fn encode<T: Serialize>(
        &self,
        kind: &str,
        scope: CompanyId,
        window: &TimeWindow,
        result: T,
    ) -> ReportEnvelope<T> {
        ReportEnvelope {
            envelope_version: ENVELOPE_VERSION.to_string(),
            kind: kind.to_string(),
            producer: Producer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            provenance: Provenance {
                scope,
                window_start_utc: window.start.to_rfc3339(),
                window_end_utc: window.end.to_rfc3339(),
                computed_at_utc: Utc::now().to_rfc3339(),
            },
            result,
        }
    }

    /// Encode to a compact JSON string
    pub fn encode_to_json<T: Serialize>(
        &self,
        kind: &str,
        scope: CompanyId,
        window: &TimeWindow,
        result: T,
    ) -> Result<String, EngineError> {
        let envelope = self.encode(kind, scope, window, result);
        Ok(serde_json::to_string(&envelope)?)
    }
}
