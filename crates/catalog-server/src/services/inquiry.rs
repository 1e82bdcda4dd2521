//! Contact inquiry intake

use crate::storage::DocumentStore;
use catalog_types::{Inquiry, InquiryRecord, INQUIRY_COLLECTION};
use serde_json::Value;
use std::sync::Arc;

/// What happened to an inquiry after it was accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Persisted { id: String },
    Failed { reason: String },
    /// No store configured, nothing was written
    Unconfigured,
}

pub struct InquiryIntake {
    store: Option<Arc<dyn DocumentStore>>,
}

impl InquiryIntake {
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { store }
    }

    /// Stamp the inquiry with its capture time and write it, best effort.
    ///
    /// Never fails: storage errors come back as [`PersistOutcome::Failed`].
    pub async fn persist(&self, inquiry: Inquiry) -> PersistOutcome {
        let Some(store) = &self.store else {
            return PersistOutcome::Unconfigured;
        };

        let doc = match serde_json::to_value(InquiryRecord::capture(inquiry)) {
            Ok(Value::Object(doc)) => doc,
            Ok(other) => {
                return PersistOutcome::Failed {
                    reason: format!("inquiry serialized to a non-object: {}", other),
                }
            }
            Err(e) => {
                return PersistOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        match store.insert(INQUIRY_COLLECTION, doc).await {
            Ok(id) => PersistOutcome::Persisted { id },
            Err(e) => PersistOutcome::Failed {
                reason: format!("{:#}", e),
            },
        }
    }
}
