//! Contact inquiries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Collection inquiries are stored in
pub const INQUIRY_COLLECTION: &str = "inquiry";

/// Status marker returned for every accepted inquiry
pub const RECEIVED: &str = "received";

/// A contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    #[serde(default)]
    pub product_slug: Option<String>,
}

/// An inquiry as persisted, stamped with its capture time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryRecord {
    #[serde(flatten)]
    pub inquiry: Inquiry,
    pub created_at: DateTime<Utc>,
}

impl InquiryRecord {
    pub fn capture(inquiry: Inquiry) -> Self {
        Self {
            inquiry,
            created_at: Utc::now(),
        }
    }
}

/// Acknowledgment sent back to the submitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryReceipt {
    pub status: String,
    pub received_at: DateTime<Utc>,
}

impl InquiryReceipt {
    pub fn received() -> Self {
        Self {
            status: RECEIVED.to_string(),
            received_at: Utc::now(),
        }
    }
}
