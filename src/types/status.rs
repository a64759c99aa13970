use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a contact-form inquiry.
///
/// Allowed transitions: new → replied, new → archived, replied → archived,
/// archived → new. A replied inquiry cannot be reopened directly; it has to
/// be archived first. Setting the current status again is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Replied,
    Archived,
}

impl InquiryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Replied => "replied",
            Self::Archived => "archived",
        }
    }

    #[must_use]
    pub const fn can_transition_to(self, next: InquiryStatus) -> bool {
        matches!(
            (self, next),
            (Self::New, Self::Replied)
                | (Self::New, Self::Archived)
                | (Self::Replied, Self::Archived)
                | (Self::Archived, Self::New)
        )
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "replied" => Ok(Self::Replied),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown status: {other}")),
        }
    }
}
