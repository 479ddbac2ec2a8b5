//! Core data models for the wealth advisor

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Chat =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single turn sent to (or received from) the chat model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

//
// ================= Calculator Results =================
//

/// Projection of a systematic investment plan at maturity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SipResult {
    pub maturity_amount: f64,
    pub total_investment: f64,
    pub total_gains: f64,
}

/// Amortized loan repayment totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EmiResult {
    pub emi: f64,
    pub total_amount: f64,
    pub total_interest: f64,
}

/// Fixed deposit maturity projection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FdResult {
    pub maturity_amount: f64,
    pub interest: f64,
}

//
// ================= Knowledge =================
//

/// A static knowledge-base article. The catalog of these is fixed for the
/// lifetime of the process; ids are stable and unique so the UI can use them
/// as external references (e.g. the Knowledge Library view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub content: String,
}

/// A user-supplied document held in memory for the session. Ids are generated
/// by the caller; the store does not enforce uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    pub id: String,
    pub name: String,
    /// MIME-like type string reported by the uploader (e.g. "text/plain").
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };
        write!(f, "{}", s)
    }
}
