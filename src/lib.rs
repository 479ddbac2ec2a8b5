//! Wealth Advisor
//!
//! A financial-advisory assistant backend that:
//! - Answers chat queries through the Groq LLM API, grounded in a curated
//!   knowledge base (simple keyword retrieval, no embeddings)
//! - Runs deterministic financial calculators (tax, SIP, EMI, FD)
//! - Ingests user documents, extracts fields with regex heuristics, and
//!   makes them searchable alongside the fixed catalog
//!
//! FLOW: QUERY → RETRIEVE CONTEXT → PROMPT LLM → RECORD HISTORY → ANSWER

pub mod api;
pub mod calculators;
pub mod chat;
pub mod error;
pub mod extraction;
pub mod groq;
pub mod knowledge;
pub mod models;

pub use error::Result;

// Re-export common types
pub use chat::AdvisorService;
pub use groq::{ChatModel, GroqClient};
pub use knowledge::KnowledgeStore;
pub use models::*;
