//! Advisor chat service
//!
//! Orchestrates a user turn: retrieve grounding context from the knowledge
//! store, build the prompt (system persona + session history + user turn),
//! call the chat model, and record both turns in the session history.
//!
//! Sessions are in-memory only and keyed by id; nothing survives a restart.

use crate::extraction::{analyze_document, DocumentAnalysis};
use crate::groq::{ChatModel, SYSTEM_PROMPT};
use crate::knowledge::KnowledgeStore;
use crate::models::{ChatMessage, KnowledgeItem, UserDocument};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Cap on retained turns per session. The full transcript on every request
/// causes prompt growth and stalls after early turns, so older turns are
/// dropped oldest-first.
const MAX_HISTORY_MESSAGES: usize = 20;

/// Response for a single chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_used: Option<String>,
}

/// The chat orchestrator: model client + knowledge store + session histories.
pub struct AdvisorService {
    model: Arc<dyn ChatModel>,
    knowledge: RwLock<KnowledgeStore>,
    histories: RwLock<HashMap<Uuid, Vec<ChatMessage>>>,
}

impl AdvisorService {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            knowledge: RwLock::new(KnowledgeStore::new()),
            histories: RwLock::new(HashMap::new()),
        }
    }

    /// Handle one user turn with retrieval-augmented grounding.
    pub async fn handle_message(&self, session_id: Uuid, message: &str) -> crate::Result<ChatReply> {
        let context = {
            let knowledge = self.knowledge.read().await;
            knowledge.relevant_context(message)
        };

        self.send_turn(session_id, message, context).await
    }

    /// Shortcut buttons in the UI map to canned prompts. These go out
    /// ungrounded: the prompt already names its topic, so no retrieval
    /// pass runs.
    pub async fn quick_action(&self, session_id: Uuid, action: &str) -> crate::Result<ChatReply> {
        let prompt = quick_action_prompt(action);
        self.send_turn(session_id, prompt, String::new()).await
    }

    async fn send_turn(
        &self,
        session_id: Uuid,
        message: &str,
        context: String,
    ) -> crate::Result<ChatReply> {
        let user_turn = if context.is_empty() {
            message.to_string()
        } else {
            format!("Context:\n{}\n\nUser question: {}", context, message)
        };

        let mut prompt = Vec::new();
        prompt.push(ChatMessage::system(SYSTEM_PROMPT));
        {
            let histories = self.histories.read().await;
            if let Some(history) = histories.get(&session_id) {
                prompt.extend(history.iter().cloned());
            }
        }
        prompt.push(ChatMessage::user(user_turn));

        let answer = self.model.complete(&prompt).await?;

        {
            let mut histories = self.histories.write().await;
            let history = histories.entry(session_id).or_default();
            // History stores the raw user message, not the context-wrapped one
            history.push(ChatMessage::user(message));
            history.push(ChatMessage::assistant(answer.clone()));
            if history.len() > MAX_HISTORY_MESSAGES {
                let excess = history.len() - MAX_HISTORY_MESSAGES;
                history.drain(..excess);
            }
        }

        info!(%session_id, grounded = !context.is_empty(), "Chat turn completed");

        Ok(ChatReply {
            answer,
            context_used: if context.is_empty() {
                None
            } else {
                Some(context)
            },
        })
    }

    /// Forget a session's history. Unknown sessions are a no-op.
    pub async fn reset_history(&self, session_id: Uuid) {
        let mut histories = self.histories.write().await;
        histories.remove(&session_id);
    }

    pub async fn history_len(&self, session_id: Uuid) -> usize {
        let histories = self.histories.read().await;
        histories.get(&session_id).map_or(0, |h| h.len())
    }

    //
    // ================= Documents =================
    //

    /// Ingest already-decoded documents: analyze each one and add it to the
    /// retrieval collection. Returns the analyses in input order.
    pub async fn ingest_documents(&self, docs: Vec<UserDocument>) -> Vec<DocumentAnalysis> {
        let analyses: Vec<DocumentAnalysis> = docs
            .iter()
            .map(|doc| analyze_document(&doc.name, &doc.content))
            .collect();

        let mut knowledge = self.knowledge.write().await;
        knowledge.add_documents(docs);

        analyses
    }

    pub async fn remove_document(&self, id: &str) {
        let mut knowledge = self.knowledge.write().await;
        knowledge.remove_document(id);
    }

    pub async fn search_documents(&self, query: &str) -> Vec<UserDocument> {
        let knowledge = self.knowledge.read().await;
        knowledge
            .search_user_documents(query)
            .into_iter()
            .cloned()
            .collect()
    }

    //
    // ================= Knowledge Library =================
    //

    pub async fn all_knowledge(&self) -> Vec<KnowledgeItem> {
        let knowledge = self.knowledge.read().await;
        knowledge.all_knowledge().to_vec()
    }

    pub async fn knowledge_by_id(&self, id: &str) -> Option<KnowledgeItem> {
        let knowledge = self.knowledge.read().await;
        knowledge.get_knowledge_by_id(id).cloned()
    }

    pub async fn search_knowledge(&self, query: &str) -> Vec<KnowledgeItem> {
        let knowledge = self.knowledge.read().await;
        knowledge
            .search_knowledge(query)
            .into_iter()
            .cloned()
            .collect()
    }
}

/// Canned prompts behind the UI's quick-action buttons.
fn quick_action_prompt(action: &str) -> &'static str {
    match action {
        "section-80c" => {
            "Explain Section 80C tax deductions available in India with current limits and best investment options."
        }
        "sip-calculator" => {
            "Explain SIP (Systematic Investment Plan) benefits and provide guidance on calculating returns."
        }
        "tax-planning" => "Provide tax planning strategies for the current financial year in India.",
        "emi-planning" => "Explain EMI planning and how to calculate affordable loan amounts.",
        "investment-portfolio" => "Provide guidance on building a balanced investment portfolio.",
        "retirement-planning" => {
            "Explain retirement planning strategies and required corpus calculation."
        }
        _ => "Provide general financial advice and guidance.",
    }
}
