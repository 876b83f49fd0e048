//! CRM chat assistant: answers questions about the caller's company data
//! through an OpenAI-compatible chat-completions API.

mod client;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::deal::Deal;
use crate::models::lead::Lead;
use crate::models::task::Task;
use crate::store::RecordStore;

pub use client::CompletionClient;

pub const FALLBACK_REPLY: &str = "Sorry, I could not generate a response.";
pub const NO_COMPANY: &str = "No company found for user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self { role: role.to_string(), content: content.into() }
    }
}

#[derive(Debug)]
pub enum CompletionError {
    /// Non-success status; carries the upstream body unchanged.
    Upstream(String),
    Transport(String),
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Upstream(body) => write!(f, "{body}"),
            CompletionError::Transport(msg) => write!(f, "{msg}"),
        }
    }
}

#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// First choice's content, `None` when the API returned no usable choice.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<Option<String>, CompletionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    #[serde(other)]
    Assistant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub speaker: Speaker,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
}

/// System instruction restricting answers to the company's own records.
pub fn system_prompt(deals: &[Deal], leads: &[Lead], tasks: &[Task]) -> Result<String, serde_json::Error> {
    Ok(format!(
        "You are an AI assistant for a CRM SaaS app. Only answer questions using the following \
         data. If a question is not related to this data, politely refuse.\n\n\
         DEALS:\n{}\n\nLEADS:\n{}\n\nTASKS:\n{}\n",
        serde_json::to_string_pretty(deals)?,
        serde_json::to_string_pretty(leads)?,
        serde_json::to_string_pretty(tasks)?,
    ))
}

/// `[system, ...history, user]`.
pub fn build_messages(system: String, history: &[HistoryEntry], message: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::new("system", system));
    for entry in history {
        let role = match entry.speaker {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        };
        messages.push(ChatMessage::new(role, entry.message.clone()));
    }
    messages.push(ChatMessage::new("user", message));
    messages
}

/// Answer `request` for `company` using its deals, leads and tasks.
pub async fn answer(
    store: &dyn RecordStore,
    chat: &dyn ChatCompletion,
    company: &str,
    request: &ChatRequest,
) -> Result<String, AppError> {
    let (deals, leads, tasks) = tokio::try_join!(
        store.company_deals(company),
        store.company_leads(company),
        store.company_tasks(company),
    )?;
    let system = system_prompt(&deals, &leads, &tasks).map_err(|e| AppError::Upstream(e.to_string()))?;
    let messages = build_messages(system, &request.history, &request.message);

    match chat.complete(messages).await {
        Ok(Some(text)) if !text.is_empty() => Ok(text),
        Ok(_) => Ok(FALLBACK_REPLY.to_string()),
        Err(e) => {
            log::error!("Chat completion failed: {e}");
            Err(AppError::Upstream(e.to_string()))
        }
    }
}
