use serde::{Deserialize, Serialize};

use super::serde_helpers::text_list;
use super::ChatMessage;

/// Status the backend reports once the enrichment chat is finished or skipped.
pub const STATUS_COMPLETED: &str = "completed";

/// A product as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, alias = "brandName")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Enriched problem statements.
    #[serde(default, deserialize_with = "text_list")]
    pub problem_it_solves: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub features: Vec<String>,
    #[serde(default, alias = "targetAudience")]
    pub audience: Option<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub reviews: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub chat: Vec<ChatMessage>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl Product {
    /// Text shown in list rows: the description, else the first problem statement.
    pub fn summary(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or_else(|| self.problem_it_solves.first().map(String::as_str))
            .unwrap_or("")
    }

    pub fn is_chat_completed(&self) -> bool {
        self.status.as_deref() == Some(STATUS_COMPLETED)
    }

    pub fn mark_completed(&mut self) {
        self.status = Some(STATUS_COMPLETED.to_string());
    }
}

/// Answers collected by the product wizard, sent as the create payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub brand_name: String,
    pub problem_it_solves: String,
    /// One feature per line.
    pub features: String,
    pub audience: String,
}
