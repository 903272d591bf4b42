//! Test Fixtures
//!
//! Products, campaigns and chat replies in the shapes the backend returns.

#![allow(dead_code)]

use crate::core::models::{
    Campaign, ChannelScripts, ChatMessage, ChatReply, LaunchScript, PostCopy, Product,
};

// =============================================================================
// Products
// =============================================================================

pub fn product(id: &str, name: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(format!("{name} helps teams ship faster")),
        ..Default::default()
    }
}

pub fn product_with_chat(id: &str, chat: Vec<ChatMessage>) -> Product {
    Product {
        chat,
        ..product(id, "Acme")
    }
}

// =============================================================================
// Campaigns
// =============================================================================

pub fn campaign(id: &str, name: &str) -> Campaign {
    Campaign {
        id: id.to_string(),
        name: name.to_string(),
        description: "Launch week".to_string(),
        channels: vec!["x".to_string(), "reddit".to_string()],
        launch_type: Some("soft-launch".to_string()),
        product_id: Some("p1".to_string()),
        launch_scripts: vec![ChannelScripts {
            channel: "x".to_string(),
            scripts: vec![LaunchScript {
                id: format!("{id}-s1"),
                copy: PostCopy {
                    title: "Meet Acme".to_string(),
                    body: "Acme is live today.".to_string(),
                },
                publish_date: None,
                version: 1,
            }],
        }],
        ..Default::default()
    }
}

// =============================================================================
// Chat
// =============================================================================

pub fn reply(text: &str, milestones: Option<&str>) -> ChatReply {
    ChatReply {
        assistant_reply: text.to_string(),
        milestones_completed: milestones.map(str::to_string),
        user_message: None,
        assistant_message: None,
    }
}
