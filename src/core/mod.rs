//! Core library: backend client, records, and the view-independent logic
//! behind the wizards, chat, onboarding and navigation.

pub mod api;
pub mod chat;
pub mod collections;
pub mod dashboard;
pub mod logging;
pub mod models;
pub mod onboarding;
pub mod routes;
pub mod text;
pub mod wizard;
