//! DTOs for the chat backend.
//!
//! # Design
//! Defined independently from the mock-server crate; the integration tests
//! catch schema drift between the two.

use serde::{Deserialize, Serialize};

/// Payload of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

/// A single chat message as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub role: String,
    pub content: String,
}
