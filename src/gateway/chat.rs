//! Chat gateway - stateless question answering with the advisory persona

use std::sync::Arc;
use tracing::{debug, warn};

use crate::backend::traits::{GenerateRequest, GenerativeModel};
use crate::error::Result;
use crate::gateway::prompts;

/// Answer returned when no model is configured
pub const CHAT_UNAVAILABLE: &str = "Unable to generate advanced analysis - something went wrong. Please try again later or contact support if the issue persists.";

pub struct ChatGateway {
    model: Option<Arc<dyn GenerativeModel>>,
}

impl ChatGateway {
    pub fn new(model: Option<Arc<dyn GenerativeModel>>) -> Self {
        Self { model }
    }

    /// Answer a message. Model failures are returned as errors.
    pub async fn reply(&self, message: &str, context: Option<&str>) -> Result<String> {
        let Some(model) = &self.model else {
            warn!("Model API key not set for chat, returning fallback response");
            return Ok(CHAT_UNAVAILABLE.to_string());
        };

        debug!(
            model = model.name(),
            message_len = message.len(),
            has_context = context.is_some(),
            "Requesting chat completion"
        );

        model
            .generate(GenerateRequest::text(prompts::chat_prompt(message, context)))
            .await
    }
}
