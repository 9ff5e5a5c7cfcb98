use crate::{
    config::SolverConfig,
    error::Result,
    models::{ChatCompletionRequest, ChatMessage, ContentPart, ImageUrl, MessageContent},
    payload::ImagePayload,
};

/// A single user message: the bare prompt, or prompt text plus the image as a
/// PNG data URI.
pub fn build_messages(prompt: &str, image: Option<&ImagePayload>) -> Result<Vec<ChatMessage>> {
    let content = match image {
        Some(image) => MessageContent::Parts(vec![
            ContentPart::Text {
                text: prompt.to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image.to_data_uri()?,
                },
            },
        ]),
        None => MessageContent::Text(prompt.to_string()),
    };

    Ok(vec![ChatMessage::user(content)])
}

pub fn build_request(config: &SolverConfig, messages: Vec<ChatMessage>) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages,
        max_tokens: config.max_tokens,
    }
}
