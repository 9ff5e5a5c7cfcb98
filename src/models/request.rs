use crate::payload::ImagePayload;

/// One user-initiated (prompt, optional image) pair.
#[derive(Debug, Clone, Default)]
pub struct SolveRequest {
    pub prompt: String,
    pub image: Option<ImagePayload>,
}

impl SolveRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }

    /// True when there is neither a prompt nor an image.
    pub fn is_empty(&self) -> bool {
        lacks_input(&self.prompt, self.image.as_ref())
    }
}

/// Only an absent prompt counts as missing; whitespace is still a prompt.
pub fn lacks_input(prompt: &str, image: Option<&ImagePayload>) -> bool {
    prompt.is_empty() && image.is_none()
}
