pub mod credentials;
pub mod messages;
pub mod transport;

use crate::{
    config::{SolverConfig, SubmissionPolicy},
    error::{Result, SolveError},
    logger,
    models::{lacks_input, SolveRequest},
    payload::ImagePayload,
};
use std::sync::Arc;
use uuid::Uuid;

pub use credentials::{CredentialSource, EnvCredentials, StaticCredentials};
pub use messages::{build_messages, build_request};
pub use transport::{HttpTransport, Transport};

/// Turns a (prompt, optional image) pair into one completion call.
#[derive(Clone)]
pub struct Solver {
    config: SolverConfig,
    credentials: Arc<dyn CredentialSource>,
    transport: Arc<dyn Transport>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        let credentials = EnvCredentials::new(config.api_key_var.clone());

        Ok(Self::with_transport(
            config,
            Arc::new(credentials),
            Arc::new(transport),
        ))
    }

    pub fn with_transport(
        config: SolverConfig,
        credentials: Arc<dyn CredentialSource>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            credentials,
            transport,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub async fn solve_request(&self, request: &SolveRequest) -> Result<String> {
        self.solve(&request.prompt, request.image.as_ref()).await
    }

    /// Sends the prompt (and image, if any) and returns the first choice's
    /// text verbatim. Nothing is retried.
    pub async fn solve(&self, prompt: &str, image: Option<&ImagePayload>) -> Result<String> {
        let request_id = Uuid::new_v4().to_string();

        let api_key = self.credentials.api_key().ok_or_else(|| {
            log::warn!(
                "[req:{}] No API key found in {}",
                request_id,
                self.config.api_key_var
            );
            SolveError::MissingCredential
        })?;

        if self.config.submission_policy == SubmissionPolicy::RequireInput
            && lacks_input(prompt, image)
        {
            return Err(SolveError::request_failed(
                "Nothing to solve: provide a photo or a question",
            ));
        }

        let messages = build_messages(prompt, image)?;
        let request = build_request(&self.config, messages);

        log::info!(
            "[req:{}] Solving with model {} (image: {})",
            request_id,
            request.model,
            image.map_or("none".to_string(), |i| format!("{}x{}", i.width(), i.height()))
        );

        let timer = logger::timer(&format!("solve {}", request_id));
        let response = self.transport.complete(&api_key, &request).await;
        drop(timer);

        let response = response.map_err(|e| {
            log::error!("[req:{}] {}", request_id, e);
            e
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SolveError::request_failed("Completion response contained no choices"))?;

        if let Some(reason) = &choice.finish_reason {
            log::debug!("[req:{}] Finish reason: {}", request_id, reason);
        }

        choice.message.content.ok_or_else(|| {
            SolveError::request_failed("Completion response contained no message content")
        })
    }
}
