use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// What to do with a request that carries neither a prompt nor an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPolicy {
    /// Reject before any network call.
    RequireInput,
    /// Send whatever was given, even an empty prompt with no image.
    Lenient,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        SubmissionPolicy::RequireInput
    }
}

#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_key_var: String,
    pub timeout_secs: u64,
    pub submission_policy: SubmissionPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key_var: DEFAULT_API_KEY_VAR.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            submission_policy: SubmissionPolicy::default(),
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads endpoint and client settings. The API key itself is never read
    /// here; it is resolved per call through a credential source.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let timeout_secs = env::var("SNAPSOLVE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.timeout_secs);
        let api_key_var = env::var("SNAPSOLVE_API_KEY_VAR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.api_key_var);
        let submission_policy = env::var("SNAPSOLVE_LENIENT")
            .ok()
            .map_or(defaults.submission_policy, |val| {
                if is_truthy(&val) {
                    SubmissionPolicy::Lenient
                } else {
                    SubmissionPolicy::RequireInput
                }
            });

        SolverConfig {
            base_url,
            timeout_secs,
            api_key_var,
            submission_policy,
            ..defaults
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key_var(mut self, var: impl Into<String>) -> Self {
        self.api_key_var = var.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_submission_policy(mut self, policy: SubmissionPolicy) -> Self {
        self.submission_policy = policy;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// `true` (any case) or `1`.
fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}
