//! Public client surface + builder.
//! The credential is resolved on first use, not at construction.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::constants::{
    DEFAULT_BASE_URL, DEFAULT_KEY_VAR, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
    EMPTY_RESPONSE_MESSAGE, FAILURE_MESSAGE, NO_CREDENTIAL_MESSAGE, PROMPT_PREFIX, USER_AGENT,
};
use super::wire::{GenerateRequest, GenerateResponse};
use crate::core::EsgError;

/// Where the API key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// A key supplied directly.
    Key(String),
    /// The name of an environment variable read on first use.
    Env(String),
    /// No credential; every call degrades to the advisory message.
    None,
}

impl Default for Credential {
    fn default() -> Self {
        Credential::Env(DEFAULT_KEY_VAR.to_string())
    }
}

/// A client for the Gemini `generateContent` endpoint.
///
/// Construct one explicitly with [`NarrativeClient::builder`] and hand it to the views that
/// need it (usually as `Arc<dyn NarrativeService>`). Clones share the resolved credential.
#[derive(Debug, Clone)]
pub struct NarrativeClient {
    http: Client,
    base_url: Url,
    model: String,
    temperature: f32,
    top_p: f32,
    credential: Credential,
    resolved: Arc<OnceLock<Option<String>>>,
}

impl NarrativeClient {
    /// Create a new builder.
    pub fn builder() -> NarrativeClientBuilder {
        NarrativeClientBuilder::default()
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether a non-empty API key is available. Resolves and caches the credential.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key().is_some()
    }

    /// Like [`has_credential`](Self::has_credential), but an unresolved credential is looked
    /// up without being cached, so the first request still performs the resolution.
    #[must_use]
    pub fn credential_available(&self) -> bool {
        match self.resolved.get() {
            Some(key) => key.is_some(),
            None => self.lookup_key().is_some(),
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.resolved.get_or_init(|| self.lookup_key()).as_deref()
    }

    fn lookup_key(&self) -> Option<String> {
        let key = match &self.credential {
            Credential::Key(k) => Some(k.clone()),
            Credential::Env(var) => std::env::var(var).ok(),
            Credential::None => None,
        };
        key.filter(|k| !k.trim().is_empty())
    }

    fn endpoint(&self) -> Result<Url, EsgError> {
        Ok(self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))?)
    }

    /// Sends one `generateContent` request and returns the model text.
    ///
    /// # Errors
    ///
    /// [`EsgError::MissingCredential`] when no key is configured (no request is sent),
    /// [`EsgError::Http`] on transport failure, [`EsgError::Status`] on a non-2xx answer and
    /// [`EsgError::Data`] when the body cannot be parsed.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, context), err, fields(model = %self.model)))]
    pub async fn generate(&self, context: &str) -> Result<String, EsgError> {
        let key = self.api_key().ok_or(EsgError::MissingCredential)?;
        let url = self.endpoint()?;

        let prompt = format!("{PROMPT_PREFIX}{context}");
        let body = GenerateRequest::user_prompt(&prompt, self.temperature, self.top_p);

        let resp = self
            .http
            .post(url.clone())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(EsgError::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }

        let text = resp.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| EsgError::Data(format!("generateContent json parse: {e}")))?;
        Ok(parsed.text())
    }

    /// Like [`generate`](Self::generate), but every failure becomes a fixed display string.
    pub async fn summarize_text(&self, context: &str) -> String {
        match self.generate(context).await {
            Ok(text) if text.trim().is_empty() => EMPTY_RESPONSE_MESSAGE.to_string(),
            Ok(text) => text,
            Err(EsgError::MissingCredential) => NO_CREDENTIAL_MESSAGE.to_string(),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "narrative request failed");
                FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct NarrativeClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    model: Option<String>,
    credential: Option<Credential>,
    temperature: Option<f32>,
    top_p: Option<f32>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl NarrativeClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the API base (e.g., `https://generativelanguage.googleapis.com/`).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Select the model. Default: [`DEFAULT_MODEL`].
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Use `key` as the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.credential = Some(Credential::Key(key.into()));
        self
    }

    /// Read the API key from environment variable `var` on first use. Default: `API_KEY`.
    #[must_use]
    pub fn api_key_env(mut self, var: impl Into<String>) -> Self {
        self.credential = Some(Credential::Env(var.into()));
        self
    }

    /// Set the credential source directly.
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Sampling temperature. Default: 0.7.
    #[must_use]
    pub const fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }

    /// Nucleus sampling cutoff. Default: 0.9.
    #[must_use]
    pub const fn top_p(mut self, p: f32) -> Self {
        self.top_p = Some(p);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Builds the client. The credential is not read here.
    ///
    /// # Errors
    ///
    /// Returns an error if the default base URL cannot be parsed or the HTTP client cannot be built.
    pub fn build(self) -> Result<NarrativeClient, EsgError> {
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));
        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }
        let http = httpb.build()?;

        Ok(NarrativeClient {
            http,
            base_url,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: self.top_p.unwrap_or(DEFAULT_TOP_P),
            credential: self.credential.unwrap_or_default(),
            resolved: Arc::new(OnceLock::new()),
        })
    }
}
