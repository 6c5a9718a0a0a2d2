//! Endpoint defaults and the fixed strings shown in place of a narrative.

/// Generative Language API base (the model path is appended).
pub(crate) const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Environment variable read for the API key when none is set explicitly.
pub const DEFAULT_KEY_VAR: &str = "API_KEY";

pub(crate) const DEFAULT_TEMPERATURE: f32 = 0.7;
pub(crate) const DEFAULT_TOP_P: f32 = 0.9;

pub(crate) const USER_AGENT: &str = concat!("esg-insights-rs/", env!("CARGO_PKG_VERSION"));

/// Instruction placed before the metrics summary.
pub(crate) const PROMPT_PREFIX: &str = "Analyze the following financial ESG performance data and provide a concise, executive insight (2-3 sentences) for each research question: ";

/// Shown while a narrative request is outstanding.
pub const PLACEHOLDER_MESSAGE: &str = "Analyzing correlations...";

/// Returned without any request when no API key is configured.
pub const NO_CREDENTIAL_MESSAGE: &str =
    "AI insights are disabled because no API key is configured. Add a key in Settings to enable narrative summaries.";

/// Returned when the request fails or the response cannot be read.
pub const FAILURE_MESSAGE: &str =
    "Unable to generate AI insights at this time. Please review the visual data panels for details.";

/// Returned when the service answers with no text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Analysis complete.";
