//! One-paragraph AI narratives over the displayed quartile figures.
//!
//! The narrative service is a text-in/text-out collaborator. It never fails from the
//! caller's point of view: missing credentials and service errors become fixed display
//! strings, and the metrics pipeline never waits on it.

mod client;
mod constants;
mod wire;

pub use client::{Credential, NarrativeClient, NarrativeClientBuilder};
pub use constants::{
    DEFAULT_KEY_VAR, DEFAULT_MODEL, EMPTY_RESPONSE_MESSAGE, FAILURE_MESSAGE, NO_CREDENTIAL_MESSAGE,
    PLACEHOLDER_MESSAGE,
};

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;

use crate::core::Quartile;
use crate::metrics::QuartileMetrics;

/// A service that turns a short metrics summary into a narrative.
///
/// Implementations must resolve to a display string on every path; errors are converted,
/// never returned. This is the seam where tests substitute a double for [`NarrativeClient`].
pub trait NarrativeService: Send + Sync {
    /// Produces a narrative for `context`.
    fn summarize<'a>(&'a self, context: &'a str) -> BoxFuture<'a, String>;

    /// Whether a request would reach the service. Must not resolve or cache credentials.
    fn is_configured(&self) -> bool {
        true
    }
}

impl NarrativeService for NarrativeClient {
    fn summarize<'a>(&'a self, context: &'a str) -> BoxFuture<'a, String> {
        self.summarize_text(context).boxed()
    }

    fn is_configured(&self) -> bool {
        self.credential_available()
    }
}

/// Formats the context sent with a narrative request: Q1/Q4 annualised returns as percentages
/// and the Q1 minus Q4 Sharpe delta.
#[must_use]
pub fn summary_context(metrics: &QuartileMetrics) -> String {
    let q1 = &metrics[Quartile::Q1];
    let q4 = &metrics[Quartile::Q4];
    format!(
        "Q1 Returns: {:.1}%, Q4: {:.1}%. Sharpe ratio delta: {:.2}.",
        q1.annualized_return * 100.0,
        q4.annualized_return * 100.0,
        q1.sharpe_ratio - q4.sharpe_ratio
    )
}

enum InsightState {
    Pending(JoinHandle<String>),
    Ready(String),
}

/// A narrative that may still be in flight.
///
/// Created with [`Insight::spawn`], which starts exactly one request on the tokio runtime
/// and returns immediately. Until the request resolves, [`current`](Self::current) yields
/// [`PLACEHOLDER_MESSAGE`]. The request is not cancelled when the insight is dropped and is
/// never retried.
pub struct Insight {
    state: InsightState,
}

impl Insight {
    /// Starts a narrative request for `context` in the background.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(service: Arc<dyn NarrativeService>, context: String) -> Self {
        let handle = tokio::spawn(async move { service.summarize(&context).await });
        Self {
            state: InsightState::Pending(handle),
        }
    }

    /// An insight that is already resolved.
    #[must_use]
    pub fn ready(text: impl Into<String>) -> Self {
        Self {
            state: InsightState::Ready(text.into()),
        }
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, InsightState::Ready(_))
    }

    /// The narrative if resolved, the placeholder otherwise. Does not poll the request.
    #[must_use]
    pub fn current(&self) -> &str {
        match &self.state {
            InsightState::Pending(_) => PLACEHOLDER_MESSAGE,
            InsightState::Ready(text) => text,
        }
    }

    /// Checks the request without blocking and returns the text to display.
    pub fn refresh(&mut self) -> &str {
        if let InsightState::Pending(handle) = &mut self.state
            && let Some(joined) = handle.now_or_never()
        {
            self.state = InsightState::Ready(joined.unwrap_or_else(|_| FAILURE_MESSAGE.to_string()));
        }
        self.current()
    }

    /// Waits for the request to resolve.
    pub async fn wait(self) -> String {
        match self.state {
            InsightState::Ready(text) => text,
            InsightState::Pending(handle) => handle
                .await
                .unwrap_or_else(|_| FAILURE_MESSAGE.to_string()),
        }
    }
}

impl std::fmt::Debug for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Insight")
            .field("ready", &self.is_ready())
            .field("text", &self.current())
            .finish()
    }
}
