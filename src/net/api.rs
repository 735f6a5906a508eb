//! REST API helpers for communicating with the activities service.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: `HttpBackend` reports a transport error, since these
//! endpoints are only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to `Result<_, ApiError>`. Response bodies are handed
//! to `interpret_listing`/`interpret_mutation`, which classify status and
//! shape without touching the network so the rules are testable natively.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::types::{ActivityDirectory, MutationReply};

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Failure of one request against the activities service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (network, DNS, CORS, ...).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("rejected with status {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },
    /// The body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Which registration mutation to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Signup,
    Unregister,
}

impl Mutation {
    fn path_segment(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Unregister => "unregister",
        }
    }
}

/// Percent-encode one path segment or query value like `encodeURIComponent`.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// `GET` target for the activity listing.
pub fn activities_endpoint(base: &str) -> String {
    format!("{base}/activities")
}

/// `POST` target for a signup or unregister of `email` in `activity`.
pub fn mutation_endpoint(base: &str, mutation: Mutation, activity: &str, email: &str) -> String {
    format!(
        "{base}/activities/{}/{}?email={}",
        encode_component(activity),
        mutation.path_segment(),
        encode_component(email)
    )
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Classify a listing response.
///
/// # Errors
///
/// `Rejected` for non-2xx status, `Malformed` when the body is not an
/// activity directory.
pub fn interpret_listing(status: u16, body: &str) -> Result<ActivityDirectory, ApiError> {
    if !is_success(status) {
        let detail = serde_json::from_str::<MutationReply>(body)
            .map(|reply| non_blank(reply.detail))
            .unwrap_or_default();
        return Err(ApiError::Rejected { status, detail });
    }
    serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Classify a signup/unregister response, yielding the confirmation text.
///
/// A body that is not JSON is `Malformed` regardless of status, and so is a
/// `detail` that is not a string (the service's 422 validation list). A
/// success without a `message` yields an empty confirmation. An empty
/// `detail` counts as no detail.
///
/// # Errors
///
/// `Rejected` (with the server's `detail`, if any) for non-2xx status,
/// `Malformed` when the body is not a JSON object.
pub fn interpret_mutation(status: u16, body: &str) -> Result<String, ApiError> {
    let reply: MutationReply =
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    if is_success(status) {
        Ok(reply.message.unwrap_or_default())
    } else {
        Err(ApiError::Rejected {
            status,
            detail: non_blank(reply.detail),
        })
    }
}

fn non_blank(detail: Option<String>) -> Option<String> {
    detail.filter(|d| !d.is_empty())
}

/// The two remote operations the board depends on.
///
/// Implemented over HTTP by `HttpBackend`; tests substitute an in-memory
/// service. Futures are not `Send`: everything runs on the UI thread.
#[allow(async_fn_in_trait)]
pub trait ActivitiesBackend {
    /// Fetch the full activity collection.
    async fn list_activities(&self) -> Result<ActivityDirectory, ApiError>;

    /// Register `email` for `activity`, returning the confirmation text.
    async fn signup(&self, activity: &str, email: &str) -> Result<String, ApiError>;

    /// Remove `email` from `activity`, returning the confirmation text.
    async fn unregister(&self, activity: &str, email: &str) -> Result<String, ApiError>;
}

/// `ActivitiesBackend` over `fetch`.
#[derive(Clone, Debug, Default)]
pub struct HttpBackend {
    base: String,
}

impl HttpBackend {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    async fn get(&self, url: &str) -> Result<(u16, String), ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::get(url)
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            read_response(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(unavailable(url))
        }
    }

    async fn post(&self, url: &str) -> Result<(u16, String), ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(url)
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            read_response(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(unavailable(url))
        }
    }

    async fn mutate(&self, mutation: Mutation, activity: &str, email: &str) -> Result<String, ApiError> {
        let url = mutation_endpoint(&self.base, mutation, activity, email);
        let (status, body) = self.post(&url).await?;
        interpret_mutation(status, &body)
    }
}

#[cfg(feature = "csr")]
async fn read_response(resp: gloo_net::http::Response) -> Result<(u16, String), ApiError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok((status, body))
}

#[cfg(not(feature = "csr"))]
fn unavailable(url: &str) -> ApiError {
    ApiError::Transport(format!("{url}: not available outside the browser"))
}

impl ActivitiesBackend for HttpBackend {
    async fn list_activities(&self) -> Result<ActivityDirectory, ApiError> {
        let (status, body) = self.get(&activities_endpoint(&self.base)).await?;
        interpret_listing(status, &body)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<String, ApiError> {
        self.mutate(Mutation::Signup, activity, email).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<String, ApiError> {
        self.mutate(Mutation::Unregister, activity, email).await
    }
}
