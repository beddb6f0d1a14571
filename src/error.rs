use thiserror::Error;

/// Everything that can go wrong while acquiring the live feed. None of these
/// variants ever reach an inbound caller: the orchestrator matches on any
/// error and serves the fixed fallback posts instead.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("LinkedIn credentials are not configured")]
    MissingCredentials,

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unauthorized - token may be expired")]
    Unauthorized,

    #[error("forbidden - insufficient permissions")]
    Forbidden,

    #[error("LinkedIn API HTTP error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("invalid JSON response from LinkedIn API: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("no posts returned by any LinkedIn endpoint")]
    EmptyResult,
}

/// Failures of the one-time OAuth authorization handshake. Unlike feed
/// errors these are surfaced to the caller, since the handshake is an
/// explicit administrative action.
#[derive(Debug, Error)]
pub enum OauthError {
    #[error("LinkedIn client credentials are not configured")]
    MissingCredentials,

    #[error("authorization failed: {0}")]
    Denied(String),

    #[error("invalid state parameter, possible CSRF attack")]
    StateMismatch,

    #[error("no authorization code received")]
    MissingCode,

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to get access token: HTTP {status} - {body}")]
    Exchange { status: u16, body: String },

    #[error("failed to persist access token: {0}")]
    Persist(#[from] std::io::Error),
}
