//! Error handling utilities for proxy-sentinel

use thiserror::Error;

/// Crate-wide error type. This covers the second and third error strata
/// from the design (adapter/config/control-plane failures) — per-probe
/// failures never produce a `ProxyError`, they're encoded directly onto
/// the `ProxyRecord` (see `validator::probe_one`).
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid proxy format: {0}")]
    InvalidFormat(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type ProxyResult<T> = Result<T, ProxyError>;
