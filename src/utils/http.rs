//! Shared HTTP constants.

/// The common browser User-Agent every outbound request (probes, source
/// adapters, the real-IP lookup) carries, per the control-plane defaults.
pub const COMMON_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
