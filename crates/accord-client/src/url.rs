//! API URL construction

pub use accord_common::DEFAULT_API_BASE_URL;

/// Root URL for API calls, with the version segment when one is pinned
///
/// `api_base_url("https://discord.com/api", Some(10))` is
/// `https://discord.com/api/v10`.
pub fn api_base_url(base: &str, version: Option<u8>) -> String {
    let base = base.trim_end_matches('/');
    match version {
        Some(v) => format!("{base}/v{v}"),
        None => base.to_string(),
    }
}
