//! API endpoint resolution for clients of the upload server.
//!
//! Browser clients pick the API base from whatever their page offers: an explicit
//! global override, a `<meta>` tag, or the hostname they were served from. This
//! module makes that decision a pure function over a snapshot of those inputs.

use crate::constants::DEFAULT_PORT;

/// Snapshot of everything a client may consult to find the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointEnvironment {
    /// Explicit base set by the embedding page (global configuration object)
    pub global_override: Option<String>,
    /// Value of the `<meta name="api-base">` tag, if any
    pub meta_tag: Option<String>,
    /// Hostname the client was served from
    pub hostname: Option<String>,
    /// Port of the local development server; defaults to the server's default port
    pub dev_port: Option<u16>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn is_local_host(hostname: &str) -> bool {
    matches!(
        hostname.trim().to_lowercase().as_str(),
        "localhost" | "127.0.0.1" | "::1" | "[::1]" | "0.0.0.0"
    )
}

/// Resolve the API base URL.
///
/// Precedence: global override, meta tag, local development server, same origin.
/// The same-origin result is the empty string so paths stay root-relative.
/// Trailing slashes are removed from every result.
pub fn resolve_api_base(env: &EndpointEnvironment) -> String {
    if let Some(base) = non_blank(&env.global_override).or_else(|| non_blank(&env.meta_tag)) {
        return base.trim_end_matches('/').to_string();
    }

    match env.hostname.as_deref() {
        Some(host) if is_local_host(host) => {
            format!("http://localhost:{}", env.dev_port.unwrap_or(DEFAULT_PORT))
        }
        _ => String::new(),
    }
}

/// Join a resolved base and an absolute API path.
pub fn api_url(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    format!("{}/{}", base.trim_end_matches('/'), path)
}
