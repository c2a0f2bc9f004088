//! Client address detection from CGI-style request variables.
//!
//! Web-facing deployments surface the caller's address through one of
//! several proxy and forwarding variables; which one is populated
//! depends on the hops in front of the process. The resolver probes a
//! fixed priority list and normalizes loopback addresses so local
//! traffic always reads the same way in log lines.

use crate::env::Environment;

/// Request variables probed for a client address, in priority order.
pub const IP_VARS: [&str; 6] = [
    "HTTP_CLIENT_IP",
    "HTTP_X_FORWARDED_FOR",
    "HTTP_X_FORWARDED",
    "HTTP_FORWARDED_FOR",
    "HTTP_FORWARDED",
    "REMOTE_ADDR",
];

/// Reported for loopback addresses, and when nothing is set but the
/// process runs interactively.
pub const LOCALHOST: &str = "LOCALHOST";

/// Reported when no variable is set and the process is non-interactive.
pub const UNKNOWN: &str = "UNKNOWN";

/// Best-guess client address for the given environment.
///
/// Probes the `IP_VARS` list in order and returns the first non-empty
/// value, normalizing loopback addresses to `LOCALHOST`. With no
/// variable set, an interactive session reports `LOCALHOST` and
/// anything else reports `UNKNOWN`.
///
/// # Example
/// ```
/// use logbook::env::Environment;
/// use logbook::ip;
///
/// let env = Environment::bare().with_var("REMOTE_ADDR", "203.0.113.7");
/// assert_eq!(ip::resolve(&env), "203.0.113.7");
/// ```
pub fn resolve(env: &Environment) -> String {
    for key in IP_VARS {
        if let Some(value) = env.var(key) {
            return normalize(value);
        }
    }
    if env.is_interactive() {
        LOCALHOST.to_string()
    } else {
        UNKNOWN.to_string()
    }
}

fn normalize(addr: &str) -> String {
    match addr {
        "127.0.0.1" | "127.0.1.1" | "::1" => LOCALHOST.to_string(),
        other => other.to_string(),
    }
}
