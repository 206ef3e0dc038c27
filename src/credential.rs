//! Bearer token resolution for backend calls.
//!
//! Tokens are issued by the web login flow; Huddle only carries them.
//! Resolution goes through a chain:
//!
//! 1. `--token <token>`: explicit per-command override
//! 2. `HUDDLE_TOKEN` env var: process/session level
//! 3. `token` in `~/.huddle/config.toml`: global default

use std::env;

use crate::config::Config;

/// Error message shown when no token can be resolved.
pub const TOKEN_REQUIRED: &str = "token required: pass --token <token>, \
    set HUDDLE_TOKEN, or add `token = \"...\"` to ~/.huddle/config.toml";

/// Resolve the bearer token from the tiered resolution chain.
pub fn resolve_token(explicit: Option<&str>, config: &Config) -> Result<String, String> {
    pick(
        explicit,
        env::var("HUDDLE_TOKEN").ok().as_deref(),
        config.token.as_deref(),
    )
    .ok_or_else(|| TOKEN_REQUIRED.to_string())
}

/// First non-empty candidate, in priority order.
fn pick(explicit: Option<&str>, env: Option<&str>, config: Option<&str>) -> Option<String> {
    [explicit, env, config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_wins() {
        assert_eq!(
            pick(Some("flag"), Some("env"), Some("file")).as_deref(),
            Some("flag")
        );
    }

    #[test]
    fn env_beats_config() {
        assert_eq!(pick(None, Some("env"), Some("file")).as_deref(), Some("env"));
    }

    #[test]
    fn empty_values_fall_through() {
        assert_eq!(pick(Some(""), Some("  "), Some("file")).as_deref(), Some("file"));
        assert_eq!(pick(None, None, None), None);
    }

    #[test]
    fn explicit_token_resolves_without_config() {
        let token = resolve_token(Some("abc"), &Config::default()).unwrap();
        assert_eq!(token, "abc");
    }
}
