//! Resolving a target query to IP addresses
//!
//! A query takes one of three forms:
//!
//! 1. **Attribute filter** - any query containing `:`, e.g.
//!    `rails_env:demo color:green`. Matches registered servers. With no
//!    registry the first criterion's value is used as the IP; with a
//!    registry and no match, only an `ip_address` criterion is.
//! 2. **Names and IPs** - whitespace-separated IP literals and server names.
//!    Unknown names are dropped. The top-level `ip_address` is appended.
//! 3. **Empty** - just the top-level `ip_address`, if any.
//!
//! The result is deduplicated, keeping the first occurrence.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::config::Config;
use crate::document::Document;
use crate::error::Result;
use crate::registry::Lookup;

static IP_ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b",
    )
    .unwrap()
});

/// Whether `token` contains a dotted-quad IPv4 literal
pub fn is_ip_literal(token: &str) -> bool {
    IP_ADDRESS_PATTERN.is_match(token)
}

/// Parse an attribute-filter query into criteria.
///
/// Returns `None` unless the query contains a `:`. Each whitespace-separated
/// token is split on its first `:`; a token without one becomes a key with
/// a null value.
///
/// ```
/// use provis_core::targets::parse_criteria;
///
/// let criteria = parse_criteria(" foo:bar blah:blech").unwrap();
/// assert_eq!(criteria.get_str("foo").unwrap(), Some("bar"));
/// assert!(parse_criteria("demo.example.com").is_none());
/// ```
pub fn parse_criteria(query: &str) -> Option<Document> {
    if !query.contains(':') {
        return None;
    }
    Some(
        query
            .split_whitespace()
            .map(|token| match token.split_once(':') {
                Some((key, value)) => (key, Value::from(value)),
                None => (token, Value::Null),
            })
            .collect(),
    )
}

/// Resolve `query` against `config` to an ordered list of IP addresses
pub fn resolve_targets(config: &Config, query: &str) -> Result<Vec<String>> {
    let candidates = match parse_criteria(query) {
        Some(criteria) => resolve_filter(config, &criteria)?,
        None => resolve_names(config, query)?,
    };

    let mut resolved: Vec<String> = Vec::with_capacity(candidates.len());
    for ip in candidates.into_iter().flatten() {
        if !ip.is_empty() && !resolved.contains(&ip) {
            resolved.push(ip);
        }
    }
    tracing::debug!(query, targets = ?resolved, "Resolved targets");
    Ok(resolved)
}

fn resolve_filter(config: &Config, criteria: &Document) -> Result<Vec<Option<String>>> {
    let literal = match config.registry().find_servers(criteria) {
        Lookup::Searched(servers) if !servers.is_empty() => {
            return servers
                .iter()
                .map(|server| Ok(server.ip_address()?.map(str::to_string)))
                .collect();
        }
        // No registry at all: the first value is taken literally
        Lookup::NoRegistry => criteria.iter().next().map(|(_, value)| value),
        // Nothing matched: only an explicit address survives
        Lookup::Searched(_) => criteria.get("ip_address"),
    };

    let literal = literal.and_then(|value| value.as_str()).map(str::to_string);
    tracing::debug!(?literal, "No server matched the filter, using literal value");
    Ok(vec![literal])
}

fn resolve_names(config: &Config, query: &str) -> Result<Vec<Option<String>>> {
    let registry = config.registry();
    let mut candidates = Vec::new();

    for token in query.split_whitespace() {
        if is_ip_literal(token) {
            candidates.push(Some(token.to_string()));
        } else if let Some(server) = registry.find_server_config_by_name(token) {
            candidates.push(server.get_str("ip_address")?.map(str::to_string));
        } else {
            tracing::debug!(token, "Dropping token that is neither an IP address nor a known server");
        }
    }

    // The top-level address always joins the candidates, even after matches
    candidates.push(config.ip_address()?.map(str::to_string));
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3.4", true)]
    #[case("255.255.255.255", true)]
    #[case("108.166.98.115", true)]
    #[case("256.1.1.1", false)]
    #[case("1.2.3", false)]
    #[case("demo.example.com", false)]
    #[case("db-01", false)]
    fn test_is_ip_literal(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_ip_literal(token), expected);
    }

    #[test]
    fn test_parse_criteria() {
        let criteria = parse_criteria(" foo:bar blah:blech").unwrap();
        let pairs: Vec<_> = criteria
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("foo".to_string(), Value::from("bar")),
                ("blah".to_string(), Value::from("blech")),
            ]
        );
    }

    #[test]
    fn test_parse_criteria_rejects_non_property_queries() {
        assert!(parse_criteria("  ").is_none());
        assert!(parse_criteria("demo.example.com").is_none());
        assert!(parse_criteria("").is_none());
    }

    #[test]
    fn test_parse_criteria_splits_on_first_colon() {
        let criteria = parse_criteria("url:http://host bare").unwrap();
        assert_eq!(criteria.get_str("url").unwrap(), Some("http://host"));
        assert_eq!(criteria.get("bare"), Some(&Value::Null));
    }
}
