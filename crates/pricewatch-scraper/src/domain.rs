//! Product-URL validation and hostname derivation.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::ScraperError;

/// Derives the lowercase hostname from a product URL, refusing anything the
/// pipeline must not touch.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] when the URL does not parse, is not
/// http(s), has no host, or (with `reject_private_hosts`) points at
/// localhost or a private/link-local network.
pub fn extract_domain(url: &str, reject_private_hosts: bool) -> Result<String, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason,
    };

    let parsed = reqwest::Url::parse(url).map_err(|e| invalid(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme \"{other}\""))),
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| invalid("URL has no host".to_owned()))?
        .to_ascii_lowercase();

    if reject_private_hosts && is_private_host(&host) {
        return Err(invalid(format!("refusing private host \"{host}\"")));
    }

    Ok(host)
}

/// Localhost, loopback, RFC 1918, and link-local hosts are never scraped:
/// a tracked URL must not become a probe into the network the worker runs in.
fn is_private_host(host: &str) -> bool {
    if host == "localhost" {
        return true;
    }
    if let Ok(v4) = host.parse::<Ipv4Addr>() {
        return v4.is_loopback() || v4.is_private() || v4.is_link_local();
    }
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if let Ok(v6) = bare.parse::<Ipv6Addr>() {
        return v6.is_loopback();
    }
    false
}
