//! Field-level checks shared by the entity modules.
//!
//! Messages are written for API clients and end up in the `errors` map of a
//! 400 response.

use rust_decimal::Decimal;
use url::{Host, Url};

use crate::errors::ModelError;

pub fn length(value: &str, min: usize, max: usize) -> Result<(), ModelError> {
    let n = value.chars().count();
    if n < min || n > max {
        return Err(ModelError::Validation(format!("Length must be between {min} and {max}.")));
    }
    Ok(())
}

/// At least one character; whitespace counts.
pub fn non_empty(value: &str) -> Result<(), ModelError> {
    if value.is_empty() {
        return Err(ModelError::Validation("Shorter than minimum length 1.".into()));
    }
    Ok(())
}

const URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Absolute http(s)/ftp(s) URL whose host is an IP literal, `localhost` or a
/// dotted name ending in a top-level domain.
pub fn url(value: &str) -> Result<(), ModelError> {
    let invalid = || ModelError::Validation("Not a valid URL.".into());
    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let parsed = Url::parse(value).map_err(|_| invalid())?;
    if !URL_SCHEMES.contains(&parsed.scheme()) {
        return Err(invalid());
    }

    // userinfo is `user` or `user:password`, neither part containing ':' or '@'
    let authority = value
        .split_once("://")
        .map(|(_, rest)| rest.split(['/', '?', '#']).next().unwrap_or_default())
        .ok_or_else(invalid)?;
    if let Some((userinfo, _)) = authority.rsplit_once('@') {
        let (user, password) = userinfo.split_once(':').unwrap_or((userinfo, ""));
        if user.is_empty() || user.contains('@') || password.contains([':', '@']) {
            return Err(invalid());
        }
    }

    let host_ok = match parsed.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(d)) => d == "localhost" || has_tld(d),
        None => false,
    };
    if !host_ok {
        return Err(invalid());
    }
    Ok(())
}

fn has_tld(domain: &str) -> bool {
    let Some((name, tld)) = domain.rsplit_once('.') else { return false };
    !name.is_empty()
        && !name.starts_with('.')
        && (tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())))
}

pub fn non_negative(value: Decimal) -> Result<(), ModelError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ModelError::Validation("Must be greater than or equal to 0.".into()));
    }
    Ok(())
}
