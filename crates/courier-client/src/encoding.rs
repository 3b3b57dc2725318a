//! Percent-encoding and URL helpers shared by the request builder and the
//! OAuth 1.0 signer.
//!
//! ## Percent-encoding
//!
//! OAuth 1.0 signatures are computed over RFC 3986 encoded strings, where every
//! byte except the unreserved set `A-Z a-z 0-9 - . _ ~` is encoded as `%XX`
//! with uppercase hex digits. Form-style encoding (`+` for spaces) would
//! produce a different signature and must never be used here.
//!
//! ```rust
//! use courier_client::encoding::percent;
//!
//! assert_eq!(percent::encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
//! assert_eq!(percent::encode("a-b_c.d~e"), "a-b_c.d~e");
//! ```

/// RFC 3986 percent-encoding.
pub mod percent {
    use crate::error::{Error, ErrorKind, Result};

    /// Percent-encode a string, leaving only unreserved characters as-is.
    #[must_use]
    pub fn encode(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Decode a percent-encoded string.
    ///
    /// Fails if the decoded bytes are not valid UTF-8.
    pub fn decode(value: &str) -> Result<String> {
        urlencoding::decode(value)
            .map(|decoded| decoded.into_owned())
            .map_err(|e| Error::with_source(ErrorKind::Other("Invalid percent-encoding".into()), e))
    }

    /// Returns true if `value` consists only of RFC 3986 unreserved characters.
    #[must_use]
    pub fn is_unreserved(value: &str) -> bool {
        value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~'))
    }
}

/// Endpoint resolution against a base URL.
pub mod url {
    /// Returns true if the endpoint carries its own scheme (`http://...`).
    #[must_use]
    pub fn is_absolute(endpoint: &str) -> bool {
        match endpoint.split_once("://") {
            Some((scheme, _)) => {
                !scheme.is_empty()
                    && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            }
            None => false,
        }
    }

    /// Resolve an endpoint against a base URL.
    ///
    /// Absolute endpoints are returned verbatim. Relative endpoints are
    /// appended to the base with exactly one `/` between them.
    ///
    /// ```rust
    /// use courier_client::encoding::url;
    ///
    /// assert_eq!(
    ///     url::resolve("https://demoqa.com", "/Account/v1/Login"),
    ///     "https://demoqa.com/Account/v1/Login"
    /// );
    /// assert_eq!(url::resolve("https://demoqa.com", "https://other.com/x"), "https://other.com/x");
    /// ```
    #[must_use]
    pub fn resolve(base_url: &str, endpoint: &str) -> String {
        if is_absolute(endpoint) {
            return endpoint.to_string();
        }
        let base = base_url.trim_end_matches('/');
        if endpoint.is_empty() {
            return base.to_string();
        }
        if endpoint.starts_with('/') || endpoint.starts_with('?') {
            format!("{}{}", base, endpoint)
        } else {
            format!("{}/{}", base, endpoint)
        }
    }
}
