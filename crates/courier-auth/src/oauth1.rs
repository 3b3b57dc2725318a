//! OAuth 1.0 HMAC-SHA1 request signing (RFC 5849).
//!
//! The signature is computed over a canonical *signature base string*:
//!
//! ```text
//! UPPER(method) & enc(base_url) & enc(k1=v1&k2=v2&...)
//! ```
//!
//! where every key and value is RFC 3986 percent-encoded and the pairs are
//! sorted by encoded key, then encoded value. The HMAC key is
//! `enc(consumer_secret)&enc(token_secret)`; the token secret is empty during
//! the request-token phase, giving a key of the form `secret&`.
//!
//! Everything here is a pure function of its inputs. Nonces and timestamps
//! are supplied by the caller.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use courier_client::encoding::percent;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{Error, ErrorKind, Result};

type HmacSha1 = Hmac<Sha1>;

/// Value of `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// Bodies of this type carry parameters that are signed with the request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Whether a `Content-Type` value names a form-encoded body. Media type
/// parameters such as `charset` are ignored.
pub fn is_form_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

/// Decode the pairs of a form-encoded body.
pub fn form_parameters(body: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body).into_owned().collect()
}

/// Percent-encode, sort, and join parameters into the normalized parameter
/// string.
pub fn normalize_parameters(parameters: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = parameters
        .iter()
        .map(|(k, v)| (percent::encode(k), percent::encode(v)))
        .collect();

    // Byte-wise ordering by key, ties broken by value.
    encoded.sort();

    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the signature base string.
///
/// `base_url` must not contain a query string or fragment; see [`split_url`].
pub fn signature_base_string(method: &str, base_url: &str, parameters: &[(String, String)]) -> String {
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent::encode(base_url),
        percent::encode(&normalize_parameters(parameters))
    )
}

/// Build the HMAC signing key. An empty token secret yields `secret&`.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent::encode(consumer_secret),
        percent::encode(token_secret)
    )
}

/// Compute the base64-encoded HMAC-SHA1 signature.
pub fn sign(
    method: &str,
    base_url: &str,
    parameters: &[(String, String)],
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String> {
    let key = signing_key(consumer_secret, token_secret);
    let base = signature_base_string(method, base_url, parameters);

    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| Error::new(ErrorKind::Signature(e.to_string())))?;
    mac.update(base.as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Split a URL into its signing base (scheme, host, port, path) and the
/// decoded query pairs it carries.
///
/// Scheme and host are lowercased and default ports dropped.
pub fn split_url(url: &str) -> Result<(String, Vec<(String, String)>)> {
    let mut parsed = url::Url::parse(url)?;
    let query: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    parsed.set_query(None);
    parsed.set_fragment(None);
    Ok((parsed.to_string(), query))
}

/// The signing base of `url`: query string and fragment removed.
pub fn base_url(url: &str) -> Result<String> {
    split_url(url).map(|(base, _)| base)
}

/// Serialize `oauth_*` parameters into an `Authorization` header value.
///
/// Values are percent-encoded and double-quoted; keys are emitted in sorted
/// order. Non-`oauth_` parameters are ignored.
pub fn authorization_header(oauth_parameters: &[(String, String)]) -> String {
    let mut pairs: Vec<(&str, &str)> = oauth_parameters
        .iter()
        .filter(|(k, _)| k.starts_with("oauth_"))
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    pairs.sort();

    let fields = pairs
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent::encode(k), percent::encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {}", fields)
}

/// Signs one request with borrowed consumer (and optional token) credentials.
pub struct RequestSigner<'a> {
    consumer_key: &'a str,
    consumer_secret: &'a str,
    token: Option<(&'a str, &'a str)>,
}

impl<'a> RequestSigner<'a> {
    /// Signer for the request-token phase (no token).
    pub fn new(consumer_key: &'a str, consumer_secret: &'a str) -> Self {
        Self {
            consumer_key,
            consumer_secret,
            token: None,
        }
    }

    /// Add an access token and its secret.
    pub fn with_token(mut self, token: &'a str, token_secret: &'a str) -> Self {
        self.token = Some((token, token_secret));
        self
    }

    /// The protocol parameters for one request, without the signature.
    pub fn oauth_parameters(&self, nonce: &str, timestamp: u64) -> Vec<(String, String)> {
        let mut params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.to_string()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ];
        if let Some((token, _)) = self.token {
            params.push(("oauth_token".to_string(), token.to_string()));
        }
        params
    }

    /// Sign a request and return the full `Authorization` header value.
    ///
    /// `parameters` holds the query and form body pairs sent with the request;
    /// pairs already embedded in `url` are included automatically.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        parameters: &[(String, String)],
        nonce: &str,
        timestamp: u64,
    ) -> Result<String> {
        let (base_url, embedded) = split_url(url)?;
        let mut oauth = self.oauth_parameters(nonce, timestamp);

        let mut all: Vec<(String, String)> = oauth.clone();
        all.extend(embedded);
        all.extend(parameters.iter().cloned());

        let token_secret = self.token.map(|(_, secret)| secret).unwrap_or("");
        let signature = sign(method, &base_url, &all, self.consumer_secret, token_secret)?;
        oauth.push(("oauth_signature".to_string(), signature));

        Ok(authorization_header(&oauth))
    }
}
