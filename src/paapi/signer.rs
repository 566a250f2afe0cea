//! AWS Signature Version 4 request signing.
//!
//! PAAPI5 requests are signed like any other AWS JSON-RPC call:
//!
//! 1. Build the canonical request from method, path, query, signed headers and the body hash.
//! 2. Build the string to sign from the timestamp, credential scope and canonical request hash.
//! 3. Derive the signing key with the HMAC-SHA256 chain over date, region and service.
//! 4. Attach `x-amz-date` and `authorization` to the request headers.

use crate::error::{PaapiError, Result};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Service name in the PAAPI5 credential scope.
pub const PAAPI_SERVICE: &str = "ProductAdvertisingAPI";

type HmacSha256 = Hmac<Sha256>;

/// Access key pair used only for signing.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self { access_key: access_key.into(), secret_key: secret_key.into() }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// A request whose body and headers are final and ready to be signed.
///
/// Header names are kept lowercase; the map ordering doubles as canonical ordering.
#[derive(Debug, Clone)]
pub struct SignableRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl SignableRequest {
    pub fn new(method: &str, host: &str, path: &str, body: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("host".to_string(), host.to_string());
        Self {
            method: method.to_uppercase(),
            path: path.to_string(),
            query: String::new(),
            headers,
            body: body.into(),
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_lowercase(), value.into());
        self
    }
}

/// Signs requests for one region/service pair.
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
    region: String,
    service: String,
}

impl Signer {
    pub fn new(credentials: Credentials, region: impl Into<String>, service: impl Into<String>) -> Self {
        Self { credentials, region: region.into(), service: service.into() }
    }

    /// Signer for the PAAPI5 service in the given region.
    pub fn paapi(credentials: Credentials, region: impl Into<String>) -> Self {
        Self::new(credentials, region, PAAPI_SERVICE)
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Adds `x-amz-date` and `authorization` to the request.
    ///
    /// Every header present at this point is signed, so nothing may be added afterwards.
    pub fn sign(&self, request: &mut SignableRequest, now: DateTime<Utc>) -> Result<()> {
        let timestamp = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();
        request.headers.insert("x-amz-date".to_string(), timestamp.clone());

        let signed_headers = request.headers.keys().cloned().collect::<Vec<_>>().join(";");
        let canonical_request = canonical_request(request, &signed_headers);
        trace!("Canonical request:\n{}", canonical_request);

        let scope = format!("{}/{}/{}/aws4_request", date, self.region, self.service);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            timestamp,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let key = signing_key(&self.credentials.secret_key, &date, &self.region, &self.service)?;
        let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

        request.headers.insert(
            "authorization".to_string(),
            format!(
                "{} Credential={}/{}, SignedHeaders={}, Signature={}",
                ALGORITHM, self.credentials.access_key, scope, signed_headers, signature
            ),
        );
        Ok(())
    }
}

fn canonical_request(request: &SignableRequest, signed_headers: &str) -> String {
    let canonical_headers: String = request
        .headers
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, collapse_whitespace(value.trim())))
        .collect();

    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method,
        canonical_uri(&request.path),
        canonical_query(&request.query),
        canonical_headers,
        signed_headers,
        hex::encode(Sha256::digest(request.body.as_bytes()))
    )
}

fn canonical_uri(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_string();
    }
    path.split('/').map(|segment| urlencoding::encode(segment).into_owned()).collect::<Vec<_>>().join("/")
}

/// Expects decoded `key=value` pairs and encodes them for signing.
fn canonical_query(query: &str) -> String {
    let mut params: Vec<(String, String)> = query
        .split('&')
        .filter(|p| !p.is_empty())
        .map(|p| p.split_once('=').unwrap_or((p, "")))
        .map(|(k, v)| (urlencoding::encode(k).into_owned(), urlencoding::encode(v).into_owned()))
        .collect();
    params.sort_unstable();
    params.iter().map(|(k, v)| format!("{}={}", k, v)).collect::<Vec<_>>().join("&")
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Result<Vec<u8>> {
    let date_key = hmac_sha256(format!("AWS4{}", secret_key).as_bytes(), date.as_bytes())?;
    let region_key = hmac_sha256(&date_key, region.as_bytes())?;
    let service_key = hmac_sha256(&region_key, service.as_bytes())?;
    hmac_sha256(&service_key, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| PaapiError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EXAMPLE_SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    #[test]
    fn test_signing_key_matches_aws_example() {
        let key = signing_key(EXAMPLE_SECRET, "20120215", "us-east-1", "iam").unwrap();
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn test_sign_matches_aws_list_users_example() {
        let signer = Signer::new(Credentials::new("AKIDEXAMPLE", EXAMPLE_SECRET), "us-east-1", "iam");
        let mut request = SignableRequest::new("GET", "iam.amazonaws.com", "/", "")
            .header("Content-Type", "application/x-www-form-urlencoded; charset=utf-8");
        request.query = "Version=2010-05-08&Action=ListUsers".to_string();

        let now = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
        signer.sign(&mut request, now).unwrap();

        assert_eq!(request.headers["x-amz-date"], "20150830T123600Z");
        assert_eq!(
            request.headers["authorization"],
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
             SignedHeaders=content-type;host;x-amz-date, \
             Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }

    #[test]
    fn test_paapi_scope_and_signed_headers() {
        let signer = Signer::paapi(Credentials::new("AKID", "secret"), "eu-west-1");
        let mut request =
            SignableRequest::new("post", "webservices.amazon.de", "/paapi5/getitems", "{}")
                .header("X-Amz-Target", "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetItems")
                .header("Content-Encoding", "amz-1.0");

        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        signer.sign(&mut request, now).unwrap();

        let auth = &request.headers["authorization"];
        assert!(auth.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKID/20240102/eu-west-1/ProductAdvertisingAPI/aws4_request"
        ));
        assert!(auth.contains("SignedHeaders=content-encoding;host;x-amz-date;x-amz-target"));
        let signature = auth.rsplit("Signature=").next().unwrap();
        assert_eq!(signature.len(), 64);
        assert_eq!(request.method, "POST");
    }

    #[test]
    fn test_signature_covers_body() {
        let signer = Signer::paapi(Credentials::new("AKID", "secret"), "us-east-1");
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let mut a = SignableRequest::new("POST", "webservices.amazon.com", "/paapi5/searchitems", r#"{"Keywords":"a"}"#);
        let mut b = SignableRequest::new("POST", "webservices.amazon.com", "/paapi5/searchitems", r#"{"Keywords":"b"}"#);
        signer.sign(&mut a, now).unwrap();
        signer.sign(&mut b, now).unwrap();

        assert_ne!(a.headers["authorization"], b.headers["authorization"]);
    }

    #[test]
    fn test_canonical_helpers() {
        assert_eq!(canonical_uri(""), "/");
        assert_eq!(canonical_uri("/paapi5/searchitems"), "/paapi5/searchitems");
        assert_eq!(canonical_uri("/a b/c"), "/a%20b/c");
        assert_eq!(canonical_query("b=2&a=1"), "a=1&b=2");
        assert_eq!(canonical_query("b=x y&a=1/2&c"), "a=1%2F2&b=x%20y&c=");
        assert_eq!(canonical_query(""), "");
        assert_eq!(collapse_whitespace("a   b  c"), "a b c");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("AKID", "super-secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("AKID"));
        assert!(!debug.contains("super-secret"));
    }
}
