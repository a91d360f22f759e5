//! HTTP client for the AWS Comprehend `DetectSentiment` operation.
//!
//! Requests use the AWS JSON 1.1 protocol and are signed with SigV4. Each
//! call is a single POST: no retry, no batching.

use std::time::Duration;

use chrono::{DateTime, Utc};
use docqa_core::AwsCredentials;
use reqwest::{header, Client, StatusCode, Url};

use crate::error::SentimentError;
use crate::signer::{self, SignableRequest, SigningParams};
use crate::types::{AwsErrorBody, DetectSentimentRequest, SentimentResult};

const SERVICE: &str = "comprehend";
const OPERATION: &str = "DetectSentiment";
const TARGET: &str = "Comprehend_20171127.DetectSentiment";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const LANGUAGE_CODE: &str = "en";

/// Client for AWS Comprehend sentiment detection.
///
/// Build it once and share it by reference. Use [`ComprehendClient::new`]
/// for the regional AWS endpoint or [`ComprehendClient::with_endpoint`] to
/// point at a mock server in tests.
pub struct ComprehendClient {
    client: Client,
    credentials: AwsCredentials,
    endpoint: Url,
    host: String,
}

impl ComprehendClient {
    /// Creates a client for `https://comprehend.{region}.amazonaws.com/`.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::MissingCredential`] if the region, access key or
    ///   secret key is blank.
    /// - [`SentimentError::ClientBuild`] if the `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(credentials: AwsCredentials, timeout_secs: u64) -> Result<Self, SentimentError> {
        validate_credentials(&credentials)?;
        let endpoint = format!("https://{SERVICE}.{}.amazonaws.com/", credentials.region);
        Self::with_endpoint(credentials, timeout_secs, &endpoint)
    }

    /// Creates a client with a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`ComprehendClient::new`], plus
    /// [`SentimentError::InvalidEndpoint`] if `endpoint` is not a URL with a
    /// host.
    pub fn with_endpoint(
        credentials: AwsCredentials,
        timeout_secs: u64,
        endpoint: &str,
    ) -> Result<Self, SentimentError> {
        validate_credentials(&credentials)?;

        let endpoint_url = Url::parse(endpoint).map_err(|e| SentimentError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        let host = host_header(&endpoint_url).ok_or_else(|| SentimentError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: "endpoint has no host".to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("docqa/0.1 (sentiment)")
            .build()
            .map_err(SentimentError::ClientBuild)?;

        Ok(Self {
            client,
            credentials,
            endpoint: endpoint_url,
            host,
        })
    }

    /// Detects the sentiment of `text` (English).
    ///
    /// The provider result is returned as-is. On failure the error is
    /// logged and returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Http`] on network failure.
    /// - [`SentimentError::Api`] if Comprehend returns a non-2xx status.
    /// - [`SentimentError::Json`] if the response body does not match
    ///   [`SentimentResult`].
    pub async fn detect_sentiment(&self, text: &str) -> Result<SentimentResult, SentimentError> {
        let result = self.send_detect_sentiment(text, Utc::now()).await;
        if let Err(e) = &result {
            tracing::error!(
                error = %e,
                kind = %e.kind(),
                region = %self.credentials.region,
                text_length = text.len(),
                "error analyzing sentiment"
            );
        }
        result
    }

    async fn send_detect_sentiment(
        &self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<SentimentResult, SentimentError> {
        let body = serde_json::to_vec(&DetectSentimentRequest {
            text,
            language_code: LANGUAGE_CODE,
        })
        .map_err(|source| SentimentError::Json {
            context: format!("{OPERATION} request"),
            source,
        })?;

        let amz_date = signer::amz_date(now);
        let mut headers: Vec<(&str, &str)> = vec![
            ("content-type", CONTENT_TYPE),
            ("host", self.host.as_str()),
            ("x-amz-date", amz_date.as_str()),
            ("x-amz-target", TARGET),
        ];
        if let Some(token) = self.credentials.session_token.as_deref() {
            headers.push(("x-amz-security-token", token));
        }

        let authorization = signer::authorization(
            &SigningParams {
                access_key_id: &self.credentials.access_key_id,
                secret_access_key: &self.credentials.secret_access_key,
                region: &self.credentials.region,
                service: SERVICE,
                time: now,
            },
            &SignableRequest {
                method: "POST",
                path: self.endpoint.path(),
                query: "",
                headers: &headers,
                payload: &body,
            },
        );

        // reqwest derives `Host` from the URL itself.
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(header::AUTHORIZATION, authorization);
        for (name, value) in headers.iter().filter(|(name, _)| *name != "host") {
            request = request.header(*name, *value);
        }

        tracing::debug!(text_length = text.len(), "sending {OPERATION} request");

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|source| SentimentError::Http {
                operation: OPERATION,
                source,
            })?;
        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(|source| SentimentError::Http {
                operation: OPERATION,
                source,
            })?;

        if !status.is_success() {
            return Err(api_error(status, &payload));
        }

        serde_json::from_str(&payload).map_err(|source| SentimentError::Json {
            context: format!("{OPERATION} response"),
            source,
        })
    }
}

fn validate_credentials(credentials: &AwsCredentials) -> Result<(), SentimentError> {
    let required = [
        ("AWS_REGION", &credentials.region),
        ("AWS_ACCESS_KEY_ID", &credentials.access_key_id),
        ("AWS_SECRET_ACCESS_KEY", &credentials.secret_access_key),
    ];
    for (var, value) in required {
        if value.trim().is_empty() {
            tracing::error!(missing = var, "AWS credentials are incomplete");
            return Err(SentimentError::MissingCredential(var));
        }
    }
    Ok(())
}

/// `Host` header value as reqwest will send it: the port is included only
/// when it differs from the scheme default.
fn host_header(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Maps a non-2xx Comprehend response to [`SentimentError::Api`].
///
/// `__type` values look like `com.amazon.coral.service#ThrottlingException`;
/// only the part after `#` is kept.
fn api_error(status: StatusCode, payload: &str) -> SentimentError {
    let parsed: Option<AwsErrorBody> = serde_json::from_str(payload).ok();
    let (error_type, message) = match parsed {
        Some(body) => (body.error_type, body.message),
        None => (None, None),
    };

    let error_type = error_type
        .map(|t| t.rsplit('#').next().unwrap_or_default().to_string())
        .unwrap_or_else(|| "UnknownError".to_string());
    let message = message.unwrap_or_else(|| {
        let trimmed = payload.trim();
        if trimmed.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            trimmed.chars().take(200).collect()
        }
    });

    SentimentError::Api {
        status: status.as_u16(),
        error_type,
        message,
    }
}

#[cfg(test)]
mod tests {
    use docqa_core::ErrorKind;

    use super::*;

    fn credentials() -> AwsCredentials {
        AwsCredentials {
            region: "us-west-2".to_string(),
            access_key_id: "AKIDTEST".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: None,
        }
    }

    #[test]
    fn new_targets_regional_endpoint() {
        let client = ComprehendClient::new(credentials(), 30).expect("valid credentials");
        assert_eq!(
            client.endpoint.as_str(),
            "https://comprehend.us-west-2.amazonaws.com/"
        );
        assert_eq!(client.host, "comprehend.us-west-2.amazonaws.com");
    }

    #[test]
    fn blank_secret_is_rejected_before_any_request() {
        let mut creds = credentials();
        creds.secret_access_key = "  ".to_string();
        let err = ComprehendClient::new(creds, 30)
            .err()
            .expect("blank secret must be rejected");
        assert!(matches!(
            err,
            SentimentError::MissingCredential("AWS_SECRET_ACCESS_KEY")
        ));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn blank_region_is_rejected() {
        let mut creds = credentials();
        creds.region = String::new();
        let err = ComprehendClient::new(creds, 30).err().unwrap();
        assert!(matches!(err, SentimentError::MissingCredential("AWS_REGION")));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = ComprehendClient::with_endpoint(credentials(), 30, "not a url")
            .err()
            .unwrap();
        assert!(matches!(err, SentimentError::InvalidEndpoint { .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn host_header_includes_non_default_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(host_header(&url).as_deref(), Some("127.0.0.1:8080"));

        let url = Url::parse("https://comprehend.eu-west-1.amazonaws.com/").unwrap();
        assert_eq!(
            host_header(&url).as_deref(),
            Some("comprehend.eu-west-1.amazonaws.com")
        );
    }

    #[test]
    fn api_error_strips_type_namespace() {
        let err = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"__type":"com.amazon.coral.service#TextSizeLimitExceededException","Message":"too long"}"#,
        );
        match err {
            SentimentError::Api {
                status,
                error_type,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(error_type, "TextSizeLimitExceededException");
                assert_eq!(message, "too long");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_status_reason() {
        let err = api_error(StatusCode::SERVICE_UNAVAILABLE, "");
        match err {
            SentimentError::Api {
                error_type,
                message,
                ..
            } => {
                assert_eq!(error_type, "UnknownError");
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
