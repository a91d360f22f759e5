use crate::ConfigError;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// AWS credentials for signing Comprehend requests.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[redacted]")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Process configuration.
///
/// Credentials are optional here: each component rejects a missing
/// credential when it is constructed, so a deployment that only uses the
/// heuristic answerer needs no keys at all.
#[derive(Clone)]
pub struct AppConfig {
    pub aws_region: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub http_timeout_secs: u64,
    pub log_level: String,
}

impl AppConfig {
    /// Assembles [`AwsCredentials`] from the individual AWS settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first AWS variable
    /// that is not set.
    pub fn aws_credentials(&self) -> Result<AwsCredentials, ConfigError> {
        let require = |value: &Option<String>, var: &str| -> Result<String, ConfigError> {
            value
                .clone()
                .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
        };

        Ok(AwsCredentials {
            region: require(&self.aws_region, "AWS_REGION")?,
            access_key_id: require(&self.aws_access_key_id, "AWS_ACCESS_KEY_ID")?,
            secret_access_key: require(&self.aws_secret_access_key, "AWS_SECRET_ACCESS_KEY")?,
            session_token: self.aws_session_token.clone(),
        })
    }

    #[must_use]
    pub fn has_openai_api_key(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("aws_region", &self.aws_region)
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field(
                "aws_secret_access_key",
                &self.aws_secret_access_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "aws_session_token",
                &self.aws_session_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
