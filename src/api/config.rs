use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, Secret};

/// Default v1 API base url
pub const API_HOST: &str = "api.openai.com/v1";
/// Organization header
pub const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub api_key: Option<Secret<String>>,
    pub api_key_env_var: String,
    pub org_id: Option<String>,
    pub org_id_env_var: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: API_HOST.to_string(),
            api_key: None,
            api_key_env_var: "OPENAI_API_KEY".to_string(),
            org_id: None,
            org_id_env_var: "OPENAI_ORG".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the API key manually. Otherwise it is loaded from the environment.
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(Secret::from(api_key.into()));
        self
    }

    /// Set the environment variable name for the API key.
    pub fn with_api_key_env_var<S: Into<String>>(mut self, api_key_env_var: S) -> Self {
        self.api_key_env_var = api_key_env_var.into();
        self
    }

    /// Set the organization id manually. Otherwise it is loaded from the environment.
    pub fn with_org_id<S: Into<String>>(mut self, org_id: S) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    pub fn with_api_host<S: AsRef<str>>(mut self, host: S) -> Self {
        self.host = host.as_ref().to_string();
        self
    }

    /// Both credentials are required at startup; a missing one is fatal.
    pub(crate) fn load_credentials(&mut self) -> crate::Result<()> {
        self.api_key = Some(self.load_api_key()?);
        self.org_id = Some(self.load_org_id()?);
        Ok(())
    }

    fn load_api_key(&self) -> crate::Result<Secret<String>> {
        if let Some(api_key) = self.api_key.as_ref() {
            crate::trace!("Using api_key from parameter");
            return Ok(api_key.to_owned());
        }
        crate::trace!("api_key not set. Attempting to load from .env");
        dotenvy::dotenv().ok();

        match dotenvy::var(&self.api_key_env_var) {
            Ok(api_key) => Ok(api_key.into()),
            Err(_) => {
                crate::trace!(
                    "{} not found in dotenv, nor was it set manually",
                    self.api_key_env_var
                );
                crate::bail!("Failed to load api_key from parameter or .env")
            }
        }
    }

    fn load_org_id(&self) -> crate::Result<String> {
        if let Some(org_id) = self.org_id.as_ref() {
            crate::trace!("Using org_id from parameter");
            return Ok(org_id.to_owned());
        }
        crate::trace!("org_id not set. Attempting to load from .env");
        dotenvy::dotenv().ok();

        match dotenvy::var(&self.org_id_env_var) {
            Ok(org_id) => Ok(org_id),
            Err(_) => {
                crate::trace!(
                    "{} not found in dotenv, nor was it set manually",
                    self.org_id_env_var
                );
                crate::bail!("Failed to load org_id from parameter or .env")
            }
        }
    }

    pub(crate) fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(org_id) = &self.org_id {
            if let Ok(header_value) = HeaderValue::from_str(org_id.as_str()) {
                headers.insert(ORGANIZATION_HEADER, header_value);
            } else {
                crate::error!("Failed to create header value from org_id value");
            }
        }
        if let Some(api_key) = &self.api_key {
            if let Ok(header_value) =
                HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            {
                headers.insert(AUTHORIZATION, header_value);
            } else {
                crate::error!("Failed to create header value from authorization value");
            }
        }

        headers
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("https://{}{}", self.host, path)
    }
}
