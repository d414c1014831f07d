use crate::Credential;
use async_trait::async_trait;
use signtrip_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider hands out the same key pair on every call.
///
/// ```
/// use signtrip_aws_v4::StaticCredentialProvider;
///
/// let provider = StaticCredentialProvider::new("access_key_id", "secret_access_key")
///     .with_session_token("session_token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    cred: Credential,
}

impl StaticCredentialProvider {
    /// Create a provider for a long-lived key pair.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            cred: Credential {
                access_key_id: access_key_id.into(),
                secret_access_key: secret_access_key.into(),
                ..Default::default()
            },
        }
    }

    /// Attach a session token, for temporary credentials.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.cred.session_token = Some(token.into());
        self
    }
}

impl From<Credential> for StaticCredentialProvider {
    fn from(cred: Credential) -> Self {
        Self { cred }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.cred.clone()))
    }
}
