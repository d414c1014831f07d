use crate::{
    Body, Context, Error, ProvideCredential, Result, Sign, SignRequest, SigningCredential,
    SigningMetadata, SigningParams,
};
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
///
/// It loads credentials through a [`ProvideCredential`], caches them until
/// they are no longer valid, and hands them to a [`SignRequest`].
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the context used to load credentials.
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    async fn credential(&self) -> Result<K> {
        let cred = self.credential.lock().expect("lock poisoned").clone();
        if let Some(cred) = cred.filter(|c| c.is_valid()) {
            return Ok(cred);
        }

        let Some(cred) = self.loader.provide_credential(&self.ctx).await? else {
            return Err(Error::credential_invalid(
                "no credential found from the configured provider",
            ));
        };
        if !cred.is_valid() {
            return Err(Error::credential_expired(
                "credential loaded from provider is already expired",
            ));
        }

        *self.credential.lock().expect("lock poisoned") = Some(cred.clone());
        Ok(cred)
    }
}

#[async_trait::async_trait]
impl<K: SigningCredential> Sign for Signer<K> {
    async fn sign(
        &self,
        req: &mut http::request::Parts,
        body: Body,
        params: SigningParams<'_>,
    ) -> Result<SigningMetadata> {
        let cred = self.credential().await?;

        self.builder
            .sign_request(&self.ctx, req, body, params, Some(&cred))
            .await
    }
}
