use crate::time::DateTime;
use crate::{Body, Context, Result};
use std::fmt::Debug;
use std::sync::Arc;

/// SigningCredential is the trait implemented by credentials used for signing.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is still usable.
    ///
    /// Returning `false` makes the [`crate::Signer`] reload it.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential is the trait used by signer to load credentials from the environment.
///
/// Services may require different credentials to sign the request. AWS needs
/// an access key pair, other services may need a token.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load credential from current env.
    ///
    /// Returns `Ok(None)` when this provider has nothing to offer, so that a
    /// chain can move on to the next one.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

#[async_trait::async_trait]
impl<T: ProvideCredential + ?Sized> ProvideCredential for Arc<T> {
    type Credential = T::Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.as_ref().provide_credential(ctx).await
    }
}

/// SignRequest is the trait implemented by service specific signing algorithms.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request head in place.
    ///
    /// `body` yields the payload that will be sent. Implementations may read
    /// it to compute a digest; they must not touch `req.uri` or the method.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        body: Body,
        params: SigningParams<'_>,
        credential: Option<&Self::Credential>,
    ) -> Result<SigningMetadata>;
}

/// Sign is the object-safe signing capability consumed by transports.
///
/// [`crate::Signer`] is the usual implementation. Tests and callers with
/// their own algorithm can implement it directly.
#[async_trait::async_trait]
pub trait Sign: Debug + Send + Sync + 'static {
    /// Sign the request head in place and return what was signed.
    async fn sign(
        &self,
        req: &mut http::request::Parts,
        body: Body,
        params: SigningParams<'_>,
    ) -> Result<SigningMetadata>;
}

/// Per-request inputs of a signing operation.
#[derive(Debug, Clone, Copy)]
pub struct SigningParams<'a> {
    /// Service name the request is addressed to, for example `s3`.
    ///
    /// May be empty.
    pub service: &'a str,
    /// Region the request is addressed to.
    pub region: &'a str,
    /// Signing time.
    pub time: DateTime,
}

/// Outcome of a successful signing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigningMetadata {
    /// Credential scope, for example `20220313/us-east-1/s3/aws4_request`.
    pub scope: String,
    /// Lower-cased names of the signed headers, sorted.
    pub signed_headers: Vec<String>,
    /// Hex encoded signature.
    pub signature: String,
}
