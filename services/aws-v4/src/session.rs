use crate::constants::{AWS_DEFAULT_REGION, AWS_REGION};
use crate::shared_config::{config_file, config_section, load_ini, profile_name, section};
use crate::{Credential, DefaultCredentialProvider, RequestSigner};
use log::debug;
use signtrip_core::{Context, Error, ProvideCredential, Result, Signer};
use std::sync::Arc;

/// Session bundles what is needed to sign requests for one AWS account:
/// a [`Context`], a credential provider and a region.
///
/// ```no_run
/// use signtrip_aws_v4::Session;
/// use signtrip_core::{Context, OsEnv};
/// use signtrip_file_read_tokio::TokioFileRead;
///
/// # async fn example() -> signtrip_core::Result<()> {
/// let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
/// let session = Session::load(ctx).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = Credential>>,
    region: String,
}

impl Session {
    /// Create a session for `region` with the [`DefaultCredentialProvider`]
    /// and an empty context.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            ctx: Context::new(),
            provider: Arc::new(DefaultCredentialProvider::new()),
            region: region.into(),
        }
    }

    /// Load a session from the environment described by `ctx`.
    ///
    /// The region comes from `AWS_REGION`, then `AWS_DEFAULT_REGION`, then the
    /// `region` of the selected profile in the shared config file.
    pub async fn load(ctx: Context) -> Result<Self> {
        let region = match load_region(&ctx).await? {
            Some(region) => region,
            None => {
                return Err(Error::config_invalid(
                    "no region found in env or shared config",
                ))
            }
        };
        debug!("loaded session for region {region}");

        Ok(Self::new(region).with_context(ctx))
    }

    /// Replace the credential provider.
    pub fn with_credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        self.provider = Arc::new(provider);
        self
    }

    /// Replace the context.
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// Replace the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Region of this session.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Context of this session.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Build a fresh SigV4 signer over this session's credentials.
    ///
    /// Every signer carries its own credential cache.
    pub fn signer(&self) -> Signer<Credential> {
        Signer::new(self.ctx.clone(), self.provider.clone(), RequestSigner::new())
    }
}

async fn load_region(ctx: &Context) -> Result<Option<String>> {
    let non_empty = |k: &str| ctx.env_var(k).filter(|v| !v.is_empty());
    if let Some(region) = non_empty(AWS_REGION).or_else(|| non_empty(AWS_DEFAULT_REGION)) {
        return Ok(Some(region));
    }

    let Some(conf) = load_ini(ctx, &config_file(ctx, None)).await? else {
        return Ok(None);
    };
    let profile = profile_name(ctx, "default");
    Ok(section(&conf, &config_section(&profile))
        .and_then(|props| props.get("region"))
        .map(|v| v.to_string()))
}
