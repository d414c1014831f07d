//! AWS SigV4 signing for signtrip.
//!
//! - [`RequestSigner`] signs requests with [Signature Version 4](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html),
//!   hashing the payload into the canonical request.
//! - Credential providers load a [`Credential`] from static values, the
//!   environment or the shared config files.
//! - [`Session`] ties a context, a credential provider and a region together.
//!
//! ## Example
//!
//! ```no_run
//! use signtrip_aws_v4::{Session, StaticCredentialProvider};
//! use signtrip_core::{time, Body, Sign, SigningParams};
//!
//! # async fn example() -> signtrip_core::Result<()> {
//! let session = Session::new("us-east-1").with_credential_provider(
//!     StaticCredentialProvider::new("access_key_id", "secret_access_key"),
//! );
//!
//! let (mut parts, _) = http::Request::get("https://s3.amazonaws.com/bucket/key")
//!     .body(())?
//!     .into_parts();
//! let params = SigningParams {
//!     service: "s3",
//!     region: session.region(),
//!     time: time::now(),
//! };
//! session.signer().sign(&mut parts, Body::empty(), params).await?;
//! # Ok(())
//! # }
//! ```

mod constants;
mod shared_config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod session;
pub use session::Session;

mod sign_request;
pub use sign_request::RequestSigner;
