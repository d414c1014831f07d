//! Sign outgoing HTTP requests transparently inside your transport.
//!
//! [`SigningTransport`] wraps any [`Transport`]: every request it executes is
//! buffered, signed with AWS SigV4 and logged before being handed to the inner
//! transport, which defaults to [`ReqwestTransport`].
//!
//! ```no_run
//! use signtrip::aws::{Session, StaticCredentialProvider};
//! use signtrip::{Body, SigningTransport, Transport};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let session = Session::new("eu-west-1").with_credential_provider(
//!     StaticCredentialProvider::new("access_key_id", "secret_access_key"),
//! );
//! let transport = SigningTransport::new(&session, "s3");
//!
//! let mut req = http::Request::put("https://s3.eu-west-1.amazonaws.com/bucket/key")
//!     .body(Body::from("Hello, World!"))?;
//! let resp = transport.execute(&mut req).await?;
//! assert!(resp.status().is_success());
//! # Ok(())
//! # }
//! ```
//!
//! Loading the session from the usual AWS environment variables and shared
//! config files:
//!
//! ```no_run
//! use signtrip::aws::Session;
//! use signtrip::{default_context, SigningTransport};
//!
//! # async fn example() -> signtrip::Result<()> {
//! let session = Session::load(default_context()).await?;
//! let transport = SigningTransport::new(&session, "dynamodb");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use signtrip_core::*;
pub use signtrip_transport_reqwest::ReqwestTransport;

mod context;
pub use context::default_context;

mod transport;
pub use transport::SigningTransport;

/// AWS SigV4 credentials, providers and session.
pub mod aws {
    pub use signtrip_aws_v4::*;
}
