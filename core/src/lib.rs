//! Core components for signing HTTP requests inside a transport.
//!
//! This crate provides the foundational types and traits for the signtrip ecosystem.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds implementations for file reading and environment access
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`), service signing
//!   (`SignRequest`), request execution (`Transport`) and logging (`Logger`)
//! - **Signer**: The orchestrator that coordinates credential loading and request signing
//! - **Body**: A request body that is absent, buffered (replayable) or streaming (read once)
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use signtrip_core::{
//!     Body, Context, ProvideCredential, Result, Sign, SignRequest, Signer, SigningCredential,
//!     SigningMetadata, SigningParams,
//! };
//!
//! // Define your credential type
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     token: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.token.is_empty()
//!     }
//! }
//!
//! // Implement credential loader
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             token: "my-token".to_string(),
//!         }))
//!     }
//! }
//!
//! // Implement request signer
//! #[derive(Debug)]
//! struct MyBuilder;
//!
//! #[async_trait]
//! impl SignRequest for MyBuilder {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         req: &mut http::request::Parts,
//!         _body: Body,
//!         _params: SigningParams<'_>,
//!         cred: Option<&Self::Credential>,
//!     ) -> Result<SigningMetadata> {
//!         let cred = cred.expect("signer always passes a credential");
//!         req.headers
//!             .insert("authorization", format!("Bearer {}", cred.token).parse()?);
//!         Ok(SigningMetadata::default())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), MyLoader, MyBuilder);
//!
//! let (mut parts, _) = http::Request::get("https://example.com")
//!     .body(())?
//!     .into_parts();
//! let params = SigningParams {
//!     service: "example",
//!     region: "local",
//!     time: signtrip_core::time::now(),
//! };
//! signer.sign(&mut parts, Body::empty(), params).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod context;
pub use context::{Context, Env, FileRead, NoopEnv, NoopFileRead, OsEnv, StaticEnv};
mod body;
pub use body::{Body, BoxError};
mod transport;
pub use transport::{request_head, Request, Response, Transport};
mod logger;
pub use logger::{LogLogger, Logger, NoopLogger};

mod api;
pub use api::{
    ProvideCredential, Sign, SignRequest, SigningCredential, SigningMetadata, SigningParams,
};
mod request;
pub use request::SigningRequest;
mod signer;
pub use signer::Signer;
