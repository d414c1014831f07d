//! Reqwest-based transport for signtrip.
//!
//! [`ReqwestTransport`] implements [`Transport`] on top of a
//! [`reqwest::Client`]. Timeouts, proxies and TLS are configured on the
//! client:
//!
//! ```no_run
//! use signtrip_transport_reqwest::ReqwestTransport;
//! use std::time::Duration;
//!
//! let client = reqwest::Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .expect("client must build");
//! let transport = ReqwestTransport::new(client);
//! ```

use async_trait::async_trait;
use http_body_util::BodyExt;
use signtrip_core::{request_head, Error, Request, Response, Result, Transport};
use std::mem;

/// Transport backed by [`reqwest::Client`].
#[derive(Debug, Default, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new ReqwestTransport with a reqwest::Client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, req: &mut Request) -> Result<Response> {
        // Replayable bodies stay with the caller; streaming ones are consumed.
        let body = match req.body().try_clone() {
            Some(body) => body,
            None => mem::take(req.body_mut()),
        };
        let content = body.collect().await?;

        let (parts, _) = request_head(req).into_parts();
        let outgoing = reqwest::Request::try_from(http::Request::from_parts(parts, content))
            .map_err(|e| Error::request_invalid("failed to build request").with_source(e))?;

        let resp: http::Response<reqwest::Body> = self
            .client
            .execute(outgoing)
            .await
            .map_err(|e| Error::transport(format!("failed to send request: {e}")).with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::transport(format!("failed to read response body: {e}")).with_source(e)
            })?;

        Ok(Response::new(
            http::Response::from_parts(parts, bs),
            request_head(req),
        ))
    }
}
