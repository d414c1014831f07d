use crate::{Body, Result};
use bytes::Bytes;
use http::{HeaderMap, StatusCode, Uri};
use std::fmt::Debug;

/// The request handled by a [`Transport`].
pub type Request = http::Request<Body>;

/// Transport executes prepared requests.
///
/// Implementations own connection handling, timeouts and retries. A transport
/// may read the request body; callers that need it afterwards should hand it
/// a replayable body.
#[async_trait::async_trait]
pub trait Transport: Debug + Send + Sync + 'static {
    /// Send the request and return the collected response.
    async fn execute(&self, req: &mut Request) -> Result<Response>;
}

/// A collected response together with the head of the request that produced it.
#[derive(Debug)]
pub struct Response {
    inner: http::Response<Bytes>,
    request: http::Request<()>,
}

impl Response {
    /// Create a response for the given request head.
    pub fn new(inner: http::Response<Bytes>, request: http::Request<()>) -> Self {
        Self { inner, request }
    }

    /// Status code of the response.
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Response body.
    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// The request as it was sent, including every header the signer added.
    pub fn request(&self) -> &http::Request<()> {
        &self.request
    }

    /// Effective URL of the request.
    pub fn url(&self) -> &Uri {
        self.request.uri()
    }

    /// Consume self and return the inner response.
    pub fn into_inner(self) -> http::Response<Bytes> {
        self.inner
    }
}

/// Copy the head of a request: method, URI, version and headers.
///
/// Extensions are not cloneable and are left out.
pub fn request_head(req: &Request) -> http::Request<()> {
    let mut head = http::Request::new(());
    *head.method_mut() = req.method().clone();
    *head.uri_mut() = req.uri().clone();
    *head.version_mut() = req.version();
    *head.headers_mut() = req.headers().clone();
    head
}
