use crate::{Error, Result};
use bytes::Bytes;
use http_body::{Frame, SizeHint};
use http_body_util::combinators::BoxBody;
use http_body_util::BodyExt;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};

/// Boxed error carried by streaming bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Body of an outgoing request.
///
/// A body is in one of three shapes:
///
/// - absent: the request carries no body at all ([`Body::empty`]),
/// - buffered: the content lives in memory and can be replayed any number of
///   times through [`Body::try_clone`] without copying,
/// - streaming: the content can be read exactly once ([`Body::wrap`]).
///
/// Signing needs the whole payload to compute its digest while the transport
/// needs it again to send it, so the signing transport turns every streaming
/// body into a buffered one before signing.
#[derive(Default)]
pub struct Body {
    inner: Inner,
}

#[derive(Default)]
enum Inner {
    #[default]
    Absent,
    Buffered(Bytes),
    Streaming(BoxBody<Bytes, BoxError>),
}

impl Body {
    /// Create an absent body.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a streaming body that can only be read once.
    pub fn wrap<B>(body: B) -> Self
    where
        B: http_body::Body<Data = Bytes> + Send + Sync + 'static,
        B::Error: Into<BoxError>,
    {
        Self {
            inner: Inner::Streaming(body.map_err(Into::<BoxError>::into).boxed()),
        }
    }

    /// Returns `true` if the request carries no body at all.
    ///
    /// A present but zero-length body is not absent.
    pub fn is_absent(&self) -> bool {
        matches!(self.inner, Inner::Absent)
    }

    /// Returns the content if the body is buffered.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.inner {
            Inner::Absent => Some(&[]),
            Inner::Buffered(bs) => Some(bs),
            Inner::Streaming(_) => None,
        }
    }

    /// Create an independent reader over the same content.
    ///
    /// Returns `None` for streaming bodies since they can only be read once.
    pub fn try_clone(&self) -> Option<Body> {
        let inner = match &self.inner {
            Inner::Absent => Inner::Absent,
            Inner::Buffered(bs) => Inner::Buffered(bs.clone()),
            Inner::Streaming(_) => return None,
        };
        Some(Body { inner })
    }

    /// Drain the whole body into memory.
    pub async fn collect(self) -> Result<Bytes> {
        match self.inner {
            Inner::Absent => Ok(Bytes::new()),
            Inner::Buffered(bs) => Ok(bs),
            Inner::Streaming(body) => body
                .collect()
                .await
                .map(|buf| buf.to_bytes())
                .map_err(|e| {
                    Error::request_invalid("failed to read body").with_source(anyhow::anyhow!(e))
                }),
        }
    }
}

impl Debug for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Absent => f.write_str("Body::Absent"),
            Inner::Buffered(bs) => write!(f, "Body::Buffered({} bytes)", bs.len()),
            Inner::Streaming(_) => f.write_str("Body::Streaming"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bs: Bytes) -> Self {
        Self {
            inner: Inner::Buffered(bs),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bs: Vec<u8>) -> Self {
        Bytes::from(bs).into()
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Bytes::from(s).into()
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Bytes::from_static(s.as_bytes()).into()
    }
}

impl From<&'static [u8]> for Body {
    fn from(bs: &'static [u8]) -> Self {
        Bytes::from_static(bs).into()
    }
}

impl http_body::Body for Body {
    type Data = Bytes;
    type Error = BoxError;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut TaskContext<'_>,
    ) -> Poll<Option<std::result::Result<Frame<Bytes>, BoxError>>> {
        match &mut self.get_mut().inner {
            Inner::Absent => Poll::Ready(None),
            Inner::Buffered(bs) if bs.is_empty() => Poll::Ready(None),
            Inner::Buffered(bs) => Poll::Ready(Some(Ok(Frame::data(mem::take(bs))))),
            Inner::Streaming(body) => http_body::Body::poll_frame(Pin::new(body), cx),
        }
    }

    fn is_end_stream(&self) -> bool {
        match &self.inner {
            Inner::Absent => true,
            Inner::Buffered(bs) => bs.is_empty(),
            Inner::Streaming(body) => http_body::Body::is_end_stream(body),
        }
    }

    fn size_hint(&self) -> SizeHint {
        match &self.inner {
            Inner::Absent => SizeHint::with_exact(0),
            Inner::Buffered(bs) => SizeHint::with_exact(bs.len() as u64),
            Inner::Streaming(body) => http_body::Body::size_hint(body),
        }
    }
}
