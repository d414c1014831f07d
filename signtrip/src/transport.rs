use async_trait::async_trait;
use signtrip_aws_v4::Session;
use signtrip_core::time::now;
use signtrip_core::{
    Body, LogLogger, Logger, Request, Response, Result, Sign, SigningParams, Transport,
};
use signtrip_transport_reqwest::ReqwestTransport;
use std::mem;
use std::sync::Arc;
use std::time::Instant;

/// Transport that signs every request before handing it to an inner transport.
///
/// For each request it:
///
/// 1. drains the body once into memory and puts a replayable copy back,
/// 2. signs the request head in place with the configured service and region,
/// 3. logs `---> {method} {url}` at debug level,
/// 4. delegates to the inner transport,
/// 5. logs `<--- {status} {url}` at debug level with the `duration` of step 4.
///
/// A signing failure is logged once at error level and returned; the inner
/// transport is not called. Transport failures are returned unchanged.
///
/// The inner transport defaults to [`ReqwestTransport`] and the logger to a
/// [`LogLogger`] tagged with `client=SigningTransport`. Both can be replaced
/// at any time; the change applies to the next request.
#[derive(Debug, Clone)]
pub struct SigningTransport {
    signer: Arc<dyn Sign>,
    service: String,
    region: String,

    transport: Option<Arc<dyn Transport>>,
    logger: Option<Arc<dyn Logger>>,

    default_transport: ReqwestTransport,
    default_logger: LogLogger,
}

impl SigningTransport {
    /// Create a transport signing with a fresh signer over `session`'s
    /// credentials and region.
    ///
    /// `service` may be empty.
    pub fn new(session: &Session, service: impl Into<String>) -> Self {
        Self::from_signer(session.signer(), service, session.region())
    }

    /// Create a transport around any signing implementation.
    pub fn from_signer(
        signer: impl Sign,
        service: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            signer: Arc::new(signer),
            service: service.into(),
            region: region.into(),

            transport: None,
            logger: None,

            default_transport: ReqwestTransport::default(),
            default_logger: LogLogger::new().with_field("client", "SigningTransport"),
        }
    }

    /// Replace the inner transport.
    pub fn with_transport(mut self, transport: impl Transport) -> Self {
        self.set_transport(transport);
        self
    }

    /// Replace the inner transport in place.
    pub fn set_transport(&mut self, transport: impl Transport) {
        self.transport = Some(Arc::new(transport));
    }

    /// Replace the logger.
    pub fn with_logger(mut self, logger: impl Logger) -> Self {
        self.set_logger(logger);
        self
    }

    /// Replace the logger in place.
    pub fn set_logger(&mut self, logger: impl Logger) {
        self.logger = Some(Arc::new(logger));
    }

    /// Service name requests are signed for.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Region requests are signed for.
    pub fn region(&self) -> &str {
        &self.region
    }

    fn transport(&self) -> &dyn Transport {
        match &self.transport {
            Some(transport) => transport.as_ref(),
            None => &self.default_transport,
        }
    }

    fn logger(&self) -> &dyn Logger {
        match &self.logger {
            Some(logger) => logger.as_ref(),
            None => &self.default_logger,
        }
    }

    /// Buffer the body and sign the request head in place.
    ///
    /// The request always gets its body back, even on failure.
    async fn sign(&self, req: &mut Request) -> Result<()> {
        let (mut parts, body) = mem::replace(req, Request::new(Body::empty())).into_parts();

        let (signing_body, body) = match buffer(body).await {
            Ok(bodies) => bodies,
            Err(err) => {
                *req = Request::from_parts(parts, Body::empty());
                return Err(err);
            }
        };

        let params = SigningParams {
            service: &self.service,
            region: &self.region,
            time: now(),
        };
        let result = self.signer.sign(&mut parts, signing_body, params).await;
        *req = Request::from_parts(parts, body);

        result.map(|_| ())
    }
}

/// Drain `body` once and return two readers over the same content.
///
/// Absent bodies stay absent.
async fn buffer(body: Body) -> Result<(Body, Body)> {
    if body.is_absent() {
        return Ok((Body::empty(), Body::empty()));
    }

    let content = body.collect().await?;
    Ok((Body::from(content.clone()), Body::from(content)))
}

#[async_trait]
impl Transport for SigningTransport {
    async fn execute(&self, req: &mut Request) -> Result<Response> {
        if let Err(err) = self.sign(req).await {
            self.logger().error(
                &[("error", err.to_string())],
                format_args!("Couldn't sign the request"),
            );
            return Err(err);
        }

        let logger = self.logger();
        logger.debug(&[], format_args!("---> {} {}", req.method(), req.uri()));

        let start = Instant::now();
        let resp = self.transport().execute(req).await?;
        let elapsed = start.elapsed();

        logger.debug(
            &[("duration", format!("{elapsed:?}"))],
            format_args!("<--- {} {}", resp.status().as_u16(), resp.url()),
        );
        Ok(resp)
    }
}
