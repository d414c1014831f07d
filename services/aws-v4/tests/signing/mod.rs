mod standard;

use anyhow::Result;
use http::{Request, StatusCode};
use log::debug;
use signtrip_aws_v4::{Credential, RequestSigner};
use signtrip_core::time::now;
use signtrip_core::{Body, Context, SignRequest, SigningParams, Transport};
use signtrip_transport_reqwest::ReqwestTransport;
use std::env;

/// Load static credential from environment variables
pub fn load_static_credential() -> Credential {
    let access_key =
        env::var("SIGNTRIP_AWS_V4_ACCESS_KEY").expect("SIGNTRIP_AWS_V4_ACCESS_KEY must be set");
    let secret_key =
        env::var("SIGNTRIP_AWS_V4_SECRET_KEY").expect("SIGNTRIP_AWS_V4_SECRET_KEY must be set");
    let session_token = env::var("SIGNTRIP_AWS_V4_SESSION_TOKEN").ok();

    Credential {
        access_key_id: access_key,
        secret_access_key: secret_key,
        session_token,
        expires_in: None,
    }
}

pub struct SigningTest {
    pub ctx: Context,
    pub signer: RequestSigner,
    pub service: String,
    pub region: String,
    pub url: String,
}

/// Initialize test environment, returns `None` unless `SIGNTRIP_AWS_V4_TEST=on`.
pub fn init_signing_test() -> Option<SigningTest> {
    let _ = env_logger::builder().is_test(true).try_init();

    if env::var("SIGNTRIP_AWS_V4_TEST").unwrap_or_default() != "on" {
        return None;
    }

    Some(SigningTest {
        ctx: Context::new(),
        signer: RequestSigner::new(),
        service: env::var("SIGNTRIP_AWS_V4_SERVICE").unwrap_or_else(|_| "s3".to_string()),
        region: env::var("SIGNTRIP_AWS_V4_REGION").expect("SIGNTRIP_AWS_V4_REGION must be set"),
        url: env::var("SIGNTRIP_AWS_V4_URL").expect("SIGNTRIP_AWS_V4_URL must be set"),
    })
}

/// Sign the request, send it and return the status with the response body.
pub async fn send_signed_request(
    t: &SigningTest,
    req: Request<Body>,
    cred: &Credential,
) -> Result<(StatusCode, String)> {
    let (mut parts, body) = req.into_parts();
    let params = SigningParams {
        service: &t.service,
        region: &t.region,
        time: now(),
    };
    let sign_body = body.try_clone().expect("test bodies are buffered");
    t.signer
        .sign_request(&t.ctx, &mut parts, sign_body, params, Some(cred))
        .await?;
    let mut req = Request::from_parts(parts, body);

    debug!("signed request: {req:?}");

    let resp = ReqwestTransport::default().execute(&mut req).await?;
    let status = resp.status();
    let body = String::from_utf8_lossy(resp.body()).to_string();
    debug!("got response: {status} {body}");

    Ok((status, body))
}
