use crate::constants::{
    AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, CONTENT_SHA256_SERVICES, SINGLE_ENCODE_SERVICES,
    X_AMZN_TRACE_ID, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};
use crate::Credential;
use async_trait::async_trait;
use http::header::{self, HeaderName};
use http::request::Parts;
use http::{HeaderMap, HeaderValue};
use log::debug;
use percent_encoding::utf8_percent_encode;
use signtrip_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use signtrip_core::time::{format_date, format_iso8601, DateTime};
use signtrip_core::{
    Body, Context, Error, Result, SignRequest, SigningMetadata, SigningParams, SigningRequest,
};
use std::fmt::Write;

/// RequestSigner that implement AWS SigV4.
///
/// The payload is read once and its SHA-256 digest goes into the canonical
/// request. The signer adds `x-amz-date`, `authorization` and, when needed,
/// `x-amz-security-token` and `x-amz-content-sha256`. Everything else in the
/// request is left as is.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestSigner;

impl RequestSigner {
    /// Create a new AWS V4 signer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        body: Body,
        params: SigningParams<'_>,
        credential: Option<&Self::Credential>,
    ) -> Result<SigningMetadata> {
        let Some(cred) = credential else {
            return Err(Error::credential_invalid(
                "aws v4 signing requires a credential",
            ));
        };

        let mut signed_req = SigningRequest::build(req)?;
        let payload = body.collect().await?;

        // Headers written back to the request once signing succeeds.
        let mut output = HeaderMap::new();
        let payload_hash =
            canonicalize_header(&mut signed_req, &mut output, cred, &payload, params)?;
        canonicalize_query(&mut signed_req);

        // build canonical request and string to sign.
        let signed_headers = signed_header_names(&signed_req);
        let creq = canonical_request_string(
            &signed_req,
            &signed_headers,
            &payload_hash,
            params.service,
        )?;
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/aws4_request",
            format_date(params.time),
            params.region,
            params.service
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "AWS4-HMAC-SHA256")?;
            writeln!(f, "{}", format_iso8601(params.time))?;
            writeln!(f, "{}", &scope)?;
            write!(f, "{}", &encoded_req)?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &cred.secret_access_key,
            params.time,
            params.region,
            params.service,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id,
            scope,
            signed_headers.join(";"),
            signature
        ))
        .map_err(|e| {
            Error::request_invalid("failed to create authorization header").with_source(e)
        })?;
        authorization.set_sensitive(true);
        output.insert(header::AUTHORIZATION, authorization);

        // Apply to the request.
        req.headers.extend(output);

        Ok(SigningMetadata {
            scope,
            signed_headers: signed_headers.into_iter().map(|v| v.to_string()).collect(),
            signature,
        })
    }
}

/// Headers that never take part in the signature.
fn is_signed_header(name: &str) -> bool {
    name != header::AUTHORIZATION.as_str()
        && name != header::USER_AGENT.as_str()
        && name != X_AMZN_TRACE_ID
}

fn signed_header_names(ctx: &SigningRequest) -> Vec<&str> {
    ctx.header_name_to_vec_sorted_with_filter(is_signed_header)
}

fn canonical_request_string(
    ctx: &SigningRequest,
    signed_headers: &[&str],
    payload_hash: &str,
    service: &str,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", ctx.method)?;
    // Insert encoded path. S3 encodes it once, every other service encodes
    // the already encoded path again.
    if SINGLE_ENCODE_SERVICES.contains(&service) {
        writeln!(
            f,
            "{}",
            utf8_percent_encode(&ctx.path_percent_decoded(), &AWS_URI_ENCODE_SET)
        )?;
    } else {
        writeln!(f, "{}", utf8_percent_encode(&ctx.path, &AWS_URI_ENCODE_SET))?;
    }
    // Insert query
    writeln!(
        f,
        "{}",
        SigningRequest::query_to_string(ctx.query.clone(), "=", "&")
    )?;
    // Insert signed headers, repeated values joined by `,`
    for header in signed_headers.iter() {
        let values = ctx
            .headers
            .get_all(*header)
            .iter()
            .map(|v| v.to_str())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        writeln!(f, "{}:{}", header, values.join(","))?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;
    write!(f, "{payload_hash}")?;

    Ok(f)
}

fn canonicalize_header(
    ctx: &mut SigningRequest,
    output: &mut HeaderMap,
    cred: &Credential,
    payload: &[u8],
    params: SigningParams<'_>,
) -> Result<String> {
    // Header names and values need to be normalized according to Step 4 of https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html
    for (_, value) in ctx.headers.iter_mut() {
        SigningRequest::header_value_normalize(value)
    }

    // Sign HOST header if not present, it's derived from the URI by the transport.
    if ctx.headers.get(header::HOST).is_none() {
        ctx.headers
            .insert(header::HOST, HeaderValue::from_str(ctx.authority.as_str())?);
    }

    // Insert DATE header, the signing time always wins.
    let date = HeaderValue::try_from(format_iso8601(params.time))?;
    add_header(ctx, output, X_AMZ_DATE, date);

    // Use the payload digest unless the caller provided one.
    let content_sha256 = HeaderName::from_static(X_AMZ_CONTENT_SHA_256);
    let payload_hash = match ctx.header_get_or_default(&content_sha256)? {
        "" => {
            let digest = hex_sha256(payload);
            if CONTENT_SHA256_SERVICES.contains(&params.service) {
                add_header(ctx, output, X_AMZ_CONTENT_SHA_256, digest.parse()?);
            }
            digest
        }
        v => v.to_string(),
    };

    // Insert X_AMZ_SECURITY_TOKEN header if security token exists.
    if let Some(token) = &cred.session_token {
        let mut value = HeaderValue::from_str(token)?;
        // Set token value sensitive to valid leaking.
        value.set_sensitive(true);

        add_header(ctx, output, X_AMZ_SECURITY_TOKEN, value);
    }

    Ok(payload_hash)
}

/// Add a header that is both signed and sent.
fn add_header(
    ctx: &mut SigningRequest,
    output: &mut HeaderMap,
    name: &'static str,
    value: HeaderValue,
) {
    ctx.headers.insert(name, value.clone());
    output.insert(name, value);
}

fn canonicalize_query(ctx: &mut SigningRequest) {
    ctx.query = ctx
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
