use super::{init_signing_test, load_static_credential, send_signed_request};
use anyhow::Result;
use http::{Method, Request, StatusCode};
use log::warn;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use signtrip_core::Body;

#[tokio::test]
async fn test_head_object() -> Result<()> {
    let Some(t) = init_signing_test() else {
        warn!("SIGNTRIP_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let cred = load_static_credential();
    let req = Request::builder()
        .method(Method::HEAD)
        .uri(format!("{}/{}", t.url, "not_exist_file"))
        .body(Body::empty())?;

    let (status, _) = send_signed_request(&t, req, &cred).await?;
    assert_eq!(StatusCode::NOT_FOUND, status);
    Ok(())
}

#[tokio::test]
async fn test_put_object() -> Result<()> {
    let Some(t) = init_signing_test() else {
        warn!("SIGNTRIP_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let cred = load_static_credential();
    let req = Request::builder()
        .method(Method::PUT)
        .uri(format!("{}/{}", t.url, "put_object_test"))
        .body(Body::from("Hello, World!"))?;

    let (status, _) = send_signed_request(&t, req, &cred).await?;
    assert_eq!(StatusCode::OK, status);
    Ok(())
}

#[tokio::test]
async fn test_head_object_with_special_characters() -> Result<()> {
    let Some(t) = init_signing_test() else {
        warn!("SIGNTRIP_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let cred = load_static_credential();
    let req = Request::builder()
        .method(Method::HEAD)
        .uri(format!(
            "{}/{}",
            t.url,
            utf8_percent_encode("!@#$%^&*()_+-=;:'><,/?.txt", NON_ALPHANUMERIC)
        ))
        .body(Body::empty())?;

    let (status, _) = send_signed_request(&t, req, &cred).await?;
    assert_eq!(StatusCode::NOT_FOUND, status);
    Ok(())
}

#[tokio::test]
async fn test_list_bucket() -> Result<()> {
    let Some(t) = init_signing_test() else {
        warn!("SIGNTRIP_AWS_V4_TEST is not set, skipped");
        return Ok(());
    };

    let cred = load_static_credential();
    let req = Request::builder()
        .method(Method::GET)
        .uri(format!(
            "{}?list-type=2&delimiter=/&encoding-type=url",
            t.url
        ))
        .body(Body::empty())?;

    let (status, _) = send_signed_request(&t, req, &cred).await?;
    assert_eq!(StatusCode::OK, status);
    Ok(())
}
