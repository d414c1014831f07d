use anyhow::Result;
use bytes::Bytes;
use http::StatusCode;
use http_body::Frame;
use http_body_util::StreamBody;
use signtrip::aws::{Session, StaticCredentialProvider};
use signtrip::{Body, ErrorKind, NoopLogger, SigningTransport, Transport};
use std::convert::Infallible;
use wiremock::matchers::{any, body_string, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session(region: &str) -> Session {
    let _ = env_logger::builder().is_test(true).try_init();

    Session::new(region).with_credential_provider(StaticCredentialProvider::new(
        "access_key_id",
        "secret_access_key",
    ))
}

#[tokio::test]
async fn test_get_with_custom_header() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let transport = SigningTransport::new(&session("eu-west-1"), "");

    let mut req = http::Request::get(format!("{}/", server.uri()))
        .header("my-test-header", "my-test-value")
        .body(Body::empty())?;
    let resp = transport.execute(&mut req).await?;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.body(), "OK");

    let sent = resp.request().headers();
    assert!(!sent["x-amz-date"].is_empty());
    assert!(!sent["authorization"].is_empty());
    assert_eq!(sent["my-test-header"], "my-test-value");

    let auth = sent["authorization"].to_str()?;
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=access_key_id/"));
    assert!(auth.contains("/eu-west-1//aws4_request"));
    Ok(())
}

#[tokio::test]
async fn test_put_streaming_body() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/bucket/key"))
        .and(header(
            "x-amz-content-sha256",
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f",
        ))
        .and(header_exists("authorization"))
        .and(body_string("Hello, World!"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let transport = SigningTransport::new(&session("us-east-1"), "s3");

    let chunks: Vec<std::result::Result<Frame<Bytes>, Infallible>> = vec![
        Ok(Frame::data(Bytes::from_static(b"Hello, "))),
        Ok(Frame::data(Bytes::from_static(b"World!"))),
    ];
    let mut req = http::Request::put(format!("{}/bucket/key", server.uri()))
        .body(Body::wrap(StreamBody::new(futures::stream::iter(chunks))))?;
    let resp = transport.execute(&mut req).await?;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        req.body().try_clone().expect("replayable").collect().await?,
        "Hello, World!"
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_credential() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // Empty context: no env, no files, so the default provider finds nothing.
    let transport =
        SigningTransport::new(&Session::new("eu-west-1"), "s3").with_logger(NoopLogger);

    let mut req = http::Request::get(format!("{}/", server.uri())).body(Body::empty())?;
    let err = transport
        .execute(&mut req)
        .await
        .expect_err("signing must fail");

    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    assert!(err.is_credential_error());
    Ok(())
}

#[tokio::test]
async fn test_connection_refused() -> Result<()> {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?;

    let transport = SigningTransport::new(&session("eu-west-1"), "s3");
    let mut req = http::Request::get(format!("http://{addr}/")).body(Body::empty())?;
    let err = transport
        .execute(&mut req)
        .await
        .expect_err("nothing listens on the port");

    assert!(err.is_transport_error());
    assert!(req.headers().contains_key("authorization"));
    Ok(())
}

#[tokio::test]
async fn test_stacked_transports() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let inner = SigningTransport::new(&session("eu-west-1"), "s3");
    let outer = SigningTransport::new(&session("eu-west-1"), "s3").with_transport(inner);

    let mut req = http::Request::delete(format!("{}/bucket/key", server.uri()))
        .body(Body::empty())?;
    let resp = outer.execute(&mut req).await?;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        resp.request().headers().get_all("authorization").iter().count(),
        1
    );
    Ok(())
}
