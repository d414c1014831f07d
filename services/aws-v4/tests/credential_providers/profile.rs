use super::create_test_context_with_env;
use anyhow::Result;
use signtrip_aws_v4::{DefaultCredentialProvider, ProfileCredentialProvider, Session};
use signtrip_core::time::now;
use signtrip_core::{Body, ProvideCredential, Sign, SigningParams};
use std::io::Write;
use tempfile::NamedTempFile;

fn credentials_file() -> Result<NamedTempFile> {
    let mut f = NamedTempFile::new()?;
    writeln!(f, "[default]")?;
    writeln!(f, "aws_access_key_id = default_access_key_id")?;
    writeln!(f, "aws_secret_access_key = default_secret_access_key")?;
    writeln!(f)?;
    writeln!(f, "[dev]")?;
    writeln!(f, "aws_access_key_id = dev_access_key_id")?;
    writeln!(f, "aws_secret_access_key = dev_secret_access_key")?;
    writeln!(f, "aws_session_token = dev_session_token")?;
    Ok(f)
}

#[tokio::test]
async fn test_profile_credential_provider() -> Result<()> {
    let creds = credentials_file()?;
    let path = creds.path().to_string_lossy().to_string();

    let ctx = create_test_context_with_env(&[("AWS_SHARED_CREDENTIALS_FILE", &path)]);
    let cred = ProfileCredentialProvider::new()
        .provide_credential(&ctx)
        .await?
        .expect("default profile must be loaded");
    assert_eq!(cred.access_key_id, "default_access_key_id");
    assert!(cred.session_token.is_none());

    let ctx = create_test_context_with_env(&[
        ("AWS_SHARED_CREDENTIALS_FILE", &path),
        ("AWS_PROFILE", "dev"),
    ]);
    let cred = ProfileCredentialProvider::new()
        .provide_credential(&ctx)
        .await?
        .expect("dev profile must be loaded");
    assert_eq!(cred.access_key_id, "dev_access_key_id");
    assert_eq!(cred.session_token.as_deref(), Some("dev_session_token"));
    Ok(())
}

#[tokio::test]
async fn test_default_provider_signs_with_profile() -> Result<()> {
    let creds = credentials_file()?;
    let path = creds.path().to_string_lossy().to_string();

    let ctx = create_test_context_with_env(&[
        ("AWS_SHARED_CREDENTIALS_FILE", &path),
        ("AWS_CONFIG_FILE", "/not/exist/config"),
        ("AWS_REGION", "eu-west-1"),
    ]);
    let session = Session::load(ctx)
        .await?
        .with_credential_provider(DefaultCredentialProvider::new());

    let (mut parts, _) = http::Request::get("https://s3.eu-west-1.amazonaws.com/bucket/key")
        .body(())?
        .into_parts();
    let params = SigningParams {
        service: "s3",
        region: session.region(),
        time: now(),
    };
    let meta = session.signer().sign(&mut parts, Body::empty(), params).await?;

    assert!(meta.scope.ends_with("/eu-west-1/s3/aws4_request"));
    let auth = parts.headers["authorization"].to_str()?;
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=default_access_key_id/"));
    Ok(())
}
