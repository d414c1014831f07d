use super::create_test_context;
use signtrip_aws_v4::{EnvCredentialProvider, Session};
use signtrip_core::ProvideCredential;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime must build")
        .block_on(f)
}

#[test]
fn test_env_credential_provider_with_os_env() {
    temp_env::with_vars(
        vec![
            ("AWS_ACCESS_KEY_ID", Some("os_access_key_id")),
            ("AWS_SECRET_ACCESS_KEY", Some("os_secret_access_key")),
            ("AWS_SESSION_TOKEN", None),
        ],
        || {
            let cred = block_on(EnvCredentialProvider::new().provide_credential(&create_test_context()))
                .expect("EnvCredentialProvider should not fail")
                .expect("credential must be loaded from os env");

            assert_eq!(cred.access_key_id, "os_access_key_id");
            assert_eq!(cred.secret_access_key, "os_secret_access_key");
            assert!(cred.session_token.is_none());
        },
    );
}

#[test]
fn test_env_credential_provider_without_os_env() {
    temp_env::with_vars_unset(vec!["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY"], || {
        let cred = block_on(EnvCredentialProvider::new().provide_credential(&create_test_context()))
            .expect("EnvCredentialProvider should not fail");
        assert!(cred.is_none());
    });
}

#[test]
fn test_session_load_with_os_env() {
    temp_env::with_vars(
        vec![
            ("AWS_REGION", Some("eu-west-1")),
            ("AWS_DEFAULT_REGION", Some("us-east-1")),
        ],
        || {
            let session =
                block_on(Session::load(create_test_context())).expect("session must load");
            assert_eq!(session.region(), "eu-west-1");
        },
    );
}
