mod env;
mod profile;

use signtrip_core::{Context, OsEnv, StaticEnv};
use signtrip_file_read_tokio::TokioFileRead;
use std::collections::HashMap;

pub fn create_test_context() -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    Context::new().with_file_read(TokioFileRead).with_env(OsEnv)
}

pub fn create_test_context_with_env(envs: &[(&str, &str)]) -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    Context::new()
        .with_file_read(TokioFileRead)
        .with_env(StaticEnv {
            home_dir: None,
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
}
