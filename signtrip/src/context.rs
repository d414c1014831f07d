use signtrip_core::{Context, OsEnv};
use signtrip_file_read_tokio::TokioFileRead;

/// Context backed by the real process environment and tokio file IO.
pub fn default_context() -> Context {
    Context::new().with_file_read(TokioFileRead).with_env(OsEnv)
}
