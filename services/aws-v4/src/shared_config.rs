//! Access to the shared `~/.aws/config` and `~/.aws/credentials` files.

use crate::constants::{AWS_CONFIG_FILE, AWS_PROFILE, AWS_SHARED_CREDENTIALS_FILE};
use ini::{Ini, Properties};
use log::debug;
use signtrip_core::{Context, Error, Result};

/// Default locations of the shared files.
pub const DEFAULT_CONFIG_FILE: &str = "~/.aws/config";
pub const DEFAULT_CREDENTIALS_FILE: &str = "~/.aws/credentials";

/// Profile selected by `AWS_PROFILE`, falling back to `fallback`.
pub fn profile_name(ctx: &Context, fallback: &str) -> String {
    ctx.env_var(AWS_PROFILE)
        .unwrap_or_else(|| fallback.to_string())
}

/// Path of the config file: explicit override, `AWS_CONFIG_FILE`, then the default.
pub fn config_file(ctx: &Context, path: Option<&str>) -> String {
    path.map(|v| v.to_string())
        .or_else(|| ctx.env_var(AWS_CONFIG_FILE))
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string())
}

/// Path of the credentials file: explicit override, `AWS_SHARED_CREDENTIALS_FILE`, then the default.
pub fn credentials_file(ctx: &Context, path: Option<&str>) -> String {
    path.map(|v| v.to_string())
        .or_else(|| ctx.env_var(AWS_SHARED_CREDENTIALS_FILE))
        .unwrap_or_else(|| DEFAULT_CREDENTIALS_FILE.to_string())
}

/// Section name of `profile` in the config file.
///
/// The config file prefixes every profile but `default` with `profile `.
pub fn config_section(profile: &str) -> String {
    match profile {
        "default" => "default".to_string(),
        x => format!("profile {x}"),
    }
}

/// Load an ini file.
///
/// Missing or unreadable files yield `None`; only malformed content fails.
pub async fn load_ini(ctx: &Context, path: &str) -> Result<Option<Ini>> {
    let Some(expanded_path) = ctx.expand_home_dir(path) else {
        debug!("failed to expand homedir for path: {path}");
        return Ok(None);
    };

    let content = match ctx.file_read(&expanded_path).await {
        Ok(content) => content,
        Err(err) => {
            debug!("failed to read {expanded_path}: {err:?}");
            return Ok(None);
        }
    };

    Ini::load_from_str(&String::from_utf8_lossy(&content))
        .map(Some)
        .map_err(|e| {
            Error::config_invalid(format!("failed to parse {expanded_path}"))
                .with_source(anyhow::Error::new(e))
        })
}

/// Find `section` in a loaded ini file.
pub fn section<'a>(conf: &'a Ini, section: &str) -> Option<&'a Properties> {
    let props = conf.section(Some(section));
    if props.is_none() {
        debug!("section {section} not found");
    }
    props
}
