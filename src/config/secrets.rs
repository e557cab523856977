//! File-backed secrets.
//!
//! Any secret-bearing flag may hold either the secret itself or the path of a
//! file containing it (for example a Docker secret mounted under `/run/secrets`).
//! Resolution replaces the path with the file contents in the flag store.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::error::ConfigError;
use super::flags::{FlagKind, FlagStore, FlagValue, flag};

/// Flags whose values may point at a file holding the real value.
pub const SECRET_FLAGS: &[&str] = &[
    flag::NOTIFICATION_EMAIL_SERVER_PASSWORD,
    flag::NOTIFICATION_SLACK_HOOK_URL,
    flag::NOTIFICATION_MSTEAMS_HOOK,
    flag::NOTIFICATION_GOTIFY_TOKEN,
    flag::NOTIFICATION_URL,
    flag::HTTP_API_TOKEN,
];

/// Matches a URL scheme of at least two characters, so `C:\` is still a path.
static URL_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]+:").expect("URL scheme pattern is valid")
});

/// Returns true if `value` names an existing regular file and does not look like a URL.
///
/// The scheme check runs before touching the filesystem, so a URL never
/// resolves to a same-named local file.
#[must_use]
pub fn is_file(value: &str) -> bool {
    if value.is_empty() || URL_SCHEME.is_match(value) {
        return false;
    }
    fs::metadata(value).is_ok_and(|meta| meta.is_file())
}

/// Resolves every flag in [`SECRET_FLAGS`].
///
/// # Errors
///
/// Returns the first error from [`resolve_secret`].
pub fn resolve_secrets(store: &mut FlagStore) -> Result<(), ConfigError> {
    for name in SECRET_FLAGS {
        resolve_secret(store, name)?;
    }
    Ok(())
}

/// Replaces a file path held by the named flag with the file's contents.
///
/// String flags take the whole file with trailing line breaks removed.
/// Array flags replace each path element, in place, with the non-empty
/// lines of that file; other elements keep their position.
///
/// # Errors
///
/// Returns an error if the flag is unknown, is neither a string nor a
/// string array, or names a file that cannot be read.
pub fn resolve_secret(store: &mut FlagStore, name: &'static str) -> Result<(), ConfigError> {
    let flag = store.get(name)?;
    let resolved = match flag.value() {
        FlagValue::String(value) => resolve_string(name, value)?,
        FlagValue::StringArray(values) => resolve_array(name, values)?,
        other => {
            return Err(ConfigError::FlagType {
                flag: name,
                expected: FlagKind::String,
                actual: other.kind(),
            });
        }
    };

    if let Some(value) = resolved {
        store.set(name, value)?;
    }
    Ok(())
}

fn resolve_string(name: &'static str, value: &str) -> Result<Option<FlagValue>, ConfigError> {
    if !is_file(value) {
        return Ok(None);
    }

    let content = read_secret(name, value)?;
    tracing::debug!("Read --{name} from file {value}");
    Ok(Some(FlagValue::String(
        content.trim_end_matches(['\r', '\n']).to_string(),
    )))
}

fn resolve_array(name: &'static str, values: &[String]) -> Result<Option<FlagValue>, ConfigError> {
    if !values.iter().any(|v| is_file(v)) {
        return Ok(None);
    }

    let mut resolved = Vec::with_capacity(values.len());
    for value in values {
        if is_file(value) {
            let content = read_secret(name, value)?;
            let before = resolved.len();
            resolved.extend(
                content
                    .lines()
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
            tracing::debug!(
                "Read {} entries for --{name} from file {value}",
                resolved.len() - before
            );
        } else {
            resolved.push(value.clone());
        }
    }

    Ok(Some(FlagValue::StringArray(resolved)))
}

fn read_secret(name: &'static str, path: &str) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::SecretRead {
        flag: name,
        path: Path::new(path).to_path_buf(),
        source,
    })
}
