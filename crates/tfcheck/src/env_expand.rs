//! Environment variable expansion for configuration files.
//!
//! Supports two reference forms inside the config text:
//!
//! - `${VAR}`: the value of VAR; an error if VAR is unset
//! - `${VAR:-default}`: the value of VAR, or "default" if VAR is unset or empty
//!
//! A `$` that is not followed by `{` is left alone.

use std::borrow::Cow;

use anyhow::{Result, bail};

/// Expand references against the process environment.
pub fn expand_env_vars(text: &str) -> Result<Cow<'_, str>> {
    expand_with(text, |name| std::env::var(name).ok())
}

/// Expand references using `lookup` to resolve variable names.
pub fn expand_with<F>(text: &str, lookup: F) -> Result<Cow<'_, str>>
where
    F: Fn(&str) -> Option<String>,
{
    if !text.contains("${") {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            let offset = text.len() - rest.len() + start;
            bail!("Unclosed environment variable reference at byte {offset}");
        };
        out.push_str(&resolve(&after[..end], &lookup)?);
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    Ok(Cow::Owned(out))
}

fn resolve<F>(reference: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let (name, default) = match reference.split_once(":-") {
        Some((name, default)) => (name, Some(default)),
        None => (reference, None),
    };
    validate_var_name(name)?;

    match (lookup(name), default) {
        (Some(value), None) => Ok(value),
        (Some(value), Some(_)) if !value.is_empty() => Ok(value),
        (_, Some(default)) => Ok(default.to_string()),
        (None, None) => bail!(
            "Environment variable '{name}' is not set. \
             Use ${{{name}:-default}} syntax to provide a default value."
        ),
    }
}

fn validate_var_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        bail!("Invalid environment variable name '{name}'");
    }
    Ok(())
}
