//! Effective settings: CLI flags over config file over built-in defaults.

use tfcheck_core::{CheckOptions, TruncationNotice};
use tfcheck_types::{DEFAULT_REPORT_SIZE_LIMIT, DEFAULT_TERRAFORM_BIN, Defaults};

/// Values given on the command line; `None`/empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub terraform_bin: Option<String>,
    pub plan_args: Vec<String>,
    pub strip_refresh: bool,
    pub size_limit: Option<usize>,
    pub run_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub terraform_bin: String,
    pub options: CheckOptions,
    pub size_limit: usize,
    pub notice: TruncationNotice,
}

impl Settings {
    /// Resolve settings once at startup. `env` is only consulted to derive a
    /// CI run link when none was configured.
    pub fn resolve<F>(cli: Overrides, config: &Defaults, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let terraform_bin = cli
            .terraform_bin
            .or_else(|| config.terraform_bin.clone())
            .unwrap_or_else(|| DEFAULT_TERRAFORM_BIN.to_string());

        let plan_args = if cli.plan_args.is_empty() {
            config.plan_args.clone()
        } else {
            cli.plan_args
        };

        let run_url = cli
            .run_url
            .or_else(|| config.run_url.clone())
            .filter(|u| !u.is_empty())
            .or_else(|| github_run_url(&env));

        Settings {
            terraform_bin,
            options: CheckOptions {
                plan_args,
                strip_refresh: cli.strip_refresh || config.strip_refresh.unwrap_or(false),
            },
            size_limit: cli
                .size_limit
                .or(config.report_size_limit)
                .unwrap_or(DEFAULT_REPORT_SIZE_LIMIT),
            notice: TruncationNotice::new(run_url),
        }
    }
}

/// Link to the current GitHub Actions run, if all identifiers are present.
pub fn github_run_url<F>(env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| env(name).filter(|v| !v.is_empty());
    let server = get("GITHUB_SERVER_URL")?;
    let repository = get("GITHUB_REPOSITORY")?;
    let run_id = get("GITHUB_RUN_ID")?;
    Some(format!(
        "{}/{repository}/actions/runs/{run_id}",
        server.trim_end_matches('/')
    ))
}
