//! Config command implementation
//!
//! Every action reports the file it touched; `show` adds the effective
//! settings and the `SYMNAV_*` variables that overrode them.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::app::App;
use crate::error::ConfigError;
use crate::models::config::NavConfig;
use crate::services::config::active_env_overrides;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,

    /// Use ~/.config/symnav instead of the project's .symnav directory
    #[arg(long, global = true)]
    pub global: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Write a config file holding the defaults
    Init {
        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective [provider], [announce], [fallback] and [document] settings
    Show,

    /// Print where the config file lives
    Path,

    /// Open the config file in $EDITOR
    Edit,
}

#[derive(Debug, Serialize)]
struct ConfigReport {
    action: &'static str,
    scope: &'static str,
    path: String,
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    settings: Option<NavConfig>,
    /// config key -> variable that set it
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    env_overrides: BTreeMap<&'static str, &'static str>,
}

pub async fn execute(args: ConfigArgs, app: &App) -> Result<()> {
    match report(&args, app, |key| std::env::var(key).ok()).await {
        Ok(report) => app.output.print_success_flat(report),
        Err(e) => app.output.print_error(&e.to_string()),
    }
    Ok(())
}

async fn report(
    args: &ConfigArgs,
    app: &App,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ConfigReport, ConfigError> {
    let service = &app.config_service;
    let global = args.global;

    let (action, path, settings) = match args.action {
        ConfigAction::Init { force } => ("created", service.init(global, force).await?, None),
        ConfigAction::Edit => ("opened", service.edit(global).await?, None),
        ConfigAction::Path => ("located", service.config_path(global), None),
        ConfigAction::Show => (
            "shown",
            service.config_path(global),
            Some(service.load(global).await?),
        ),
    };

    // Global-only views never apply environment overrides
    let env_overrides = if settings.is_some() && !global {
        active_env_overrides(env).into_iter().collect()
    } else {
        BTreeMap::new()
    };

    Ok(ConfigReport {
        action,
        scope: if global { "global" } else { "project" },
        path: app.output.relative_path(&path),
        exists: path.exists(),
        settings,
        env_overrides,
    })
}
