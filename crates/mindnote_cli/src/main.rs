//! MindNote configuration command-line tool.
//!
//! # Responsibility
//! - Load configuration the way the application does (file, env, overrides).
//! - Print, dump, initialize and normalize configuration documents.
//!
//! # Invariants
//! - Read-only commands never write to disk.
//! - Exit code is non-zero when a requested write fails.

use clap::{Parser, Subcommand};
use log::error;
use mindnote_core::config::settings::UiTheme;
use mindnote_core::{
    default_log_level, init_logging_with, render_configuration, render_repository_configuration,
    ConfigService, ConfigStore, Configuration, StartupOverrides,
};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

/// Inspect and maintain MindNote configuration documents
#[derive(Parser, Debug)]
#[command(name = "mindnote", version)]
struct Cli {
    /// Configuration file to use instead of `$HOME/.mindnote.md`
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Repository (or Markdown directory/file) to make active
    #[arg(long, global = true, value_name = "PATH")]
    repository: Option<String>,

    /// UI theme override for this run
    #[arg(long, global = true, value_parser = parse_theme)]
    theme: Option<UiTheme>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Print the effective configuration as a canonical document
    Show,
    /// Print the effective configuration as JSON
    Json,
    /// Print the factory configuration document
    Defaults {
        /// Print the repository (organizers) document instead
        #[arg(long)]
        repository_config: bool,
    },
    /// Write the factory document unless the configuration file exists
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Rewrite configuration documents in canonical form
    Normalize,
    /// List organizers of the active repository
    Organizers,
}

fn parse_theme(value: &str) -> Result<UiTheme, String> {
    UiTheme::parse(value).ok_or_else(|| {
        format!(
            "unknown theme `{value}`; expected one of {}",
            UiTheme::TOKENS.join("|")
        )
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_cli_logging(&cli);

    let service = ConfigService::from_env();
    let mut config = Configuration::new();
    let overrides = StartupOverrides {
        config_path: cli.config.clone(),
        location: cli.repository.clone(),
        theme: cli.theme,
    };

    match cli.command {
        Commands::Defaults { repository_config } => {
            if repository_config {
                print!("{}", render_repository_configuration(None));
            } else {
                print!("{}", render_configuration(None));
            }
            ExitCode::SUCCESS
        }
        Commands::Init { force } => {
            if let Some(path) = overrides.config_path.clone() {
                config.set_config_file_path(path);
            }
            let path = config.config_file_path().to_path_buf();
            if path.exists() && !force {
                eprintln!("{} already exists; use --force to overwrite", path.display());
                return ExitCode::FAILURE;
            }
            match service.store().save_configuration(&path, None) {
                Ok(()) => {
                    println!("wrote {}", path.display());
                    ExitCode::SUCCESS
                }
                Err(err) => fail(&err.to_string()),
            }
        }
        Commands::Show => {
            service.startup(&mut config, &overrides);
            print!("{}", render_configuration(Some(&config)));
            ExitCode::SUCCESS
        }
        Commands::Json => {
            service.startup(&mut config, &overrides);
            match serde_json::to_string_pretty(&snapshot(&config)) {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(err) => fail(&err.to_string()),
            }
        }
        Commands::Organizers => {
            service.startup(&mut config, &overrides);
            let Some(active) = config.active_location_key() else {
                eprintln!("no active repository");
                return ExitCode::FAILURE;
            };
            println!("{active}");
            for organizer in config.repository_configuration().organizers() {
                println!("  {} ({})", organizer.name, organizer.key);
            }
            ExitCode::SUCCESS
        }
        Commands::Normalize => {
            if !service.startup(&mut config, &overrides) {
                eprintln!(
                    "{} not found; run `mindnote init` first",
                    config.config_file_path().display()
                );
                return ExitCode::FAILURE;
            }
            if let Err(err) = service
                .store()
                .save_configuration(config.config_file_path(), Some(&config))
            {
                return fail(&err.to_string());
            }
            if let Some(path) = config.repository_config_file_path() {
                if let Err(err) = service
                    .store()
                    .save_repository_configuration(&path, Some(config.repository_configuration()))
                {
                    return fail(&err.to_string());
                }
            }
            println!("normalized {}", config.config_file_path().display());
            ExitCode::SUCCESS
        }
    }
}

fn init_cli_logging(cli: &Cli) {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("mindnote-logs"));
    let Some(log_dir) = log_dir.to_str() else {
        eprintln!("log directory is not valid UTF-8: {}", log_dir.display());
        return;
    };
    if let Err(err) = init_logging_with(level, log_dir, true) {
        eprintln!("logging disabled: {err}");
    }
}

fn fail(message: &str) -> ExitCode {
    error!("event=cli_command module=cli status=error error={}", message);
    eprintln!("error: {message}");
    ExitCode::FAILURE
}

fn snapshot(config: &Configuration) -> serde_json::Value {
    let mut app = config.app.clone();
    if !app.openai_api_key.is_empty() {
        app.openai_api_key = "<redacted>".to_string();
    }
    json!({
        "config_file": config.config_file_path(),
        "mind": config.mind,
        "app": app,
        "active_location": config.active_location_key(),
        "locations": config.locations(),
        "organizers": config.repository_configuration().organizers(),
    })
}

#[cfg(test)]
mod tests {
    use super::{snapshot, Cli, Commands};
    use clap::Parser;
    use mindnote_core::config::settings::UiTheme;
    use mindnote_core::Configuration;

    #[test]
    fn global_options_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "mindnote",
            "show",
            "--theme",
            "Light",
            "--config",
            "/tmp/c.md",
        ])
        .expect("global options after the subcommand should parse");
        assert_eq!(cli.command, Commands::Show);
        assert_eq!(cli.theme, Some(UiTheme::Light));
        assert_eq!(
            cli.config
                .expect("--config was given")
                .to_str(),
            Some("/tmp/c.md")
        );
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(Cli::try_parse_from(["mindnote", "show", "--theme", "neon"]).is_err());
    }

    #[test]
    fn defaults_accepts_repository_flag() {
        let cli = Cli::try_parse_from(["mindnote", "defaults", "--repository-config"])
            .expect("defaults should accept --repository-config");
        assert_eq!(
            cli.command,
            Commands::Defaults {
                repository_config: true
            }
        );
    }

    #[test]
    fn snapshot_redacts_api_key() {
        let mut config = Configuration::with_home(None);
        config.app.openai_api_key = "sk-secret".to_string();
        let value = snapshot(&config);
        assert_eq!(value["app"]["openai_api_key"], "<redacted>");
        assert!(value["active_location"].is_null());
    }
}
