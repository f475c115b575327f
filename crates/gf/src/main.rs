use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

mod cli;
mod commands;
mod loader;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::classify::ClassifyOptions;
use commands::filter::FilterCommandOptions;
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Initializes `env_logger`; `RUST_LOG` overrides the flag-derived level.
fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(log_level(cli))
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn log_level(cli: &Cli) -> LevelFilter {
    if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        Commands::Filter {
            file,
            filters,
            strategy,
            columns,
            limit,
        } => {
            let opts = FilterCommandOptions {
                file: file.clone(),
                filters: filters.clone(),
                strategy: strategy.map(Into::into),
                columns: columns.clone(),
                limit: *limit,
            };
            commands::filter::execute(&ctx, &opts)
        }
        Commands::Classify { keyword, strategy } => {
            let opts = ClassifyOptions {
                keyword: keyword.clone(),
                strategy: strategy.map(Into::into),
            };
            commands::classify::execute(&ctx, &opts)
        }
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(&ctx),
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
            Some(ConfigCommands::Init { force }) => commands::config::execute_init(&ctx, *force),
        },
        Commands::Completions { shell } => {
            commands::completions::execute(shell).map_err(CommandError::Io)
        }
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::UnknownColumn { .. } => "UNKNOWN_COLUMN",
        CommandError::Input(_) => "INPUT_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
        CommandError::Csv(_) => "CSV_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}

fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Filter(_) | CommandError::UnknownColumn { .. } | CommandError::Json(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Input(_) | CommandError::Csv(_) => 4,
        CommandError::Config(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(log_level(&cli(&["gf", "config", "path"])), LevelFilter::Warn);
        assert_eq!(
            log_level(&cli(&["gf", "-v", "config", "path"])),
            LevelFilter::Debug
        );
        assert_eq!(
            log_level(&cli(&["gf", "config", "path", "--quiet"])),
            LevelFilter::Error
        );
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["gf", "-v", "-q", "config", "path"]).is_err());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            error_code(&CommandError::Config("x".to_string())),
            "CONFIG_ERROR"
        );
        assert_eq!(
            error_code(&CommandError::UnknownColumn {
                column: "x".to_string(),
                suggestion: None
            }),
            "UNKNOWN_COLUMN"
        );
        assert_eq!(
            error_code(&CommandError::Filter(
                grid_filter_rs::FilterError::capability("name", "bad template")
            )),
            "FILTER_ERROR"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_status(&CommandError::Config("x".to_string())), 5);
        assert_eq!(exit_status(&CommandError::Input("x".to_string())), 4);
        assert_eq!(exit_status(&CommandError::Io(std::io::Error::other("x"))), 3);
    }
}
