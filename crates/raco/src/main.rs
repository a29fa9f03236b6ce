use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::{events, CommandContext, CommandError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{}", serde_json::to_string_pretty(&error_json).unwrap());
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        Some(Commands::Events {
            area,
            from,
            to,
            filter,
            genre,
            event_type,
            sort,
            limit,
            all,
        }) => {
            let opts = events::EventsOptions {
                area: *area,
                from: from.clone(),
                to: to.clone(),
                filter: filter.clone(),
                genre: genre.clone(),
                event_type: event_type.clone(),
                sort: *sort,
                limit: *limit,
                all: *all,
            };
            events::execute(&ctx, &opts).await
        }
        Some(Commands::Search {
            query,
            filter,
            limit,
        }) => {
            let opts = commands::search::SearchOptions {
                query: query.clone(),
                filter: filter.clone(),
                limit: *limit,
            };
            commands::search::execute(&ctx, &opts).await
        }
        Some(Commands::Plan { expression }) => commands::plan::execute(&ctx, expression),
        Some(Commands::Config) => commands::config::execute(&ctx),
        Some(Commands::Completions { shell }) => {
            commands::completions::execute(shell).map_err(CommandError::Io)
        }
        None => {
            if !ctx.quiet {
                println!("raco - Resident Advisor CLI");
                println!("Use --help for usage information");
            }
            Ok(())
        }
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Api(_) => "API_ERROR",
        CommandError::Input(_) => "INPUT_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Input(_) => ExitCode::from(1),
        CommandError::Api(api) => ExitCode::from(api.exit_code()),
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let input = CommandError::Input("bad date".to_string());
        let config = CommandError::Config("no dir".to_string());
        assert_eq!(error_code(&input), "INPUT_ERROR");
        assert_eq!(error_code(&config), "CONFIG_ERROR");
    }

    #[test]
    fn test_input_errors_exit_one() {
        let e = CommandError::Input("bad date".to_string());
        let code = error_exit_code(&e);
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::from(1)));
    }
}
