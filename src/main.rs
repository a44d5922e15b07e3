use anyhow::Result;
use std::process::ExitCode;
use untangle_eval::cli::{init_logging, parse_args, Cli, Commands};
use untangle_eval::commands::{self, exit_code_for, BatchCommand};

fn main() -> ExitCode {
    let cli = parse_args();
    init_logging(cli.verbosity);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = commands::resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Mark {
            pdg,
            diff,
            language,
            output,
        } => commands::handle_mark(&pdg, &diff, language, output.as_deref(), &config),
        Commands::Flatten { pdg, output } => {
            commands::handle_flatten(&pdg, output.as_deref(), &config)
        }
        Commands::Score { csv, output, json } => {
            commands::handle_score(&csv, output.as_deref(), json)
        }
        Commands::Batch {
            root,
            scores,
            graph_name,
            jobs,
            no_parallel,
            no_progress,
        } => commands::handle_batch(
            BatchCommand {
                root,
                scores,
                graph_name,
                jobs,
                no_parallel,
                no_progress,
            },
            &config,
        ),
        Commands::Init { force } => commands::init_config(&std::env::current_dir()?, force),
    }
}
