mod cli;

use base_image_inventory::adapters::outbound::console::{StderrProgressReporter, StdoutPresenter};
use base_image_inventory::adapters::outbound::network::GitHubClient;
use base_image_inventory::application::dto::{InventoryOutcome, InventoryReport, InventoryRequest};
use base_image_inventory::application::use_cases::RunInventoryUseCase;
use base_image_inventory::config::{discover_config, load_config_from_path};
use base_image_inventory::inventory::services::RepositoryFilter;
use base_image_inventory::shared::error::{ExitCode, InventoryError};
use base_image_inventory::shared::logging::init_logging;
use base_image_inventory::shared::Result;
use clap::Parser;
use cli::Args;
use std::process;
use tracing::info;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and version are requests, not usage errors
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_logging(args.log_level.as_deref());

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(exit_code_for(&e).as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let config = match args.config.as_deref() {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&std::env::current_dir()?)?.unwrap_or_default(),
    };
    let recursive = args.recursive();
    let start_index = args.start_index();
    let settings = config.resolve(args.token.clone(), args.exclude.clone());

    // Reject bad patterns before any request is made
    RepositoryFilter::new(settings.exclude_patterns.clone()).map_err(|e| {
        InventoryError::InvalidArgument {
            message: e.to_string(),
        }
    })?;

    let request = InventoryRequest::builder()
        .account(args.account)
        .branch_ref(args.branch_ref)
        .recursive(recursive)
        .start_index(start_index)
        .exclude_patterns(settings.exclude_patterns)
        .build()?;

    // Create adapters (Dependency Injection)
    let host = GitHubClient::new(settings.client)?;
    let presenter = StdoutPresenter::new();
    let progress_reporter = StderrProgressReporter::new();

    let use_case = RunInventoryUseCase::new(host, presenter, progress_reporter)
        .with_max_depth(settings.max_depth);

    let report = use_case.execute(request)?;
    log_report(&report);

    Ok(())
}

fn log_report(report: &InventoryReport) {
    match &report.outcome {
        InventoryOutcome::Completed => info!(
            total = report.repositories_total,
            scanned = report.repositories_scanned,
            dockerfiles = report.dockerfiles_read,
            "run finished"
        ),
        InventoryOutcome::RateLimited {
            repository,
            reset_at,
        } => info!(
            cursor = report.cursor.position(),
            repository = ?repository,
            %reset_at,
            "run stopped on rate limit"
        ),
    }
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<InventoryError>() {
        Some(InventoryError::InvalidArgument { .. }) | Some(InventoryError::Validation { .. }) => {
            ExitCode::InvalidArguments
        }
        _ => ExitCode::ApplicationError,
    }
}
