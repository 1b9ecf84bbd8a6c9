use std::io;
use std::path::Path;

use clap::Parser;

use ws_audit::audit::{ScanOrchestrator, ScanSettings};
use ws_audit::cli::Cli;
use ws_audit::config::{
    AuditConfig, ConfigLoader, FileConfigLoader, LoadResult, validate_config_semantics,
};
use ws_audit::evidence::EvidenceRecorder;
use ws_audit::logging::init_logger;
use ws_audit::prompt::{PromptAnswers, collect_answers};
use ws_audit::search::{ReqwestClient, SearchClient, SearchQuery};
use ws_audit::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

fn main() {
    let cli = Cli::parse();
    std::process::exit(run_audit(&cli));
}

fn run_audit(cli: &Cli) -> i32 {
    match run_audit_impl(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_audit_impl(cli: &Cli) -> ws_audit::Result<i32> {
    // 1. Load configuration and apply CLI overrides
    let loaded = load_config(cli.config.as_deref(), cli.no_config)?;
    let mut config = loaded.config;
    apply_cli_overrides(&mut config, cli);

    // 2. Interactive answers override everything else
    let mut query_input = cli.query.clone();
    let mut verbose = cli.verbose;
    if cli.interactive {
        let current = PromptAnswers {
            query: query_input,
            threshold: config.scan.threshold,
            max_repos: config.scan.max_repos,
            verbose: verbose > 0,
            narrow: config.scan.narrow,
        };
        let answers = collect_answers(&mut io::stdin().lock(), &mut io::stdout().lock(), current)?;
        verbose = if answers.verbose { verbose.max(1) } else { 0 };
        query_input = apply_answers(&mut config, answers);
    }
    validate_config_semantics(&config)?;

    // 3. Logging
    init_logger(verbose, cli.quiet);
    match &loaded.source {
        Some(source) => log::info!("Using configuration from {}", source.display()),
        None => log::debug!("No configuration file found, using defaults"),
    }

    // 4. Build the pipeline
    let query = build_query(&query_input, cli.raw_query);
    let settings = ScanSettings::new(
        config.scan.threshold,
        &config.scan.extensions,
        config.scan.narrow,
    )?;
    let search = SearchClient::new(ReqwestClient::new()?, config.search.to_settings());
    let recorder = EvidenceRecorder::new(&config.output.dir);
    let orchestrator = ScanOrchestrator::new(
        search,
        config.scan.backend.materializer(),
        recorder,
        settings,
    )
    .with_workers(config.scan.workers)
    .with_progress(show_progress(verbose, cli.quiet));

    // 5. Run
    let summary = orchestrator.run(&query, config.scan.max_repos)?;
    if !cli.quiet {
        println!("{summary}");
        if summary.records_written > 0 {
            println!(
                "Evidence written to {}",
                orchestrator.recorder().output_dir().display()
            );
        }
    }

    Ok(EXIT_SUCCESS)
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> ws_audit::Result<LoadResult> {
    if no_config {
        return Ok(LoadResult {
            config: AuditConfig::default(),
            source: None,
        });
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

fn apply_cli_overrides(config: &mut AuditConfig, cli: &Cli) {
    if let Some(threshold) = cli.threshold {
        config.scan.threshold = threshold;
    }
    if let Some(max_repos) = cli.max_repos {
        config.scan.max_repos = max_repos;
    }
    if let Some(ext) = &cli.ext {
        config.scan.extensions.clone_from(ext);
    }
    if cli.narrow {
        config.scan.narrow = true;
    }
    if let Some(backend) = cli.backend {
        config.scan.backend = backend;
    }
    if let Some(workers) = cli.workers {
        config.scan.workers = workers;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.dir.clone_from(dir);
    }
    if let Some(token) = &cli.token {
        config.search.token = Some(token.clone());
    }
    if let Some(endpoint) = &cli.endpoint {
        config.search.endpoint.clone_from(endpoint);
    }
}

/// Copy prompt answers into the config and return the query input.
fn apply_answers(config: &mut AuditConfig, answers: PromptAnswers) -> String {
    config.scan.threshold = answers.threshold;
    config.scan.max_repos = answers.max_repos;
    config.scan.narrow = answers.narrow;
    answers.query
}

fn build_query(input: &str, raw: bool) -> SearchQuery {
    if raw {
        SearchQuery::raw(input)
    } else {
        SearchQuery::from_input(input)
    }
}

/// The progress bar would interleave with log lines, so it is only drawn in
/// the default verbosity.
const fn show_progress(verbose: u8, quiet: bool) -> bool {
    verbose == 0 && !quiet
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
