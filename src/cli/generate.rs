//! Generate command implementation

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::batch::progress::{ConsoleProgress, JsonProgress, NullProgress, ProgressReporter};
use crate::batch::{BatchDriver, Roster};
use crate::config::{merge_cli_overrides, CliOverrides};
use crate::palette::Team;

use super::{load_project_config, resolve_colors, revalidate, EXIT_ERROR, EXIT_SUCCESS};

/// Flags of `courtsprite generate`.
#[derive(Debug, Default)]
pub struct GenerateArgs {
    pub out: Option<PathBuf>,
    pub count: Option<u32>,
    pub teams: Vec<Team>,
    pub jobs: Option<usize>,
    pub metadata: bool,
    pub json: bool,
    pub quiet: bool,
}

/// Execute the generate command
pub fn run_generate(config_path: Option<&Path>, args: GenerateArgs) -> ExitCode {
    let mut config = match load_project_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let overrides = CliOverrides {
        out: args.out,
        count: args.count,
        teams: Some(args.teams),
        jobs: args.jobs,
        metadata: args.metadata.then_some(true),
    };
    merge_cli_overrides(&mut config, &overrides);
    let config = match revalidate(config) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let (palette, body) = match resolve_colors(&config) {
        Ok(colors) => colors,
        Err(code) => return code,
    };

    let reporter: Arc<dyn ProgressReporter> = if args.quiet {
        Arc::new(NullProgress)
    } else if args.json {
        Arc::new(JsonProgress::new())
    } else {
        Arc::new(ConsoleProgress::new().with_colors(std::io::stderr().is_terminal()))
    };

    let jobs = Roster::from_config(&config).jobs();
    let driver = BatchDriver::new(&palette, body, &config.output.dir)
        .with_jobs(config.batch.jobs)
        .with_metadata(config.output.metadata)
        .with_reporter(reporter);

    match driver.run(&jobs) {
        Ok(result) if result.is_success() => ExitCode::from(EXIT_SUCCESS),
        Ok(result) => {
            for failure in result.failures() {
                if let Some(ref e) = failure.error {
                    eprintln!("Error: {}: {}", failure.job.id(), e);
                }
            }
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
