//! Batch generation of player sheets.
//!
//! A roster expands into one [`SheetJob`] per team and jersey number. Jobs
//! share nothing but the read-only palette and body colors, so they run in
//! parallel on a rayon pool. Each sheet is composed fully in memory before
//! anything is written; a sheet that fails at any step leaves no file behind.
//!
//! # Example
//!
//! ```no_run
//! use courtsprite::batch::{roster_jobs, BatchDriver};
//! use courtsprite::palette::{Appearance, BodyColors, PaletteRegistry, Team};
//! use std::path::Path;
//!
//! let palette = PaletteRegistry::builtin();
//! let body = BodyColors::resolve(&palette, &Appearance::default()).unwrap();
//! let jobs = roster_jobs(&Team::ALL, 1..11);
//!
//! let result = BatchDriver::new(&palette, body, Path::new("sprites"))
//!     .with_jobs(4)
//!     .run(&jobs)
//!     .unwrap();
//! println!("wrote {} sheets", result.success_count());
//! ```

pub mod progress;

use crate::config::SpriteConfig;
use crate::error::SpriteError;
use crate::output::{player_stem, save_metadata, save_png, sheet_paths, OutputError};
use crate::palette::{BodyColors, PaletteRegistry, Team};
use crate::spritesheet::compose;
use progress::{NullProgress, ProgressEvent, ProgressReporter};
use rayon::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Batch-level failure (individual sheet failures are reported per job).
#[derive(Debug, Error)]
pub enum BatchError {
    /// Output directory could not be created
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Worker pool could not be started
    #[error("cannot start worker pool: {0}")]
    ThreadPool(String),
}

/// Why a single sheet failed.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error(transparent)]
    Sprite(#[from] SpriteError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// One sheet to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetJob {
    pub team: Team,
    pub number: u32,
}

impl SheetJob {
    pub fn new(team: Team, number: u32) -> Self {
        Self { team, number }
    }

    /// Identifier used in progress output and file names.
    pub fn id(&self) -> String {
        player_stem(self.team, self.number)
    }
}

/// Teams and jersey numbers to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub teams: Vec<Team>,
    pub numbers: Range<u32>,
}

impl Roster {
    pub fn from_config(config: &SpriteConfig) -> Self {
        Self { teams: config.roster.teams.clone(), numbers: config.numbers() }
    }

    pub fn jobs(&self) -> Vec<SheetJob> {
        roster_jobs(&self.teams, self.numbers.clone())
    }
}

/// Expand teams x numbers, team-major.
pub fn roster_jobs(teams: &[Team], numbers: Range<u32>) -> Vec<SheetJob> {
    teams
        .iter()
        .flat_map(|&team| numbers.clone().map(move |number| SheetJob::new(team, number)))
        .collect()
}

/// Outcome of one job.
#[derive(Debug)]
pub struct SheetOutcome {
    pub job: SheetJob,
    /// Files written for this sheet (PNG first)
    pub files: Vec<PathBuf>,
    pub error: Option<SheetError>,
    pub duration: Duration,
}

impl SheetOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a batch run, outcomes in job order.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub outcomes: Vec<SheetOutcome>,
    pub total_duration: Duration,
}

impl BatchResult {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(SheetOutcome::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SheetOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Composes and writes sheets for a list of jobs.
pub struct BatchDriver<'a> {
    palette: &'a PaletteRegistry,
    body: BodyColors,
    out_dir: PathBuf,
    jobs: usize,
    metadata: bool,
    reporter: Arc<dyn ProgressReporter>,
}

impl std::fmt::Debug for BatchDriver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchDriver")
            .field("out_dir", &self.out_dir)
            .field("jobs", &self.jobs)
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl<'a> BatchDriver<'a> {
    pub fn new(palette: &'a PaletteRegistry, body: BodyColors, out_dir: &Path) -> Self {
        Self {
            palette,
            body,
            out_dir: out_dir.to_path_buf(),
            jobs: 0,
            metadata: false,
            reporter: Arc::new(NullProgress),
        }
    }

    /// Number of worker threads; 0 uses the available parallelism.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Also write a JSON sidecar for every sheet.
    pub fn with_metadata(mut self, metadata: bool) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Generate every job.
    ///
    /// # Errors
    ///
    /// Returns `BatchError` only for failures that stop the whole batch.
    /// Per-sheet failures are recorded in the returned [`BatchResult`].
    pub fn run(&self, jobs: &[SheetJob]) -> Result<BatchResult, BatchError> {
        let start = Instant::now();

        std::fs::create_dir_all(&self.out_dir)
            .map_err(|source| BatchError::OutputDir { path: self.out_dir.clone(), source })?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| BatchError::ThreadPool(e.to_string()))?;

        log::info!(
            "generating {} sheets into {} ({} workers)",
            jobs.len(),
            self.out_dir.display(),
            pool.current_num_threads()
        );
        self.reporter.report(ProgressEvent::BatchStarted { total_sheets: jobs.len() });

        let outcomes: Vec<SheetOutcome> =
            pool.install(|| jobs.par_iter().map(|job| self.run_job(*job)).collect());

        let result = BatchResult { outcomes, total_duration: start.elapsed() };
        self.reporter.report(ProgressEvent::BatchCompleted {
            succeeded: result.success_count(),
            failed: result.failure_count(),
            duration_ms: result.total_duration.as_millis() as u64,
        });
        log::info!(
            "batch finished: {} written, {} failed",
            result.success_count(),
            result.failure_count()
        );
        Ok(result)
    }

    fn run_job(&self, job: SheetJob) -> SheetOutcome {
        let start = Instant::now();
        let mut files = Vec::new();
        let error = self.write_sheet(job, &mut files).err();
        if error.is_some() {
            for path in files.drain(..) {
                if path.is_file() {
                    let _ = std::fs::remove_file(path);
                }
            }
        }
        let duration = start.elapsed();

        if let Some(ref e) = error {
            log::warn!("{} failed: {}", job.id(), e);
        } else {
            log::debug!("{} written in {:?}", job.id(), duration);
        }
        self.reporter.report(ProgressEvent::SheetCompleted {
            sheet_id: job.id(),
            error: error.as_ref().map(ToString::to_string),
            duration_ms: duration.as_millis() as u64,
        });

        SheetOutcome { job, files, error, duration }
    }

    fn write_sheet(&self, job: SheetJob, files: &mut Vec<PathBuf>) -> Result<(), SheetError> {
        let jersey = self.palette.jersey(job.team)?;
        let sheet = compose(&jersey, &self.body)?;

        // Paths are tracked before each write so a failed write is cleaned up too
        let (png_path, json_path) = sheet_paths(&self.out_dir, job.team, job.number);
        files.push(png_path.clone());
        save_png(sheet.image(), &png_path)?;

        if self.metadata {
            let image_name = png_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("{}.png", job.id()));
            files.push(json_path.clone());
            save_metadata(&sheet.metadata(&image_name), &json_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Appearance;
    use tempfile::tempdir;

    fn body(palette: &PaletteRegistry) -> BodyColors {
        BodyColors::resolve(palette, &Appearance::default()).unwrap()
    }

    #[test]
    fn test_roster_jobs_team_major() {
        let jobs = roster_jobs(&Team::ALL, 1..3);
        let ids: Vec<String> = jobs.iter().map(SheetJob::id).collect();
        assert_eq!(
            ids,
            vec!["player_orange_1", "player_orange_2", "player_blue_1", "player_blue_2"]
        );
        assert!(roster_jobs(&Team::ALL, 5..5).is_empty());
    }

    #[test]
    fn test_roster_from_config() {
        let mut config = SpriteConfig::default();
        config.roster.teams = vec![Team::Blue];
        config.roster.first_number = 20;
        config.roster.count = 3;

        let roster = Roster::from_config(&config);
        assert_eq!(roster.numbers, 20..23);
        let jobs = roster.jobs();
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0], SheetJob::new(Team::Blue, 20));
        assert_eq!(jobs[2].id(), "player_blue_22");

        assert_eq!(Roster::from_config(&SpriteConfig::default()).jobs().len(), 20);
    }

    #[test]
    fn test_run_writes_sheets() {
        let palette = PaletteRegistry::builtin();
        let dir = tempdir().unwrap();
        let out = dir.path().join("sprites");

        let jobs = roster_jobs(&Team::ALL, 1..3);
        let result = BatchDriver::new(&palette, body(&palette), &out)
            .with_jobs(2)
            .with_metadata(true)
            .run(&jobs)
            .unwrap();

        assert!(result.is_success());
        assert_eq!(result.success_count(), 4);
        for job in &jobs {
            let png = out.join(format!("{}.png", job.id()));
            let json = out.join(format!("{}.json", job.id()));
            assert!(png.exists(), "missing {}", png.display());
            assert!(json.exists(), "missing {}", json.display());
            let image = image::open(&png).unwrap().to_rgba8();
            assert_eq!(image.dimensions(), (48, 64));
        }
        assert_eq!(result.outcomes[0].files.len(), 2);
    }

    #[test]
    fn test_failed_sheet_writes_nothing() {
        // A registry whose blue jersey is incomplete
        let palette = PaletteRegistry::builtin();
        let broken = palette.without("blue_shadow");

        let dir = tempdir().unwrap();
        let jobs = vec![SheetJob::new(Team::Orange, 1), SheetJob::new(Team::Blue, 1)];
        let result = BatchDriver::new(&broken, body(&palette), dir.path()).run(&jobs).unwrap();

        assert_eq!(result.success_count(), 1);
        assert_eq!(result.failure_count(), 1);
        let failed = result.failures().next().unwrap();
        assert_eq!(failed.job, SheetJob::new(Team::Blue, 1));
        assert!(failed.files.is_empty());
        assert!(matches!(
            failed.error,
            Some(SheetError::Sprite(SpriteError::UnknownColor(ref name))) if name == "blue_shadow"
        ));
        assert!(!dir.path().join("player_blue_1.png").exists());
        assert!(dir.path().join("player_orange_1.png").exists());
    }

    #[test]
    fn test_failed_sidecar_removes_png() {
        let palette = PaletteRegistry::builtin();
        let dir = tempdir().unwrap();
        // A directory where the sidecar should go makes the JSON write fail
        std::fs::create_dir(dir.path().join("player_orange_1.json")).unwrap();

        let jobs = vec![SheetJob::new(Team::Orange, 1), SheetJob::new(Team::Orange, 2)];
        let result = BatchDriver::new(&palette, body(&palette), dir.path())
            .with_metadata(true)
            .run(&jobs)
            .unwrap();

        assert_eq!(result.failure_count(), 1);
        let failed = result.failures().next().unwrap();
        assert_eq!(failed.job, SheetJob::new(Team::Orange, 1));
        assert!(matches!(failed.error, Some(SheetError::Output(_))));
        assert!(failed.files.is_empty());
        assert!(!dir.path().join("player_orange_1.png").exists());
        assert!(dir.path().join("player_orange_1.json").is_dir());
        assert!(dir.path().join("player_orange_2.png").exists());
        assert!(dir.path().join("player_orange_2.json").exists());
    }

    #[test]
    fn test_failed_png_leaves_no_files() {
        let palette = PaletteRegistry::builtin();
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("player_blue_3.png")).unwrap();

        let jobs = vec![SheetJob::new(Team::Blue, 3)];
        let result = BatchDriver::new(&palette, body(&palette), dir.path())
            .with_metadata(true)
            .run(&jobs)
            .unwrap();

        assert!(!result.is_success());
        assert!(dir.path().join("player_blue_3.png").is_dir());
        assert!(!dir.path().join("player_blue_3.json").exists());
    }

    #[test]
    fn test_sheets_are_identical_across_runs() {
        let palette = PaletteRegistry::builtin();
        let jobs = vec![SheetJob::new(Team::Blue, 7)];
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();

        for dir in [&first, &second] {
            BatchDriver::new(&palette, body(&palette), dir.path())
                .with_jobs(1)
                .run(&jobs)
                .unwrap();
        }

        let a = std::fs::read(first.path().join("player_blue_7.png")).unwrap();
        let b = std::fs::read(second.path().join("player_blue_7.png")).unwrap();
        assert_eq!(a, b);
    }
}
