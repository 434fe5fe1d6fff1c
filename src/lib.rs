//! svgdupe - SVG Near-Duplicate Finder
//!
//! A Rust CLI that discovers exact and near-duplicate SVG files in a
//! directory tree. Canonicalized content is fingerprinted with BLAKE3 to
//! collapse exact duplicates; the survivors are compared pairwise for
//! textual similarity across a bounded worker pool, and accepted matches
//! are clustered into groups.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{ComparisonPool, ContentMap, PoolConfig};
use crate::error::ExitCode;
use crate::output::Report;
use crate::progress::{NullSink, Phase, ProgressSink, TermProgress, Tracker};
use crate::scanner::{Canonicalizer, ProblemFile};

/// Tunables for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Override for the comparison worker count.
    /// `None` uses available parallelism minus one.
    pub worker_count: Option<usize>,
}

/// Run the full deduplication pipeline over a directory.
///
/// Phases: discover files, load and classify, index exact duplicates,
/// enumerate candidate pairs, run the comparison pool, cluster edges.
/// Recoverable per-file failures accumulate into the returned report;
/// only discovery errors are fatal.
///
/// # Arguments
///
/// * `dir` - Root directory to search for SVG files
/// * `options` - Run tunables
/// * `tracker` - Phase-weighted progress tracker
///
/// # Errors
///
/// Returns an error for an inaccessible input directory or a directory
/// with no SVG files.
pub fn run_pipeline(dir: &Path, options: &PipelineOptions, tracker: &Tracker) -> Result<Report> {
    // Phase 1: Find all SVG files. Failure here is fatal.
    tracker.phase(Phase::FindFiles, 0.0);
    let files = scanner::find_svg_files(dir)?;
    tracker.phase(Phase::FindFiles, 100.0);
    let total_files = files.len();
    log::info!("Found {} SVG files in {}", total_files, dir.display());

    // Phase 2: Load, validate, canonicalize and fingerprint.
    let canonicalizer = Canonicalizer::new()?;
    let (classified, mut problems) =
        scanner::load_files(&files, &canonicalizer, |pct| tracker.phase(Phase::LoadFiles, pct));

    // Phase 3: Collapse exact duplicates by fingerprint.
    let (exact_groups, remaining, _stats) = duplicates::index_by_fingerprint(classified, |pct| {
        tracker.phase(Phase::FindDuplicates, pct)
    });

    // Phase 4: Enumerate candidate pairs over the remaining files.
    let remaining_paths: Vec<PathBuf> = remaining.iter().map(|f| f.path.clone()).collect();
    let pairs =
        duplicates::enumerate_pairs(&remaining_paths, |pct| tracker.phase(Phase::CreatePairs, pct));
    let contents: ContentMap = remaining.into_iter().map(|f| (f.path, f.content)).collect();

    // Phase 5: Score pairs across the worker pool.
    let mut config = PoolConfig::default();
    if let Some(threads) = options.worker_count {
        config = config.with_worker_count(threads);
    }
    let pool_tracker = tracker.clone();
    let config = config.with_progress(Arc::new(move |done, total| {
        if total == 0 {
            pool_tracker.phase(Phase::ProcessBatches, 100.0);
        } else {
            pool_tracker.phase_with_label(
                Phase::ProcessBatches,
                done as f64 / total as f64 * 100.0,
                &format!("Processing comparisons ({done}/{total})"),
            );
        }
    }));
    let outcome = ComparisonPool::new(config).run(pairs, Arc::new(contents));

    for failure in outcome.failures {
        let reason = format!("Error in comparison: {}", failure.reason);
        let [left, right] = failure.files;
        problems.push(ProblemFile::new(left, reason.clone()));
        problems.push(ProblemFile::new(right, reason));
    }

    // Phase 6: Cluster accepted edges into groups.
    let similar =
        duplicates::group_similar(outcome.edges, |pct| tracker.phase(Phase::CreateGroups, pct));

    tracker.finish();

    Ok(Report::build(total_files, exact_groups, similar, problems))
}

/// Run the application for the parsed CLI arguments.
///
/// Wraps [`run_pipeline`] with logging setup, progress rendering, report
/// output and exit-code selection.
///
/// # Errors
///
/// Propagates pipeline errors and output-rendering failures.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let sink: Arc<dyn ProgressSink> = if cli.quiet || cli.output == OutputFormat::Json {
        Arc::new(NullSink)
    } else {
        Arc::new(TermProgress::new())
    };
    let tracker = Tracker::new(sink);

    let options = PipelineOptions {
        worker_count: cli.threads,
    };

    let started = Instant::now();
    let report = run_pipeline(&cli.directory, &options, &tracker)?;

    match cli.output {
        OutputFormat::Text => {
            let stdout = std::io::stdout();
            output::text::render(&report, &mut stdout.lock())?;
        }
        OutputFormat::Json => println!("{}", output::json::to_json(&report)?),
    }

    log::info!("Total processing time: {:.2?}", started.elapsed());

    Ok(if report.problem_files.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::PartialSuccess
    })
}
