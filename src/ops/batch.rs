//! Parallel evaluation of independent description files.
//!
//! Files never see each other's items, so each one is evaluated on its own
//! worker with a private registry. Only the immutable settings are shared.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::core::settings::Settings;
use crate::ops::evaluate::{evaluate_file, FileOutcome};

/// The result of evaluating one file of a batch.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Result<FileOutcome>,
}

/// Evaluate `paths` concurrently, returning reports in input order.
///
/// `jobs` caps the number of worker threads; `None` lets rayon decide.
pub fn evaluate_files(paths: &[PathBuf], settings: &Settings, jobs: Option<usize>) -> Result<Vec<FileReport>> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(j) = jobs {
        builder = builder.num_threads(j);
    }
    let pool = builder
        .build()
        .context("failed to start evaluation workers")?;

    tracing::info!("Evaluating {} file(s)", paths.len());

    let reports: Vec<FileReport> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| FileReport {
                path: path.clone(),
                outcome: evaluate_file(path, settings),
            })
            .collect()
    });
    Ok(reports)
}
