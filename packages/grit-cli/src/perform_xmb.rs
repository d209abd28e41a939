//! Perform XMB
//!
//! Reads the input document once, then runs every export job over it.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use rayon::prelude::*;

use crate::config::{XmbConfig, XmbJob, STDOUT_OUTPUT};
use grit::grd::{self, FileGatherer, ResourceTree};
use grit::i18n::{ExportContext, LimitSource, XmbExporter};
use grit::logging::Logger;

/// Outcome of one export job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub output: String,
    pub bytes_written: usize,
}

impl JobReport {
    pub fn writes_to_stdout(&self) -> bool {
        self.output == STDOUT_OUTPUT
    }
}

/// Reads and (optionally) gathers the input document
pub fn load_tree(config: &XmbConfig, logger: &dyn Logger) -> anyhow::Result<ResourceTree> {
    let bytes = fs::read(&config.input)
        .with_context(|| format!("failed to read {}", config.input.display()))?;
    let url = config.input.display().to_string();
    let mut tree = grd::parse(&bytes, &url, &config.base_dir())?;
    logger.debug(&format!("Read {} entries from {}", tree.len(), url));

    if config.gather {
        tree.run_gatherers(&FileGatherer::new(), logger)?;
    }
    Ok(tree)
}

pub fn export_context(config: &XmbConfig) -> ExportContext {
    let mut context = ExportContext::default();
    if let Some(lang) = &config.lang {
        context = context.with_output_language(lang.as_str());
    }
    if let Some(handler) = &config.handler {
        context = context.with_handler(handler.as_str());
    }
    context
}

/// Runs all jobs in parallel over one tree. The first failure is returned
/// after every job has finished.
pub fn perform_xmb(config: &XmbConfig, logger: Arc<dyn Logger>) -> anyhow::Result<Vec<JobReport>> {
    let tree = load_tree(config, logger.as_ref())?;
    let context = export_context(config);
    let exporter = XmbExporter::new(logger.clone());

    let results: Vec<anyhow::Result<JobReport>> = config
        .jobs
        .par_iter()
        .map(|job| {
            run_job(&exporter, &tree, &context, job)
                .with_context(|| format!("export to {} failed", job.output))
        })
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut first_error = None;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                logger.error(&format!("{:#}", err));
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(reports),
    }
}

fn run_job(
    exporter: &XmbExporter,
    tree: &ResourceTree,
    context: &ExportContext,
    job: &XmbJob,
) -> anyhow::Result<JobReport> {
    let limit = match &job.limit {
        Some(path) => Some(
            LimitSource::from_path(path, job.limit_is_grd)
                .with_context(|| format!("failed to read limit file {}", path.display()))?,
        ),
        None => None,
    };

    // Output is opened only after the bundle is complete
    let bundle = exporter.bundle(tree, context, limit.as_ref())?;

    if job.writes_to_stdout() {
        let stdout = io::stdout();
        let mut sink = stdout.lock();
        sink.write_all(bundle.as_bytes())?;
        sink.flush()?;
    } else {
        let path = PathBuf::from(&job.output);
        fs::write(&path, bundle.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(JobReport {
        output: job.output.clone(),
        bytes_written: bundle.len(),
    })
}
