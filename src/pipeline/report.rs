// JSON run report

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::output::write_output;
use crate::pipeline::job_runner::{JobConfig, JobResult};

#[derive(Debug, Serialize)]
pub struct FailedJob {
    pub input_path: PathBuf,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub succeeded: Vec<&'a JobResult>,
    pub failed: Vec<FailedJob>,
}

/// Pair each job with its result. `jobs` and `results` are index-aligned.
pub fn build_report<'a>(
    jobs: &[JobConfig],
    results: &'a [crate::error::Result<JobResult>],
) -> RunReport<'a> {
    let mut report = RunReport {
        succeeded: Vec::new(),
        failed: Vec::new(),
    };
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(r) => report.succeeded.push(r),
            Err(e) => report.failed.push(FailedJob {
                input_path: job.input_path.clone(),
                error: e.to_string(),
            }),
        }
    }
    report
}

pub fn write_report(path: &Path, report: &RunReport<'_>) -> crate::error::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    write_output(path, json.as_bytes())
}
