// 全ジョブ実行

use rayon::prelude::*;
use tracing::warn;

use crate::pipeline::job_runner::{JobConfig, JobResult, run_job};

/// Run multiple jobs, collecting results in input order.
/// One job failure does NOT prevent other jobs from running.
///
/// Jobs run on a rayon pool with `parallel_workers` threads; 0 uses the
/// global pool. Each job owns its encoder, so nothing mutable is shared.
pub fn run_all_jobs(
    jobs: &[JobConfig],
    parallel_workers: usize,
) -> Vec<crate::error::Result<JobResult>> {
    let run = || -> Vec<crate::error::Result<JobResult>> {
        jobs.par_iter().map(run_job).collect()
    };

    if parallel_workers == 0 {
        return run();
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(parallel_workers)
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(e) => {
            warn!("failed to build a {parallel_workers}-thread pool, using the global pool: {e}");
            run()
        }
    }
}
