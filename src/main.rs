use std::path::Path;
use std::process::ExitCode;

use toolpresso_image::config::job::JobFile;
use toolpresso_image::config::merged::MergedConfig;
use toolpresso_image::config::{self};
use toolpresso_image::encode::readable_size;
use toolpresso_image::pipeline::job_runner::{JobConfig, resolve_path};
use toolpresso_image::pipeline::orchestrator::run_all_jobs;
use toolpresso_image::pipeline::report::{build_report, write_report};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: toolpresso_image <jobs.yaml>...");
        eprintln!("  Compress, resize, or fit images to a target size per job specifications.");
        eprintln!("  Set RUST_LOG=debug to trace each encode.");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("toolpresso_image {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let mut has_error = false;

    for job_file_arg in &args {
        if !run_job_file(Path::new(job_file_arg)) {
            has_error = true;
        }
    }

    if has_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load, run, and report one job file. Returns false if anything failed.
fn run_job_file(job_file_path: &Path) -> bool {
    let display = job_file_path.display();

    // Load settings from the same directory as the job file.
    let settings = match config::load_settings_for_job(job_file_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: Failed to load settings for {display}: {e}");
            return false;
        }
    };

    let yaml_content = match std::fs::read_to_string(job_file_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: Failed to read job file {display}: {e}");
            return false;
        }
    };

    let job_file: JobFile = match serde_yml::from_str(&yaml_content) {
        Ok(jf) => jf,
        Err(e) => {
            eprintln!("ERROR: Failed to parse job file {display}: {e}");
            return false;
        }
    };

    // Resolve job file directory for relative paths.
    let job_dir = job_file_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let mut job_configs: Vec<JobConfig> = Vec::new();
    for job in &job_file.jobs {
        let merged = MergedConfig::new(&settings, job);
        match JobConfig::from_job(&job_dir, job, &merged) {
            Ok(jc) => job_configs.push(jc),
            Err(e) => {
                eprintln!("ERROR: {display}: {e}");
                return false;
            }
        }
    }

    let results = run_all_jobs(&job_configs, settings.parallel_workers);

    let mut ok = true;
    for (job, result) in job_configs.iter().zip(&results) {
        match result {
            Ok(r) => {
                let quality = if r.format.is_lossy() {
                    format!("{} quality", r.quality)
                } else {
                    "lossless".to_string()
                };
                eprintln!(
                    "OK: {} -> {} ({} -> {}, {quality})",
                    r.input_path.display(),
                    r.output_path.display(),
                    readable_size(r.original_size),
                    readable_size(r.output_size),
                );
                if let Some(message) = &r.message {
                    eprintln!("WARN: {}: {message}", r.input_path.display());
                }
            }
            Err(e) => {
                eprintln!("ERROR: {}: {e}", job.input_path.display());
                ok = false;
            }
        }
    }

    if let Some(report_path) = &settings.report_path {
        let report_path = resolve_path(&job_dir, report_path);
        let report = build_report(&job_configs, &results);
        if let Err(e) = write_report(&report_path, &report) {
            eprintln!(
                "ERROR: Failed to write report {}: {e}",
                report_path.display()
            );
            ok = false;
        }
    }

    ok
}
