use std::process;

use xliff_align::PairOutcome;
use xliff_align_cli::{CliOptions, build_command, dump_paths, init_tracing, plan_jobs, run};

const EXIT_FAILED_PAIRS: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = build_command().get_matches();

    let options = CliOptions::from_matches(&matches)?;
    let config = match options.check_paths().and_then(|_| options.resolve_config()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!();
            eprintln!("{}", build_command().render_usage());
            process::exit(EXIT_USAGE);
        }
    };

    init_tracing(config.verbosity);

    let jobs = plan_jobs(&options, &config)?;

    if options.dump_paths {
        dump_paths(&jobs)?;
        return Ok(());
    }

    let report = run(&options, &config, &jobs)?;

    for outcome in &report.outcomes {
        if let PairOutcome::Failed { name, diagnostic } = outcome {
            eprintln!("{}: {}", name, diagnostic);
        }
    }
    eprintln!(
        "{} aligned, {} failed, {} pairs written",
        report.succeeded(),
        report.failed(),
        report.total_pairs()
    );

    if report.has_failures() {
        process::exit(EXIT_FAILED_PAIRS);
    }

    Ok(())
}
