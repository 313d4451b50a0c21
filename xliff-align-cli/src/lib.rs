//! Command line front end for xliff-align
//!
//! ```text
//! xliff-align <SOURCE> <TRANSLATION_DIR> <TARGET_LANG> <OUTPUT_DIR>
//! ```
//!
//! SOURCE is either one document or a directory of documents. Each source
//! document is paired with the file at the same relative path under
//! TRANSLATION_DIR, and its XLIFF is written to `<relative path>.xlf` under
//! OUTPUT_DIR.

use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use tracing::info;
use tracing::level_filters::LevelFilter;
use xliff_align::{
    AlignConfig, AlignError, AlignResult, BatchReport, Node, NodeKind, PairJob, TreeNode,
    VerbosityLevel, load_config, read_document, run_batch, scan_documents, walk,
};

pub fn build_command() -> Command {
    Command::new("xliff-align")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Align original and translated XML/HTML documents into XLIFF 2.0")
        .arg(
            Arg::new("source")
                .help("Source document, or a directory of source documents")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("translation-dir")
                .help("Directory holding the translated documents")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(2),
        )
        .arg(
            Arg::new("target-lang")
                .help("Target language code (e.g., fr-FR, de, zh-Hans)")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::new("output-dir")
                .help("Directory the XLIFF files are written to")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(4),
        )
        .arg(
            Arg::new("source-lang")
                .long("source-lang")
                .short('s')
                .help("Source language code (default: en-US, or the config file value)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("JSON configuration file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .help("Align document pairs on all CPU cores")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .short('r')
                .help("Write a JSON report of every pair and its diagnostics")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dump-paths")
                .long("dump-paths")
                .help("Print the structural path of every source text and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log traversal detail")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Log errors only")
                .action(ArgAction::SetTrue),
        )
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub source: PathBuf,
    pub translation_dir: PathBuf,
    pub target_language: String,
    pub output_dir: PathBuf,
    pub source_language: Option<String>,
    pub config: Option<PathBuf>,
    pub parallel: bool,
    pub report: Option<PathBuf>,
    pub dump_paths: bool,
    /// Set by `--verbose`/`--quiet`; otherwise the config file decides
    pub verbosity: Option<VerbosityLevel>,
}

impl CliOptions {
    pub fn from_matches(matches: &ArgMatches) -> AlignResult<Self> {
        let path = |id: &str| {
            matches
                .get_one::<PathBuf>(id)
                .cloned()
                .ok_or_else(|| AlignError::ConfigError(format!("Missing argument <{}>", id)))
        };

        let verbosity = if matches.get_flag("verbose") {
            Some(VerbosityLevel::Verbose)
        } else if matches.get_flag("quiet") {
            Some(VerbosityLevel::Silent)
        } else {
            None
        };

        Ok(Self {
            source: path("source")?,
            translation_dir: path("translation-dir")?,
            target_language: matches
                .get_one::<String>("target-lang")
                .cloned()
                .ok_or_else(|| AlignError::ConfigError("Missing argument <target-lang>".into()))?,
            output_dir: path("output-dir")?,
            source_language: matches.get_one::<String>("source-lang").cloned(),
            config: matches.get_one::<PathBuf>("config").cloned(),
            parallel: matches.get_flag("parallel"),
            report: matches.get_one::<PathBuf>("report").cloned(),
            dump_paths: matches.get_flag("dump-paths"),
            verbosity,
        })
    }

    /// Check that the input and output locations exist
    pub fn check_paths(&self) -> AlignResult<()> {
        if !self.source.exists() {
            return Err(AlignError::ConfigError(format!(
                "Source not found: {}",
                self.source.display()
            )));
        }
        if !self.translation_dir.is_dir() {
            return Err(AlignError::ConfigError(format!(
                "Translation directory not found: {}",
                self.translation_dir.display()
            )));
        }
        if !self.output_dir.is_dir() {
            return Err(AlignError::ConfigError(format!(
                "Output directory not found: {}",
                self.output_dir.display()
            )));
        }
        Ok(())
    }

    /// Build the effective configuration: config file first, then the
    /// command line on top
    pub fn resolve_config(&self) -> AlignResult<AlignConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => AlignConfig::new(),
        };

        config.with_target_language(&self.target_language);
        if let Some(language) = &self.source_language {
            config.with_source_language(language);
        }
        if let Some(verbosity) = self.verbosity {
            config.with_verbosity(verbosity);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Turn the command line into one job per source document
pub fn plan_jobs(options: &CliOptions, config: &AlignConfig) -> AlignResult<Vec<PairJob>> {
    if options.source.is_dir() {
        let documents = scan_documents(&options.source, &config.extensions)?;
        return Ok(documents
            .iter()
            .map(|relative| job_for(relative, &options.source, options))
            .collect());
    }

    let file_name = options.source.file_name().ok_or_else(|| {
        AlignError::ConfigError(format!("Not a file: {}", options.source.display()))
    })?;
    let source_dir = options.source.parent().unwrap_or_else(|| Path::new(""));
    Ok(vec![job_for(Path::new(file_name), source_dir, options)])
}

fn job_for(relative: &Path, source_dir: &Path, options: &CliOptions) -> PairJob {
    let mut output = options.output_dir.join(relative).into_os_string();
    output.push(".xlf");
    PairJob::new(
        &relative.to_string_lossy(),
        source_dir.join(relative),
        options.translation_dir.join(relative),
        PathBuf::from(output),
    )
}

/// Install the global tracing subscriber
///
/// The default level follows `verbosity`; `RUST_LOG` directives still apply
/// on top of it.
pub fn init_tracing(verbosity: VerbosityLevel) {
    let level: LevelFilter = verbosity
        .filter_directive()
        .parse()
        .unwrap_or(LevelFilter::INFO);
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `path<TAB>text` for every non-blank text node of a document
pub fn describe_paths(root: &Node) -> Vec<String> {
    let mut lines = Vec::new();
    walk(root, |node, path| {
        if node.kind() != NodeKind::Text || path.is_empty() {
            return;
        }
        if let Some(text) = node.text().filter(|t| !t.trim().is_empty()) {
            lines.push(format!("{}\t{}", path, text.trim()));
        }
    });
    lines
}

/// Print the structural paths of every planned source document
pub fn dump_paths(jobs: &[PairJob]) -> AlignResult<()> {
    for job in jobs {
        let tree = read_document(&job.source)?;
        println!("# {}", job.name);
        for line in describe_paths(&tree) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Align every planned job and write the optional JSON report
pub fn run(options: &CliOptions, config: &AlignConfig, jobs: &[PairJob]) -> AlignResult<BatchReport> {
    info!(
        jobs = jobs.len(),
        source_language = %config.source_language,
        target_language = %config.target_language,
        parallel = options.parallel,
        "aligning documents"
    );

    let report = run_batch(jobs, config, options.parallel);

    if let Some(path) = &options.report {
        report.write_json(path)?;
        info!(report = %path.display(), "wrote report");
    }

    Ok(report)
}
