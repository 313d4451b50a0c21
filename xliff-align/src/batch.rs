//! Aligning many document pairs
//!
//! Every job owns its own alignment table, so jobs share no mutable state and
//! can run on the rayon pool. A job that fails is reported as
//! [`PairOutcome::Failed`]; the remaining jobs still run.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, info_span};

use crate::config::AlignConfig;
use crate::diagnostics::Diagnostic;
use crate::engine::{Aligner, Alignment};
use crate::error::{AlignError, AlignResult};
use crate::xliff::{XliffDocument, XliffWriter};

/// One document pair and where its XLIFF goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairJob {
    /// Label used in logs and reports, usually the relative source path
    pub name: String,
    pub source: PathBuf,
    pub translation: PathBuf,
    pub output: PathBuf,
}

impl PairJob {
    pub fn new(name: &str, source: PathBuf, translation: PathBuf, output: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            source,
            translation,
            output,
        }
    }

    /// Value for the XLIFF `<file id>`: the source file name
    fn file_id(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairOutcome {
    Aligned {
        name: String,
        output: PathBuf,
        pairs: usize,
        diagnostics: Vec<Diagnostic>,
    },
    Failed {
        name: String,
        diagnostic: Diagnostic,
    },
}

impl PairOutcome {
    pub fn name(&self) -> &str {
        match self {
            PairOutcome::Aligned { name, .. } | PairOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PairOutcome::Failed { .. })
    }
}

/// Outcomes of a batch, in job order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<PairOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_failed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(PairOutcome::is_failed)
    }

    /// Total number of aligned pairs written across all jobs
    pub fn total_pairs(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                PairOutcome::Aligned { pairs, .. } => *pairs,
                PairOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn to_json(&self) -> AlignResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AlignError::SerializeError(e.to_string()))
    }

    pub fn write_json(&self, path: &Path) -> AlignResult<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| {
            AlignError::IoError(format!("Failed to write '{}': {}", path.display(), e))
        })
    }
}

/// Align every job and write its XLIFF file
///
/// With `parallel` set the jobs run on the rayon thread pool; outcomes come
/// back in job order either way.
pub fn run_batch(jobs: &[PairJob], config: &AlignConfig, parallel: bool) -> BatchReport {
    let aligner = Aligner::new(config.clone());
    let writer = XliffWriter::new(config.xliff.clone());

    let outcomes = if parallel {
        jobs.par_iter()
            .map(|job| run_job(job, &aligner, &writer))
            .collect()
    } else {
        jobs.iter()
            .map(|job| run_job(job, &aligner, &writer))
            .collect()
    };

    let report = BatchReport { outcomes };
    info!(
        jobs = jobs.len(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch finished"
    );
    report
}

fn run_job(job: &PairJob, aligner: &Aligner, writer: &XliffWriter) -> PairOutcome {
    let _span = info_span!("pair", file = %job.name).entered();

    match align_and_write(job, aligner, writer) {
        Ok(alignment) => {
            info!(
                pairs = alignment.pairs.len(),
                warnings = alignment.diagnostics.len(),
                output = %job.output.display(),
                "wrote XLIFF"
            );
            PairOutcome::Aligned {
                name: job.name.clone(),
                output: job.output.clone(),
                pairs: alignment.pairs.len(),
                diagnostics: alignment.diagnostics,
            }
        }
        Err(e) => {
            let diagnostic = e.diagnostic();
            diagnostic.log();
            PairOutcome::Failed {
                name: job.name.clone(),
                diagnostic,
            }
        }
    }
}

fn align_and_write(
    job: &PairJob,
    aligner: &Aligner,
    writer: &XliffWriter,
) -> AlignResult<Alignment> {
    let alignment = aligner.align_files(&job.source, &job.translation)?;
    let config = aligner.config();
    let document = XliffDocument::new(
        &config.source_language,
        &config.target_language,
        &job.file_id(),
    )
    .with_units(alignment.pairs.clone());
    writer.write_to_file(&document, &job.output)?;
    Ok(alignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    fn job(dir: &Path, name: &str, source: &str, translation: &str) -> PairJob {
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::create_dir_all(dir.join("trn")).unwrap();
        let source_path = dir.join("src").join(name);
        let translation_path = dir.join("trn").join(name);
        fs::write(&source_path, source).unwrap();
        fs::write(&translation_path, translation).unwrap();
        PairJob::new(
            name,
            source_path,
            translation_path,
            dir.join("out").join(format!("{}.xlf", name)),
        )
    }

    fn config() -> AlignConfig {
        let mut config = AlignConfig::new();
        config.with_target_language("fr-FR");
        config
    }

    #[test]
    fn test_failed_job_does_not_abort_siblings() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        let jobs = vec![
            job(dir, "good.xml", "<r><t>Hello</t></r>", "<r><t>Bonjour</t></r>"),
            job(dir, "untranslated.xml", "<r><t>Hi</t></r>", "<r/>"),
            job(dir, "broken.xml", "<r><t>Hi</r>", "<r/>"),
            job(
                dir,
                "mixed.xml",
                "<r><p>One<br/>Two</p></r>",
                "<r><p>Un<br/>Deux</p></r>",
            ),
        ];
        fs::remove_file(&jobs[1].translation).unwrap();

        let report = run_batch(&jobs, &config(), false);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.total_pairs(), 3);

        let names: Vec<&str> = report.outcomes.iter().map(PairOutcome::name).collect();
        assert_eq!(
            names,
            vec!["good.xml", "untranslated.xml", "broken.xml", "mixed.xml"]
        );
        for failed in [&report.outcomes[1], &report.outcomes[2]] {
            match failed {
                PairOutcome::Failed { diagnostic, .. } => {
                    assert!(diagnostic.is_fatal());
                    assert_eq!(diagnostic.kind, DiagnosticKind::Failure);
                    assert!(diagnostic.path.is_none());
                }
                other => panic!("Expected failure, got {:?}", other),
            }
        }
        match &report.outcomes[3] {
            PairOutcome::Aligned { pairs, .. } => assert_eq!(*pairs, 2),
            other => panic!("Expected success, got {:?}", other),
        }
        assert!(dir.join("out").join("good.xml.xlf").exists());
        assert!(dir.join("out").join("mixed.xml.xlf").exists());
        assert!(!dir.join("out").join("untranslated.xml.xlf").exists());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        let jobs: Vec<PairJob> = (0..8)
            .map(|i| {
                job(
                    dir,
                    &format!("doc{}.xml", i),
                    &format!("<r><t>Text {}</t></r>", i),
                    &format!("<r><t>Texte {}</t></r>", i),
                )
            })
            .collect();

        let sequential = run_batch(&jobs, &config(), false);
        let parallel = run_batch(&jobs, &config(), true);
        assert_eq!(sequential, parallel);
        assert_eq!(parallel.succeeded(), 8);
    }

    #[test]
    fn test_report_json() {
        let report = BatchReport {
            outcomes: vec![PairOutcome::Failed {
                name: "a.xml".to_string(),
                diagnostic: AlignError::IoError("gone".to_string()).diagnostic(),
            }],
        };
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["outcomes"][0]["status"], "failed");
        assert_eq!(json["outcomes"][0]["name"], "a.xml");
        assert_eq!(json["outcomes"][0]["diagnostic"]["severity"], "FATAL");
        assert_eq!(json["outcomes"][0]["diagnostic"]["kind"], "failure");
    }
}
