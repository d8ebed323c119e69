use crate::config::AppConfig;
use crate::data::ingest;
use crate::data::CsvConnector;
use crate::error::{BondLabelError, Result};
use crate::labeling::{DefaultHistoryIndex, DefaultLabeler, EntityResolver};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub batches_total: usize,
    pub batches_failed: usize,
    pub records_labeled: usize,
    pub records_unlabeled: usize,
    pub records_rejected: usize,
}

struct BatchOutcome {
    labeled: usize,
    unlabeled: usize,
    rejected: usize,
}

/// Runs the labeling pipeline over every batch file in the input
/// directory. Batches are independent and processed in parallel; the
/// reference structures are built once and shared read-only.
pub struct PipelineRunner {
    config: AppConfig,
}

impl PipelineRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<RunSummary> {
        self.config.validate()?;

        let profile_df = CsvConnector::load(&self.config.pipeline.bond_profile_path)?;
        let profile = ingest::parse_profile_frame(&profile_df)?;
        log::info!("Loaded {} bond reference rows", profile.len());

        let resolver = Arc::new(EntityResolver::from_profile(&profile));
        let history = Arc::new(DefaultHistoryIndex::from_profile(&profile));

        let batch_files = self.batch_files()?;
        if batch_files.is_empty() {
            log::warn!(
                "No batch files found in {}",
                self.config.pipeline.news_input_dir.display()
            );
        }

        std::fs::create_dir_all(&self.config.pipeline.output_dir)?;

        let labeler = DefaultLabeler::new(
            self.config.labeling.clone(),
            Arc::clone(&resolver),
            Arc::clone(&history),
        );

        let results: Vec<Result<BatchOutcome>> = batch_files
            .par_iter()
            .map(|path| self.process_batch(&labeler, path))
            .collect();

        let mut summary = RunSummary {
            batches_total: batch_files.len(),
            ..Default::default()
        };

        for (path, result) in batch_files.iter().zip(results) {
            match result {
                Ok(outcome) => {
                    summary.records_labeled += outcome.labeled;
                    summary.records_unlabeled += outcome.unlabeled;
                    summary.records_rejected += outcome.rejected;
                }
                Err(e) => {
                    // Batch isolation: one bad file never stops the rest.
                    log::error!("Batch {} failed: {}", path.display(), e);
                    summary.batches_failed += 1;
                }
            }
        }

        log::info!(
            "Labeled {} records across {} batches ({} failed, {} unlabeled, {} rejected)",
            summary.records_labeled,
            summary.batches_total,
            summary.batches_failed,
            summary.records_unlabeled,
            summary.records_rejected
        );

        Ok(summary)
    }

    fn process_batch(&self, labeler: &DefaultLabeler, path: &Path) -> Result<BatchOutcome> {
        let df = CsvConnector::load(path)?;
        let parsed = ingest::parse_news_frame(&df)?;

        for rejected in &parsed.rejected {
            log::error!(
                "{}: dropping record {}: {}",
                path.display(),
                rejected.news_id,
                rejected.reason
            );
        }

        let batch = labeler.label_records(&parsed.records)?;
        let mut labeled = labeler.merge_labels(&df, &batch)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                BondLabelError::DataLoading(format!(
                    "Unusable batch file name: {}",
                    path.display()
                ))
            })?;
        let out_path = self
            .config
            .pipeline
            .output_dir
            .join(format!("{}_labeled.csv", stem));
        CsvConnector::write(&mut labeled, &out_path)?;

        log::info!(
            "{}: {} labeled, {} unlabeled -> {}",
            path.display(),
            batch.rows.len(),
            batch.unlabeled.len(),
            out_path.display()
        );

        Ok(BatchOutcome {
            labeled: batch.rows.len(),
            unlabeled: batch.unlabeled.len(),
            rejected: parsed.rejected.len(),
        })
    }

    /// One CSV per publish date, processed in name order.
    fn batch_files(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.config.pipeline.news_input_dir;
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| {
                BondLabelError::DataLoading(format!(
                    "Failed to read input directory {}: {}",
                    dir.display(),
                    e
                ))
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
            })
            .collect();

        files.sort();
        Ok(files)
    }
}
