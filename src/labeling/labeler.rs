use super::aggregator::{aggregate, JudgmentRow};
use super::history::DefaultHistoryIndex;
use super::judgment::judge;
use super::resolver::{EntityResolver, ResolvedRecord};
use crate::config::{LabelingConfig, WindowDirection};
use crate::data::connectors::{DataValidator, NewsColumn};
use crate::data::ingest::{self, ParsedBatch};
use crate::error::Result;
use crate::types::{Label, LabeledBatch, NewsRecord};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Labels one batch of news records against the default history.
///
/// The resolver and history index are built once per run and shared
/// read-only across batch workers.
pub struct DefaultLabeler {
    config: LabelingConfig,
    resolver: Arc<EntityResolver>,
    history: Arc<DefaultHistoryIndex>,
}

impl DefaultLabeler {
    pub fn new(
        config: LabelingConfig,
        resolver: Arc<EntityResolver>,
        history: Arc<DefaultHistoryIndex>,
    ) -> Self {
        Self {
            config,
            resolver,
            history,
        }
    }

    pub fn config(&self) -> &LabelingConfig {
        &self.config
    }

    /// Label typed records: resolve, expand per entity, judge each
    /// window, and aggregate back to one label vector per record.
    pub fn label_records(&self, records: &[NewsRecord]) -> Result<LabeledBatch> {
        let mut rows: Vec<JudgmentRow> = Vec::new();
        let mut unlabeled: Vec<String> = Vec::new();

        for record in records {
            let resolved = self.resolver.resolve(record);
            let judged = self.judge_record(&resolved)?;

            if judged.is_empty() {
                unlabeled.push(record.news_id.clone());
            } else {
                rows.extend(judged);
            }
        }

        Ok(LabeledBatch {
            rows: aggregate(&rows),
            unlabeled,
        })
    }

    /// Expand one resolved record into per-entity judgment rows.
    ///
    /// Bond path when any bond codes are present: one row per bond, using
    /// its earliest default. Issuer path otherwise: one row per
    /// (issuer, default date) pair, so every event of a multi-default
    /// issuer is judged and the any-wins aggregation folds them together.
    fn judge_record(&self, resolved: &ResolvedRecord) -> Result<Vec<JudgmentRow>> {
        let record = &resolved.record;
        let mut rows = Vec::new();

        if !record.bond_codes.is_empty() {
            for bond in &record.bond_codes {
                let default_date = self.history.earliest_for_bond(bond);
                rows.push(self.judge_entity(record, default_date, resolved.single_entity)?);
            }
        } else {
            for issuer in &record.issuer_codes {
                let dates = self.history.dates_for_issuer(issuer);
                if dates.is_empty() {
                    rows.push(self.judge_entity(record, None, resolved.single_entity)?);
                } else {
                    for date in dates {
                        rows.push(self.judge_entity(
                            record,
                            Some(*date),
                            resolved.single_entity,
                        )?);
                    }
                }
            }
        }

        Ok(rows)
    }

    fn judge_entity(
        &self,
        record: &NewsRecord,
        default_date: Option<NaiveDate>,
        single_entity: bool,
    ) -> Result<JudgmentRow> {
        let mut labels = Vec::with_capacity(self.config.windows.len());

        for window in &self.config.windows {
            // Backward attribution is only trusted for single-issuer news;
            // multi-entity records get no backward penalty.
            let label = if window.direction == WindowDirection::Backward && !single_entity {
                Label::NonDefault
            } else {
                judge(record.publish_date, default_date, window)?
            };
            labels.push(label);
        }

        Ok(JudgmentRow {
            news_id: record.news_id.clone(),
            labels,
        })
    }

    /// Label a raw batch frame: ingest, judge, and attach one i32 column
    /// per window to the input rows.
    ///
    /// Rows whose record could not be labeled (zero resolvable entities,
    /// rejected publish date) keep null label columns rather than a
    /// signal value.
    pub fn label_frame(&self, df: &DataFrame) -> Result<DataFrame> {
        let ParsedBatch { records, rejected } = ingest::parse_news_frame(df)?;

        for rejected_record in &rejected {
            log::error!(
                "Dropping record {}: {}",
                rejected_record.news_id,
                rejected_record.reason
            );
        }

        let batch = self.label_records(&records)?;

        if !batch.unlabeled.is_empty() {
            log::warn!(
                "{} records resolved to zero entities and stay unlabeled",
                batch.unlabeled.len()
            );
        }

        self.merge_labels(df, &batch)
    }

    /// Left-join semantics over the input frame: every input row is kept,
    /// labels align by news id, missing ids stay null.
    pub fn merge_labels(&self, df: &DataFrame, batch: &LabeledBatch) -> Result<DataFrame> {
        let columns = DataValidator::validate_news(df)?;
        let ids = ingest::utf8_values(df, &columns[&NewsColumn::NewsId])?;

        let by_id: HashMap<&str, &Vec<Label>> = batch
            .rows
            .iter()
            .map(|row| (row.news_id.as_str(), &row.labels))
            .collect();

        let mut out = df.clone();

        for (window_idx, window) in self.config.windows.iter().enumerate() {
            let values: Vec<Option<i32>> = ids
                .iter()
                .map(|id| {
                    id.as_deref()
                        .and_then(|id| by_id.get(id.trim()))
                        .map(|labels| labels[window_idx].value())
                })
                .collect();

            out.with_column(Column::new(window.name.as_str().into(), values))?;
        }

        Ok(out)
    }
}
