//! Pipeline orchestrator: one dataset end-to-end.
//!
//! Acquire a raw table from the extraction collaborator, normalize it
//! for the dataset kind, hand the result to the load collaborator.
//! Each run is independent; a failure aborts only its own dataset.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use mrdc_clean::{NormalizeReport, normalize_table};
use mrdc_ingest::{Extractor, SourceDescriptor};
use mrdc_load::Loader;
use mrdc_model::DatasetKind;

/// Result of one dataset run.
#[derive(Debug)]
pub struct DatasetOutcome {
    pub kind: DatasetKind,
    pub target_table: String,
    pub report: NormalizeReport,
    /// False on a dry run.
    pub loaded: bool,
    pub elapsed_ms: u128,
}

/// Run one dataset end-to-end.
///
/// `loader` is `None` for a dry run: extraction and normalization
/// happen, nothing is written.
pub fn run_dataset(
    extractor: &dyn Extractor,
    source: &SourceDescriptor,
    kind: DatasetKind,
    target_table: &str,
    loader: Option<&dyn Loader>,
) -> Result<DatasetOutcome> {
    let start = Instant::now();
    let span = info_span!("dataset", kind = %kind, source = %source);
    let _guard = span.enter();

    let raw = {
        let _extract = info_span!("extract").entered();
        extractor
            .fetch(source)
            .with_context(|| format!("extract {source}"))?
    };
    info!(rows = raw.height(), "raw table acquired");

    let output = {
        let _normalize = info_span!("normalize").entered();
        normalize_table(kind, &raw).with_context(|| format!("normalize {kind} dataset"))?
    };

    let loaded = match loader {
        Some(loader) => {
            let _load = info_span!("load", target = target_table).entered();
            loader
                .store(target_table, &output.table)
                .with_context(|| format!("store table '{target_table}'"))?;
            true
        }
        None => {
            info!(target = target_table, "dry run, skipping load");
            false
        }
    };

    Ok(DatasetOutcome {
        kind,
        target_table: target_table.to_string(),
        report: output.report,
        loaded,
        elapsed_ms: start.elapsed().as_millis(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrdc_ingest::DefaultExtractor;
    use mrdc_load::CsvDestination;

    #[test]
    fn csv_to_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("orders.csv");
        std::fs::write(
            &source_path,
            "first_name,last_name,card_number,quantity\nAda,Lovelace,4929,2\nAda,Lovelace,4929,2\n",
        )
        .unwrap();
        let out_dir = dir.path().join("out");
        let destination = CsvDestination::new(&out_dir);

        let outcome = run_dataset(
            &DefaultExtractor,
            &SourceDescriptor::CsvFile(source_path),
            DatasetKind::Orders,
            DatasetKind::Orders.target_table(),
            Some(&destination),
        )
        .unwrap();

        assert!(outcome.loaded);
        assert_eq!(outcome.report.rows_in, 2);
        assert_eq!(outcome.report.rows_out, 1);
        let written = std::fs::read_to_string(out_dir.join("orders_table.csv")).unwrap();
        assert_eq!(written, "card_number,quantity\n4929,2\n");
    }

    #[test]
    fn extraction_failure_aborts_the_run() {
        let result = run_dataset(
            &DefaultExtractor,
            &SourceDescriptor::CsvFile("/no/such/orders.csv".into()),
            DatasetKind::Orders,
            "orders_table",
            None,
        );
        assert!(result.is_err());
    }
}
