use anyhow::{Result, bail};
use comfy_table::Table;
use tracing::{info, warn};

use mrdc_ingest::{DefaultExtractor, HttpOptions, SourceDescriptor};
use mrdc_load::{CsvDestination, DbCredentials, Loader};
use mrdc_model::{DatasetKind, DatasetProfile};

use mrdc_cli::pipeline::{DatasetOutcome, run_dataset};

use crate::cli::RunArgs;
use crate::summary::apply_table_style;

pub fn run(args: &RunArgs) -> Result<DatasetOutcome> {
    let kind = DatasetKind::from(args.kind);
    let source = source_from_args(args)?;
    let target = args
        .target
        .clone()
        .unwrap_or_else(|| kind.target_table().to_string());

    if let Some(creds_path) = &args.creds {
        // The shipped destination is file-based; validate the
        // credentials anyway so a misconfigured mapping fails here
        // rather than in a database-backed deployment.
        let creds = DbCredentials::from_yaml_file(creds_path)?;
        info!(host = %creds.host, database = %creds.database, "destination credentials loaded");
        warn!("database destination not configured, writing CSV files instead");
    }

    let destination;
    let loader: Option<&dyn Loader> = if args.dry_run {
        None
    } else {
        destination = CsvDestination::new(&args.out);
        Some(&destination)
    };

    run_dataset(&DefaultExtractor, &source, kind, &target, loader)
}

pub fn run_datasets() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Kind", "Target table", "Required columns"]);
    apply_table_style(&mut table);
    for kind in DatasetKind::ALL {
        let profile = DatasetProfile::for_kind(kind);
        let required = if profile.pass_through {
            "(pass-through)".to_string()
        } else {
            profile.required_source_columns().join(", ")
        };
        table.add_row(vec![kind.to_string(), kind.target_table().to_string(), required]);
    }
    println!("{table}");
    Ok(())
}

fn source_from_args(args: &RunArgs) -> Result<SourceDescriptor> {
    match (&args.csv, &args.json, &args.url) {
        (Some(path), None, None) => Ok(SourceDescriptor::CsvFile(path.clone())),
        (None, Some(path), None) => Ok(SourceDescriptor::JsonFile(path.clone())),
        (None, None, Some(url)) => Ok(SourceDescriptor::HttpJson {
            url: url.clone(),
            options: HttpOptions {
                api_key: args.api_key.clone(),
                timeout: None,
            },
        }),
        _ => bail!("exactly one of --csv, --json or --url is required"),
    }
}
