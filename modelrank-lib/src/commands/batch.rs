use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::resource::ResourceSpec;
use camino::Utf8PathBuf;
use clap::Parser;
use futures::future::join_all;
use ohno::IntoAppError;
use std::io::{Read, Write};

const LOG_TARGET: &str = "     batch";

#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// File listing one `code_url,dataset_url,model_url` triple per line
    #[arg(value_name = "FILE")]
    pub file: Utf8PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// One line of a URL file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub line: u64,
    pub code_url: String,
    pub dataset_url: String,
    pub model_url: String,
}

impl BatchRow {
    fn resource(&self) -> ResourceSpec {
        ResourceSpec::from_url(&self.model_url)
            .with_dataset_urls([&self.dataset_url])
            .with_code_urls([&self.code_url])
    }
}

/// Parse a URL file.
///
/// Each non-empty line holds up to three comma-separated fields: code URL, dataset URL, and
/// model URL. Missing fields are treated as blank.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<BatchRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.into_app_err("reading URL file")?;
        let line = record.position().map_or(0, csv::Position::line);
        let field = |index: usize| record.get(index).unwrap_or_default().to_string();

        rows.push(BatchRow {
            line,
            code_url: field(0),
            dataset_url: field(1),
            model_url: field(2),
        });
    }

    Ok(rows)
}

/// Evaluate every resource listed in a URL file, printing one NDJSON line per resource.
///
/// Rows that fail are reported and skipped. The process exits with status 1 when any row
/// failed.
pub async fn process_batch<H: Host>(host: &mut H, args: &BatchArgs) -> Result<()> {
    let common = Common::new(&args.common)?;

    let file = std::fs::File::open(&args.file).into_app_err_with(|| format!("opening URL file '{}'", args.file))?;
    let rows = read_rows(file).into_app_err_with(|| format!("parsing URL file '{}'", args.file))?;
    log::info!(target: LOG_TARGET, "Evaluating {} resource(s) from '{}'", rows.len(), args.file);

    let outcomes = join_all(rows.iter().map(|row| common.evaluate(row.resource(), None))).await;

    let mut failures = 0;
    for (row, outcome) in rows.iter().zip(outcomes) {
        match outcome {
            Ok(evaluation) => {
                let _ = writeln!(host.output(), "{}", evaluation.to_line());
            }
            Err(e) => {
                failures += 1;
                let _ = writeln!(host.error(), "{}:{}: {e}", args.file, row.line);
            }
        }
    }

    if failures > 0 {
        let _ = writeln!(host.error(), "{failures} of {} resource(s) could not be evaluated", rows.len());
        host.exit(1);
    }

    Ok(())
}
