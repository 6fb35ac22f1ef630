use super::Host;
use super::common::{Common, CommonArgs, parse_weight};
use crate::Result;
use crate::engine::WeightTable;
use crate::resource::{Category, ResourceMetadata, ResourceSpec};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;
use std::sync::Arc;

#[derive(Parser, Debug, Clone)]
pub struct EvalArgs {
    /// URL of the model to evaluate
    #[arg(value_name = "URL")]
    pub url: String,

    /// URL of a dataset the model was trained or evaluated on
    #[arg(long = "dataset", value_name = "URL")]
    pub datasets: Vec<String>,

    /// URL of a code repository associated with the model
    #[arg(long = "code", value_name = "URL")]
    pub code: Vec<String>,

    /// Category of the resource (inferred from the URL by default)
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<Category>,

    /// Read the model card from a local file instead of downloading it
    #[arg(long, value_name = "PATH")]
    pub readme: Option<Utf8PathBuf>,

    /// License identifier of the model, such as `apache-2.0`
    #[arg(long, value_name = "ID")]
    pub license: Option<String>,

    /// Override the configured weight of a metric
    #[arg(long = "weight", value_name = "NAME=VALUE", value_parser = parse_weight)]
    pub weights: Vec<(String, f64)>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl EvalArgs {
    fn resource(&self) -> Result<ResourceSpec> {
        let readme = match &self.readme {
            Some(path) => Some(Arc::from(fs::read_to_string(path).into_app_err_with(|| format!("reading README file '{path}'"))?)),
            None => None,
        };

        let category = self.category.unwrap_or_else(|| Category::from_url(&self.url));
        Ok(ResourceSpec::new(&self.url, category)
            .with_dataset_urls(&self.datasets)
            .with_code_urls(&self.code)
            .with_metadata(ResourceMetadata {
                readme,
                license: self.license.as_deref().map(Arc::from),
            }))
    }
}

/// Evaluate a single resource and print its NDJSON line.
pub async fn process_eval<H: Host>(host: &mut H, args: &EvalArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let resource = args.resource()?;

    let weights = if args.weights.is_empty() {
        None
    } else {
        let overrides = WeightTable::new(args.weights.iter().cloned()).into_app_err("parsing weight overrides")?;
        Some(common.config.weights.merged_with(&overrides))
    };

    match common.evaluate(resource, weights.as_ref()).await {
        Ok(evaluation) => {
            let _ = writeln!(host.output(), "{}", evaluation.to_line());
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "Could not evaluate '{}': {e}", args.url);
            host.exit(1);
            Err(e).into_app_err("evaluating resource")
        }
    }
}
