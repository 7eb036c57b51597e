//! Merge command - Transform the resource stream on stdin.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};

use fmerge_core::{parse_targets, split_target_list, TargetDescriptor};
use fmerge_resource::{apply_merge, ResourceCollection, TransformerConfig};

#[derive(Args)]
pub struct MergeArgs {
    /// Path to the transformer config naming the ConfigMap
    config: PathBuf,

    /// Target to merge into (repeatable)
    #[arg(short, long = "target", value_name = "TARGET")]
    target: Vec<String>,

    /// Targets as trailing arguments; each may be a space-separated list
    #[arg(value_name = "TARGETS")]
    targets: Vec<String>,

    /// Kind of the resource to transform
    #[arg(long, default_value = fmerge_resource::CONFIG_MAP_KIND)]
    kind: String,
}

impl MergeArgs {
    /// Repeated `--target` values first, then the trailing lists.
    pub fn descriptors(&self) -> Vec<TargetDescriptor> {
        let raw: Vec<String> = self
            .target
            .iter()
            .cloned()
            .chain(self.targets.iter().flat_map(|list| split_target_list(list)))
            .collect();
        parse_targets(&raw)
    }
}

pub fn execute(args: MergeArgs, descriptors: &[TargetDescriptor]) -> Result<()> {
    let config = TransformerConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load transformer config {:?}", args.config))?;
    let selector = config.selector().with_kind(&args.kind);

    for descriptor in descriptors {
        debug!("Target: {}", descriptor);
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read resources from stdin")?;

    let mut collection =
        ResourceCollection::from_yaml_str(&input).context("Failed to parse resources")?;

    info!("Merging {} targets into {}", descriptors.len(), selector);
    apply_merge(&mut collection, &selector, descriptors)?;

    let output = collection
        .to_yaml_string()
        .context("Failed to serialize resources")?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
