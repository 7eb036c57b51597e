//! Data map merge engine.
//!
//! The engine reads from the untouched `original` snapshot and writes to a
//! working copy. Every prefix match and every piece of merged content is
//! decided from the snapshot, so merges done for one target never change
//! what a later target sees.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::target::TargetDescriptor;

/// Entry key to entry content. Keys iterate in lexicographic order, which is
/// the order fragments are appended in.
pub type DataMap = BTreeMap<String, String>;

/// What the engine did for one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetReport {
    pub target_key: String,
    /// Variable keys injected, in rule order.
    pub variables: Vec<String>,
    /// Fragment keys appended, in key order.
    pub fragments: Vec<String>,
}

impl TargetReport {
    fn new(target_key: impl Into<String>) -> Self {
        Self {
            target_key: target_key.into(),
            ..Default::default()
        }
    }
}

/// Summary of a merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub applied: Vec<TargetReport>,
    /// Target keys that were absent from the data map.
    pub skipped: Vec<String>,
}

impl MergeReport {
    /// Every key removed from the data map, deduplicated.
    pub fn consumed_keys(&self) -> BTreeSet<&str> {
        self.applied
            .iter()
            .flat_map(|t| t.variables.iter().chain(t.fragments.iter()))
            .map(String::as_str)
            .collect()
    }
}

/// Merge `original` according to `descriptors`, returning the new data map.
pub fn merge(original: &DataMap, descriptors: &[TargetDescriptor]) -> CoreResult<DataMap> {
    merge_with_report(original, descriptors).map(|(result, _)| result)
}

/// Same as [`merge`], also reporting which keys were consumed per target.
pub fn merge_with_report(
    original: &DataMap,
    descriptors: &[TargetDescriptor],
) -> CoreResult<(DataMap, MergeReport)> {
    let mut result = original.clone();
    let mut report = MergeReport::default();
    // Variables stay out of every later fragment pass once injected.
    let mut consumed_variables: BTreeSet<&str> = BTreeSet::new();
    // Targets are never consumed by another target.
    let targets: BTreeSet<&str> = descriptors
        .iter()
        .map(|d| d.target_key.as_str())
        .filter(|key| original.contains_key(*key))
        .collect();
    // A target listed twice gets its fragments only once.
    let mut fragment_passes: BTreeSet<&str> = BTreeSet::new();

    for descriptor in descriptors {
        let target_key = descriptor.target_key.as_str();

        if !original.contains_key(target_key) {
            debug!("Target {} not present, skipping", target_key);
            report.skipped.push(target_key.to_string());
            continue;
        }

        let prefix = descriptor
            .prefix()
            .ok_or_else(|| CoreError::MissingExtension(target_key.to_string()))?;

        let mut applied = TargetReport::new(target_key);

        for rule in &descriptor.variable_rules {
            let variable_key = rule.variable_key.as_str();
            if targets.contains(variable_key) {
                debug!("Variable {} is a merge target, skipping", variable_key);
                continue;
            }
            let Some(value) = original.get(variable_key) else {
                debug!("Variable {} not present, skipping", variable_key);
                continue;
            };

            append_to_target(&mut result, target_key, &rule.line(value))?;
            result.remove(variable_key);
            consumed_variables.insert(variable_key);
            debug!("Injected {} into {} as {}", variable_key, target_key, rule.label());
            applied.variables.push(variable_key.to_string());
        }

        if !fragment_passes.insert(target_key) {
            debug!("Fragments of {} already merged", target_key);
            report.applied.push(applied);
            continue;
        }

        for (key, content) in original {
            if targets.contains(key.as_str())
                || !key.starts_with(prefix)
                || consumed_variables.contains(key.as_str())
            {
                continue;
            }
            if content.is_empty() {
                return Err(CoreError::EmptyContent { key: key.clone() });
            }

            append_to_target(&mut result, target_key, content)?;
            result.remove(key);
            debug!("Merged {} into {}", key, target_key);
            applied.fragments.push(key.clone());
        }

        report.applied.push(applied);
    }

    Ok((result, report))
}

/// Append `unit` so that it starts on its own line.
///
/// A single `\n` is inserted first when `target` is non-empty and does not
/// already end with one.
pub fn append_unit(target: &mut String, unit: &str) {
    if !target.is_empty() && !target.ends_with('\n') {
        target.push('\n');
    }
    target.push_str(unit);
}

fn append_to_target(result: &mut DataMap, target_key: &str, unit: &str) -> CoreResult<()> {
    match result.get_mut(target_key) {
        None => {
            result.insert(target_key.to_string(), unit.to_string());
        }
        Some(existing) if existing.is_empty() => {
            return Err(CoreError::EmptyContent {
                key: target_key.to_string(),
            });
        }
        Some(existing) => append_unit(existing, unit),
    }
    Ok(())
}
