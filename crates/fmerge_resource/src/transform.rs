//! Apply the merge engine to selected resources.

use fmerge_core::{merge_with_report, MergeReport, TargetDescriptor};
use tracing::{debug, info, warn};

use crate::collection::ResourceCollection;
use crate::error::{ResourceError, ResourceResult};
use crate::resource::ResourceSelector;

/// Merge result for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMerge {
    pub id: String,
    pub report: MergeReport,
}

/// Merge results for every selected resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub resources: Vec<ResourceMerge>,
}

impl MergeSummary {
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Merge the data of every resource matching `selector`.
///
/// All replacements are computed before any is applied, so on error the
/// collection is left exactly as it was.
pub fn apply_merge(
    collection: &mut ResourceCollection,
    selector: &ResourceSelector,
    descriptors: &[TargetDescriptor],
) -> ResourceResult<MergeSummary> {
    let indices = collection.select(selector);
    if indices.is_empty() {
        warn!("No resource matches {}, nothing to merge", selector);
        return Ok(MergeSummary::default());
    }

    let mut replacements = Vec::with_capacity(indices.len());
    let mut summary = MergeSummary::default();

    for index in indices {
        let resource = &collection.resources()[index];
        let id = resource.id();
        let snapshot = resource.data_map()?;

        let (data, report) = merge_with_report(&snapshot, descriptors).map_err(|source| {
            ResourceError::Merge {
                id: id.clone(),
                source,
            }
        })?;

        debug!(
            "{}: {} entries before merge, {} after",
            id,
            snapshot.len(),
            data.len()
        );
        replacements.push((index, resource.with_data_map(&data)));
        summary.resources.push(ResourceMerge { id, report });
    }

    for (index, resource) in replacements {
        collection.replace(index, resource)?;
    }

    for merged in &summary.resources {
        info!(
            "Merged {}: {} targets, {} entries consumed",
            merged.id,
            merged.report.applied.len(),
            merged.report.consumed_keys().len()
        );
    }

    Ok(summary)
}
