//! # fmerge_core
//!
//! Target parsing and the data map merge engine for fmerge.
//!
//! A data map is the `data` section of a ConfigMap-like resource: a mapping of
//! pseudo-filenames to file contents. The engine folds related entries into a
//! smaller set of target entries.
//!
//! ## Merge rules
//!
//! - **Targets**: entries named by a [`TargetDescriptor`]; the key must carry an
//!   extension (`app.properties`)
//! - **Variables**: entries whose value is injected into a target as a
//!   `label=value` line, then removed
//! - **Fragments**: entries whose key starts with the target's prefix
//!   (`app` for `app.properties`); their content is appended, then removed
//!
//! ## Example
//!
//! ```rust
//! use fmerge_core::{merge, parse_targets, DataMap};
//!
//! let mut data = DataMap::new();
//! data.insert("app.properties".to_string(), "a=1".to_string());
//! data.insert("app-dev.properties".to_string(), "b=2\n".to_string());
//! data.insert("DB_HOST".to_string(), "localhost".to_string());
//!
//! let targets = parse_targets(&["app.properties,DB_HOST=db.host"]);
//! let merged = merge(&data, &targets).unwrap();
//!
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged["app.properties"], "a=1\ndb.host=localhost\nb=2\n");
//! ```

pub mod engine;
pub mod error;
pub mod target;

pub use engine::{append_unit, merge, merge_with_report, DataMap, MergeReport, TargetReport};
pub use error::{CoreError, CoreResult};
pub use target::{parse_targets, split_target_list, TargetDescriptor, VariableRule};
