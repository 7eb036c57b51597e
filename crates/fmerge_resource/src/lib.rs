//! # fmerge_resource
//!
//! Resource collection plumbing for fmerge.
//!
//! This crate reads a multi-document YAML stream of resources, selects the
//! ConfigMap named by a transformer config, runs the merge engine over its
//! `data` and replaces the resource in the collection.
//!
//! ## Example
//!
//! ```rust
//! use fmerge_core::parse_targets;
//! use fmerge_resource::{apply_merge, ResourceCollection, TransformerConfig};
//!
//! let config = TransformerConfig::from_yaml_str("metadata:\n  name: app-config\n").unwrap();
//! let mut collection = ResourceCollection::from_yaml_str(
//!     "kind: ConfigMap\nmetadata:\n  name: app-config\ndata:\n  app.properties: a=1\n  app-dev.properties: b=2\n",
//! )
//! .unwrap();
//!
//! let targets = parse_targets(&["app.properties"]);
//! apply_merge(&mut collection, &config.selector(), &targets).unwrap();
//!
//! let data = collection.resources()[0].data_map().unwrap();
//! assert_eq!(data["app.properties"], "a=1\nb=2");
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod resource;
pub mod transform;

pub use collection::ResourceCollection;
pub use config::{ObjectMeta, TransformerConfig};
pub use error::{ResourceError, ResourceResult};
pub use resource::{Resource, ResourceSelector, CONFIG_MAP_KIND};
pub use transform::{apply_merge, MergeSummary, ResourceMerge};
