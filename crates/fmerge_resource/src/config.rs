//! Transformer configuration document.
//!
//! ```yaml
//! apiVersion: fmerge/v1
//! kind: FileMergeTransformer
//! metadata:
//!   name: app-config
//!   namespace: prod   # optional
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ResourceError, ResourceResult};
use crate::resource::ResourceSelector;

/// Metadata naming the resource to transform.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// The transformer's own configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransformerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
}

impl TransformerConfig {
    /// Read the config from a file.
    pub fn from_file(path: impl AsRef<Path>) -> ResourceResult<Self> {
        let path = path.as_ref();
        debug!("Reading transformer config from {:?}", path);

        let content = fs::read_to_string(path).map_err(|source| ResourceError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse the config from YAML. `metadata.name` is required.
    pub fn from_yaml_str(content: &str) -> ResourceResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        if config.metadata.name.trim().is_empty() {
            return Err(ResourceError::InvalidConfig(
                "metadata.name is required".to_string(),
            ));
        }
        Ok(config)
    }

    /// Selector for the ConfigMap this config names.
    pub fn selector(&self) -> ResourceSelector {
        let selector = ResourceSelector::config_map(&self.metadata.name);
        match &self.metadata.namespace {
            Some(namespace) => selector.with_namespace(namespace),
            None => selector,
        }
    }
}
