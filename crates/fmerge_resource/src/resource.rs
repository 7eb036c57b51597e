//! A single resource document and resource selection.

use std::fmt;

use fmerge_core::DataMap;
use serde_yaml::{Mapping, Value};

use crate::error::{ResourceError, ResourceResult};

/// Kind of the resources whose data is merged.
pub const CONFIG_MAP_KIND: &str = "ConfigMap";

/// One resource document, kept as raw YAML so unknown fields survive untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    document: Value,
}

impl Resource {
    /// Wrap a YAML document. The document must be a mapping.
    pub fn from_value(document: Value) -> Option<Self> {
        document.is_mapping().then_some(Self { document })
    }

    /// The underlying YAML document.
    pub fn as_value(&self) -> &Value {
        &self.document
    }

    pub fn kind(&self) -> Option<&str> {
        self.document.get("kind").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata_field("name")
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata_field("namespace")
    }

    fn metadata_field(&self, field: &str) -> Option<&str> {
        self.document
            .get("metadata")
            .and_then(|metadata| metadata.get(field))
            .and_then(Value::as_str)
    }

    /// Identifier used in logs and errors, e.g. `ConfigMap/prod/app-config`.
    pub fn id(&self) -> String {
        let kind = self.kind().unwrap_or("<unknown>");
        let name = self.name().unwrap_or("<unnamed>");
        match self.namespace() {
            Some(namespace) => format!("{}/{}/{}", kind, namespace, name),
            None => format!("{}/{}", kind, name),
        }
    }

    /// The `data` section as a [`DataMap`]. A missing or null section is empty.
    pub fn data_map(&self) -> ResourceResult<DataMap> {
        let data = match self.document.get("data") {
            None | Some(Value::Null) => return Ok(DataMap::new()),
            Some(data) => data,
        };

        let mapping = data
            .as_mapping()
            .ok_or_else(|| self.invalid("data is not a mapping"))?;

        let mut map = DataMap::new();
        for (key, value) in mapping {
            let key = key
                .as_str()
                .ok_or_else(|| self.invalid(format!("data key {:?} is not a string", key)))?;
            let value = value
                .as_str()
                .ok_or_else(|| self.invalid(format!("data value of '{}' is not a string", key)))?;
            map.insert(key.to_string(), value.to_string());
        }
        Ok(map)
    }

    /// A copy of this resource whose `data` section is replaced by `data`.
    ///
    /// A resource without a `data` section keeps none when `data` is empty.
    pub fn with_data_map(&self, data: &DataMap) -> Self {
        if data.is_empty() && self.document.get("data").is_none() {
            return self.clone();
        }

        let mapping: Mapping = data
            .iter()
            .map(|(k, v)| (Value::String(k.clone()), Value::String(v.clone())))
            .collect();

        let mut document = self.document.clone();
        if let Some(root) = document.as_mapping_mut() {
            root.insert(Value::String("data".to_string()), Value::Mapping(mapping));
        }
        Self { document }
    }

    fn invalid(&self, message: impl Into<String>) -> ResourceError {
        ResourceError::InvalidResource {
            id: self.id(),
            message: message.into(),
        }
    }
}

/// Selects resources by kind, name and optionally namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSelector {
    pub kind: String,
    pub name: String,
    /// Any namespace matches when unset.
    pub namespace: Option<String>,
}

impl ResourceSelector {
    /// Select the ConfigMap called `name`.
    pub fn config_map(name: impl Into<String>) -> Self {
        Self {
            kind: CONFIG_MAP_KIND.to_string(),
            name: name.into(),
            namespace: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        resource.kind() == Some(self.kind.as_str())
            && resource.name() == Some(self.name.as_str())
            && self
                .namespace
                .as_deref()
                .map_or(true, |namespace| resource.namespace() == Some(namespace))
    }
}

impl fmt::Display for ResourceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}/{}/{}", self.kind, namespace, self.name),
            None => write!(f, "{}/{}", self.kind, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(yaml: &str) -> Resource {
        Resource::from_value(serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    const CONFIG_MAP: &str = r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: app-config
  namespace: prod
  labels:
    app: demo
data:
  app.properties: |
    a=1
  HOST: localhost
"#;

    #[test]
    fn test_accessors() {
        let r = resource(CONFIG_MAP);
        assert_eq!(r.kind(), Some("ConfigMap"));
        assert_eq!(r.name(), Some("app-config"));
        assert_eq!(r.namespace(), Some("prod"));
        assert_eq!(r.id(), "ConfigMap/prod/app-config");
    }

    #[test]
    fn test_non_mapping_rejected() {
        assert!(Resource::from_value(Value::String("x".to_string())).is_none());
    }

    #[test]
    fn test_data_map() {
        let data = resource(CONFIG_MAP).data_map().unwrap();
        assert_eq!(data["app.properties"], "a=1\n");
        assert_eq!(data["HOST"], "localhost");
    }

    #[test]
    fn test_missing_data_is_empty() {
        let r = resource("kind: ConfigMap\nmetadata:\n  name: x\n");
        assert!(r.data_map().unwrap().is_empty());
    }

    #[test]
    fn test_non_string_value_rejected() {
        let r = resource("kind: ConfigMap\nmetadata:\n  name: x\ndata:\n  port: 8080\n");
        let err = r.data_map().unwrap_err();
        assert!(err.is_input_format());
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_with_data_map_keeps_other_fields() {
        let original = resource(CONFIG_MAP);
        let mut data = DataMap::new();
        data.insert("merged.properties".to_string(), "x=1".to_string());

        let replaced = original.with_data_map(&data);

        assert_eq!(replaced.data_map().unwrap(), data);
        assert_eq!(replaced.id(), original.id());
        assert_eq!(
            replaced.as_value().get("metadata"),
            original.as_value().get("metadata")
        );
        // The original is untouched.
        assert_eq!(original.data_map().unwrap().len(), 2);
    }

    #[test]
    fn test_with_empty_data_map_adds_no_section() {
        let original = resource("kind: ConfigMap\nmetadata:\n  name: x\n");
        let replaced = original.with_data_map(&DataMap::new());
        assert!(replaced.as_value().get("data").is_none());
        assert_eq!(replaced, original);
    }

    #[test]
    fn test_with_empty_data_map_clears_existing_section() {
        let original = resource("kind: ConfigMap\nmetadata:\n  name: x\ndata:\n  a.txt: a\n");
        let replaced = original.with_data_map(&DataMap::new());
        assert!(replaced.data_map().unwrap().is_empty());
        assert!(replaced.as_value().get("data").is_some());
    }

    #[test]
    fn test_selector_matches() {
        let r = resource(CONFIG_MAP);
        assert!(ResourceSelector::config_map("app-config").matches(&r));
        assert!(ResourceSelector::config_map("app-config")
            .with_namespace("prod")
            .matches(&r));
        assert!(!ResourceSelector::config_map("app-config")
            .with_namespace("dev")
            .matches(&r));
        assert!(!ResourceSelector::config_map("other").matches(&r));
        assert!(!ResourceSelector::config_map("app-config")
            .with_kind("Secret")
            .matches(&r));
    }
}
