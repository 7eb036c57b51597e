//! Multi-document resource streams.

use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::error::{ResourceError, ResourceResult};
use crate::resource::{Resource, ResourceSelector};

/// Ordered collection of resources read from one YAML stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceCollection {
    resources: Vec<Resource>,
}

impl ResourceCollection {
    /// Parse a `---` separated YAML stream.
    ///
    /// Empty documents are skipped and `*List` documents are flattened into
    /// their `items`.
    pub fn from_yaml_str(input: &str) -> ResourceResult<Self> {
        let mut resources = Vec::new();

        for (index, document) in serde_yaml::Deserializer::from_str(input).enumerate() {
            let value = Value::deserialize(document)?;
            if value.is_null() {
                continue;
            }
            push_document(index, value, &mut resources)?;
        }

        debug!("Loaded {} resources", resources.len());
        Ok(Self { resources })
    }

    /// Serialize every resource in order, separated by `---` lines.
    pub fn to_yaml_string(&self) -> ResourceResult<String> {
        let mut out = String::new();
        for (i, resource) in self.resources.iter().enumerate() {
            if i > 0 {
                out.push_str("---\n");
            }
            out.push_str(&serde_yaml::to_string(resource.as_value())?);
        }
        Ok(out)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Indices of the resources matching `selector`, in stream order.
    pub fn select(&self, selector: &ResourceSelector) -> Vec<usize> {
        self.resources
            .iter()
            .enumerate()
            .filter(|(_, resource)| selector.matches(resource))
            .map(|(index, _)| index)
            .collect()
    }

    /// Replace the resource at `index`, returning the previous one.
    pub fn replace(&mut self, index: usize, resource: Resource) -> ResourceResult<Resource> {
        let slot = self
            .resources
            .get_mut(index)
            .ok_or(ResourceError::IndexOutOfRange(index))?;
        Ok(std::mem::replace(slot, resource))
    }
}

fn push_document(index: usize, mut value: Value, resources: &mut Vec<Resource>) -> ResourceResult<()> {
    let is_list = value
        .get("kind")
        .and_then(Value::as_str)
        .map_or(false, |kind| kind.ends_with("List"));

    if is_list {
        if let Some(Value::Sequence(items)) = value
            .as_mapping_mut()
            .and_then(|root| root.remove("items"))
        {
            debug!("Flattening list document {} with {} items", index, items.len());
            for item in items {
                push_document(index, item, resources)?;
            }
            return Ok(());
        }
    }

    let resource = Resource::from_value(value).ok_or(ResourceError::InvalidDocument { index })?;
    resources.push(resource);
    Ok(())
}
