//! Merge target descriptors.
//!
//! A raw target argument has the form `targetKey[,variableKey[=label]]*`:
//!
//! ```text
//! app.properties,DB_HOST=db.host,DB_PORT
//! ```
//!
//! No existence checks happen here; the engine resolves keys against the
//! actual data map.

use std::fmt;

/// A variable entry to inject into a target as a `label=value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRule {
    pub variable_key: String,
    pub replacement_label: Option<String>,
}

impl VariableRule {
    /// Create a rule that injects `variable_key` under its own name.
    pub fn new(variable_key: impl Into<String>) -> Self {
        Self {
            variable_key: variable_key.into(),
            replacement_label: None,
        }
    }

    /// Set the left-hand side of the injected line.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.replacement_label = Some(label.into());
        self
    }

    /// The left-hand side of the injected line.
    pub fn label(&self) -> &str {
        match self.replacement_label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.variable_key,
        }
    }

    /// Format the line injected for `value`.
    pub fn line(&self, value: &str) -> String {
        format!("{}={}", self.label(), value)
    }
}

/// One destination entry and the variables injected into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub target_key: String,
    pub variable_rules: Vec<VariableRule>,
}

impl TargetDescriptor {
    /// Create a descriptor with no variable rules.
    pub fn new(target_key: impl Into<String>) -> Self {
        Self {
            target_key: target_key.into(),
            variable_rules: Vec::new(),
        }
    }

    /// Append a variable rule.
    pub fn with_variable(mut self, rule: VariableRule) -> Self {
        self.variable_rules.push(rule);
        self
    }

    /// Parse a single raw target argument.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(',');
        let target_key = parts.next().unwrap_or_default().to_string();

        let variable_rules = parts
            .map(|part| {
                let mut pair = part.split('=');
                let variable_key = pair.next().unwrap_or_default().to_string();
                VariableRule {
                    variable_key,
                    replacement_label: pair.next().map(str::to_string),
                }
            })
            .collect();

        Self {
            target_key,
            variable_rules,
        }
    }

    /// Text of the target key before its last `.`, or `None` without an extension.
    pub fn prefix(&self) -> Option<&str> {
        self.target_key
            .rfind('.')
            .map(|idx| &self.target_key[..idx])
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target_key)?;
        for rule in &self.variable_rules {
            write!(f, ",{}", rule.variable_key)?;
            if let Some(label) = &rule.replacement_label {
                write!(f, "={}", label)?;
            }
        }
        Ok(())
    }
}

/// Parse raw target arguments, one descriptor per argument, order preserved.
pub fn parse_targets<S: AsRef<str>>(raw: &[S]) -> Vec<TargetDescriptor> {
    raw.iter()
        .map(|arg| TargetDescriptor::parse(arg.as_ref()))
        .collect()
}

/// Split a whitespace-joined list of raw target arguments.
pub fn split_target_list(joined: &str) -> Vec<String> {
    joined.split_whitespace().map(str::to_string).collect()
}
