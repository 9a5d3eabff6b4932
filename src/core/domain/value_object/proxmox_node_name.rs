use crate::core::domain::error::ValidationError;
use std::fmt;

const MAX_NODE_NAME_LENGTH: usize = 63;

/// The name of a node in a Proxmox VE cluster (e.g. `pve1`).
///
/// Node names are single host name labels, so a validated name is always
/// safe to embed in an API path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName(String);

impl NodeName {
    /// Creates a validated node name.
    ///
    /// # Errors
    /// Returns a `ValidationError` if the name is empty, too long, or is not a
    /// valid host name label.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_node_name(&name)?;
        Ok(Self(name))
    }

    /// Returns the node name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for NodeName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

pub(crate) fn validate_node_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Field {
            field: "node_name".to_string(),
            message: "Node name cannot be empty".to_string(),
        });
    }
    if name.len() > MAX_NODE_NAME_LENGTH {
        return Err(ValidationError::Format(format!(
            "Node name cannot exceed {} characters",
            MAX_NODE_NAME_LENGTH
        )));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::Format(
            "Node name can only contain alphanumeric characters and hyphens".to_string(),
        ));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(ValidationError::Format(
            "Node name cannot start or end with hyphen".to_string(),
        ));
    }
    Ok(())
}
