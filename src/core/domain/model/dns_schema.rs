//! Declarative schema of the projected DNS record.
//!
//! The schema names the attributes the host tooling exposes and checks every
//! value assigned to them. A rejected assignment is reported, never thrown.

use crate::core::domain::error::ValidationError;

/// Attribute holding the DNS search domain.
pub const DOMAIN: &str = "domain";
/// Attribute holding the queried node name.
pub const NODE_NAME: &str = "node_name";
/// Attribute holding the ordered nameserver list.
pub const SERVERS: &str = "servers";

/// Maximum number of nameservers a Proxmox node can carry.
pub const MAX_SERVERS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    String,
    StringList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMode {
    /// Supplied by the caller.
    Required,
    /// Filled in from the remote state.
    Computed,
}

/// A single named attribute of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: AttributeKind,
    pub mode: AttributeMode,
}

/// A value about to be assigned to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    String(&'a str),
    StringList(&'a [String]),
}

impl FieldValue<'_> {
    pub fn kind(&self) -> AttributeKind {
        match self {
            FieldValue::String(_) => AttributeKind::String,
            FieldValue::StringList(_) => AttributeKind::StringList,
        }
    }
}

/// Checks a single attribute assignment.
pub trait FieldValidator: Send + Sync {
    /// # Errors
    /// Returns the `ValidationError` that rejects assigning `value` to `attribute`.
    fn validate(&self, attribute: &str, value: FieldValue<'_>) -> Result<(), ValidationError>;
}

/// The schema of the node DNS data source.
#[derive(Debug, Clone)]
pub struct DnsSchema {
    attributes: [Attribute; 3],
    max_servers: usize,
}

impl DnsSchema {
    pub fn new() -> Self {
        Self {
            attributes: [
                Attribute {
                    name: DOMAIN,
                    description: "The DNS search domain",
                    kind: AttributeKind::String,
                    mode: AttributeMode::Computed,
                },
                Attribute {
                    name: NODE_NAME,
                    description: "The node name",
                    kind: AttributeKind::String,
                    mode: AttributeMode::Required,
                },
                Attribute {
                    name: SERVERS,
                    description: "The DNS servers",
                    kind: AttributeKind::StringList,
                    mode: AttributeMode::Computed,
                },
            ],
            max_servers: MAX_SERVERS,
        }
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

impl Default for DnsSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldValidator for DnsSchema {
    fn validate(&self, attribute: &str, value: FieldValue<'_>) -> Result<(), ValidationError> {
        let Some(declared) = self.attribute(attribute) else {
            return Err(ValidationError::Field {
                field: attribute.to_string(),
                message: "Attribute is not declared in the schema".to_string(),
            });
        };

        if declared.kind != value.kind() {
            return Err(ValidationError::Format(format!(
                "Attribute '{}' expects {:?}, got {:?}",
                attribute,
                declared.kind,
                value.kind()
            )));
        }

        if let FieldValue::StringList(items) = value {
            if items.len() > self.max_servers {
                return Err(ValidationError::ConstraintViolation(format!(
                    "Attribute '{}' holds at most {} entries (got {})",
                    attribute,
                    self.max_servers,
                    items.len()
                )));
            }
        }

        Ok(())
    }
}
