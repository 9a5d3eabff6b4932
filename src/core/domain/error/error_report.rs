//! Aggregation of non-fatal, field-level failures.

use super::ValidationError;
use std::fmt;
use thiserror::Error;

/// A single field assignment that was rejected while building a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to set '{field}': {source}")]
pub struct FieldMappingError {
    field: String,
    #[source]
    source: ValidationError,
}

impl FieldMappingError {
    pub fn new(field: impl Into<String>, source: ValidationError) -> Self {
        Self {
            field: field.into(),
            source,
        }
    }

    /// Name of the attribute whose assignment failed.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The validation failure reported for the assignment.
    #[must_use]
    pub fn cause(&self) -> &ValidationError {
        &self.source
    }
}

/// Ordered collection of every field-level failure from one projection.
///
/// Entries keep the order in which the assignments were attempted. An empty
/// report means every field was set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    entries: Vec<FieldMappingError>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldMappingError) {
        self.entries.push(error);
    }

    /// Records the outcome of assigning `field`, keeping the failure if any.
    ///
    /// Returns `true` when the assignment succeeded.
    pub fn record(&mut self, field: &str, outcome: Result<(), ValidationError>) -> bool {
        match outcome {
            Ok(()) => true,
            Err(source) => {
                self.push(FieldMappingError::new(field, source));
                false
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldMappingError> {
        self.entries.iter()
    }

    /// Converts the report into a `Result`, failing when it holds any entry.
    pub fn into_result(self) -> Result<(), ErrorReport> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entries.len() {
            0 => write!(f, "no field errors"),
            1 => write!(f, "{}", self.entries[0]),
            n => {
                write!(f, "{n} field errors:")?;
                for entry in &self.entries {
                    write!(f, "\n  - {entry}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ErrorReport {}

impl Extend<FieldMappingError> for ErrorReport {
    fn extend<I: IntoIterator<Item = FieldMappingError>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for ErrorReport {
    type Item = FieldMappingError;
    type IntoIter = std::vec::IntoIter<FieldMappingError>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorReport {
    type Item = &'a FieldMappingError;
    type IntoIter = std::slice::Iter<'a, FieldMappingError>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(msg: &str) -> ValidationError {
        ValidationError::ConstraintViolation(msg.to_string())
    }

    #[test]
    fn test_record_keeps_only_failures() {
        let mut report = ErrorReport::new();
        assert!(report.record("domain", Ok(())));
        assert!(!report.record("servers", Err(violation("too many"))));

        assert_eq!(report.len(), 1);
        let entry = report.iter().next().unwrap();
        assert_eq!(entry.field(), "servers");
        assert_eq!(entry.cause(), &violation("too many"));
    }

    #[test]
    fn test_entries_keep_attempt_order() {
        let mut report = ErrorReport::new();
        report.record("domain", Err(violation("first")));
        report.record("servers", Err(violation("second")));

        let fields: Vec<_> = report.iter().map(FieldMappingError::field).collect();
        assert_eq!(fields, ["domain", "servers"]);
    }

    #[test]
    fn test_display_lists_every_entry() {
        let mut report = ErrorReport::new();
        assert_eq!(report.to_string(), "no field errors");

        report.record("domain", Err(violation("first")));
        assert_eq!(
            report.to_string(),
            "Failed to set 'domain': Domain constraint violation: first"
        );

        report.record("servers", Err(violation("second")));
        let text = report.to_string();
        assert!(text.starts_with("2 field errors:"));
        assert!(text.contains("'domain'"));
        assert!(text.contains("'servers'"));
    }

    #[test]
    fn test_into_result() {
        assert!(ErrorReport::new().into_result().is_ok());

        let mut report = ErrorReport::new();
        report.record("domain", Err(violation("x")));
        let err = report.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
    }
}
