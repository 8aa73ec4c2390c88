//! Translation content validation.
//!
//! Parsing already enforces the shape of a document (string leaves, nested
//! tables, nothing else). This module checks the content rules the schema
//! cannot express: text nobody wrote, tables nobody filled, and unbalanced
//! `{placeholder}` braces that would break message formatting on a page.

use crate::resource::{TranslationResource, TranslationValue};

/// Validation report containing errors and warnings about a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that would break rendering
    pub errors: Vec<String>,

    /// Suspicious content worth a look before publishing
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation resource content.
pub struct ResourceValidator;

impl ResourceValidator {
    /// Validate a namespace document.
    ///
    /// Checks that:
    /// - every leaf carries actual text (warning otherwise)
    /// - every nested table has entries (warning otherwise)
    /// - no key is blank (warning)
    /// - `{placeholder}` braces are balanced in every leaf (error otherwise)
    ///
    /// # Arguments
    /// * `resource` - The parsed namespace document
    ///
    /// # Returns
    /// A `ValidationReport` containing any errors or warnings found.
    pub fn validate(resource: &TranslationResource) -> ValidationReport {
        let mut report = ValidationReport::new();

        if resource.is_empty() {
            report.warnings.push("document has no entries".to_string());
            return report;
        }

        Self::walk(resource, "", &mut report);
        report
    }

    fn walk(resource: &TranslationResource, prefix: &str, report: &mut ValidationReport) {
        for (key, value) in resource.iter() {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };

            if key.trim().is_empty() {
                report
                    .warnings
                    .push(format!("blank key under '{}'", prefix));
            }

            match value {
                TranslationValue::Text(text) => {
                    if text.trim().is_empty() {
                        report.warnings.push(format!("'{}' has no text", path));
                    }
                    if !has_balanced_placeholders(text) {
                        report
                            .errors
                            .push(format!("'{}' has unbalanced placeholder braces", path));
                    }
                }
                TranslationValue::Nested(nested) => {
                    if nested.is_empty() {
                        report.warnings.push(format!("'{}' is an empty table", path));
                    } else {
                        Self::walk(nested, &path, report);
                    }
                }
            }
        }
    }
}

/// True when every `{` in the text is matched by a later `}`.
fn has_balanced_placeholders(text: &str) -> bool {
    let mut depth: u32 = 0;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
