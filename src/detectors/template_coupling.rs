use crate::core::codec;
use crate::core::metrics::{SmellMetrics, SAMPLE_LIMIT};
use crate::core::syntax::{Attribute, SyntaxKind, SyntaxNode};
use crate::core::{Finding, Severity, SmellKind, SourcePosition};
use crate::severity;
use regex::Regex;
use std::path::Path;

/// Event-binding attributes whose expressions execute controller code.
const HIGH_RISK_ATTRS: &[&str] = &["ng-click", "ng-change", "ng-submit", "ng-mouseover"];

/// Measures how hard a template leans on controller internals: `{{ }}`
/// interpolations in text, property paths inside high-risk event
/// attributes, and method calls in either. A method call wired into an
/// event attribute escalates to CRITICAL since the binding executes
/// controller code directly.
pub struct TemplateCouplingDetector {
    binding_count: usize,
    attribute_refs: usize,
    method_names: Vec<String>,
    positions: Vec<SourcePosition>,
    attr_method: bool,
    interpolation: Regex,
    method_call: Regex,
    property_path: Regex,
}

impl Default for TemplateCouplingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCouplingDetector {
    pub fn new() -> Self {
        Self {
            binding_count: 0,
            attribute_refs: 0,
            method_names: Vec::new(),
            positions: Vec::new(),
            attr_method: false,
            interpolation: Regex::new(r"(?s)\{\{(.*?)\}\}").unwrap(),
            method_call: Regex::new(r"\b(\w+)\s*\(").unwrap(),
            property_path: Regex::new(r"\b\w+\.\w+").unwrap(),
        }
    }

    pub fn visit(&mut self, node: &SyntaxNode) {
        match &node.kind {
            SyntaxKind::Text { content } => self.scan_text(content, node.position),
            SyntaxKind::Element { attributes, .. } => {
                for attr in attributes {
                    if HIGH_RISK_ATTRS.contains(&attr.name.as_str()) {
                        self.scan_attribute(attr);
                    }
                }
            }
            _ => {}
        }
    }

    fn scan_text(&mut self, content: &str, base: SourcePosition) {
        // Collected first so `scan_methods` can borrow self mutably.
        let bindings: Vec<(usize, String, usize)> = self
            .interpolation
            .captures_iter(content)
            .map(|caps| {
                let whole = caps.get(0).unwrap();
                let inner = caps.get(1).unwrap();
                (whole.start(), inner.as_str().to_string(), inner.start())
            })
            .collect();

        for (start, expr, expr_start) in bindings {
            self.binding_count += 1;
            self.positions.push(offset_position(base, content, start));
            self.scan_methods(&expr, offset_position(base, content, expr_start));
        }
    }

    fn scan_attribute(&mut self, attr: &Attribute) {
        let methods: Vec<(String, usize)> = self
            .method_call
            .captures_iter(&attr.value)
            .map(|caps| {
                let name = caps.get(1).unwrap();
                (name.as_str().to_string(), name.start())
            })
            .collect();
        for (name, start) in methods {
            self.attr_method = true;
            self.record_method(&name, offset_position(attr.position, &attr.value, start));
        }

        let refs: Vec<usize> = self
            .property_path
            .find_iter(&attr.value)
            .filter(|m| !attr.value[m.end()..].trim_start().starts_with('('))
            .map(|m| m.start())
            .collect();
        for start in refs {
            self.attribute_refs += 1;
            self.positions
                .push(offset_position(attr.position, &attr.value, start));
        }
    }

    fn scan_methods(&mut self, expr: &str, base: SourcePosition) {
        let methods: Vec<(String, usize)> = self
            .method_call
            .captures_iter(expr)
            .map(|caps| {
                let name = caps.get(1).unwrap();
                (name.as_str().to_string(), name.start())
            })
            .collect();
        for (name, start) in methods {
            self.record_method(&name, offset_position(base, expr, start));
        }
    }

    // Methods count once per distinct name, however often they repeat.
    fn record_method(&mut self, name: &str, position: SourcePosition) {
        if self.method_names.iter().any(|n| n == name) {
            return;
        }
        self.method_names.push(name.to_string());
        self.positions.push(position);
    }

    pub fn finalize(self, path: &Path) -> Option<Finding> {
        let anchor = *self.positions.first()?;
        let total = self.binding_count + self.attribute_refs + self.method_names.len();
        let escalation = self.attr_method.then_some(Severity::Critical);
        let severity = severity::escalate(
            severity::classify(SmellKind::TemplateBindingCoupling, total),
            escalation,
        )?;

        let samples: Vec<String> = self
            .method_names
            .iter()
            .take(SAMPLE_LIMIT)
            .cloned()
            .collect();

        let detail = format!(
            "Template binds controller internals {} times ({} interpolations, {} attribute refs, {} methods)",
            total,
            self.binding_count,
            self.attribute_refs,
            self.method_names.len()
        );
        let metrics = SmellMetrics::TemplateBindingCoupling {
            severity,
            total_occurrences: total,
            binding_count: self.binding_count,
            attribute_refs: self.attribute_refs,
            method_references: self.method_names.len(),
            samples,
            locations: self.positions,
        };

        Some(Finding {
            file: path.to_path_buf(),
            smell: SmellKind::TemplateBindingCoupling,
            message: codec::encode(&metrics, &detail),
            position: anchor,
        })
    }
}

/// Translate a byte offset inside node text into a file position.
fn offset_position(base: SourcePosition, text: &str, index: usize) -> SourcePosition {
    let prefix = &text[..index];
    let newlines = prefix.matches('\n').count();
    if newlines == 0 {
        SourcePosition::new(base.line, base.column + prefix.len())
    } else {
        let after_last = prefix.rsplit('\n').next().unwrap_or("");
        SourcePosition::new(base.line + newlines, after_last.len())
    }
}
