//! # Pod Manifest Validation
//!
//! Recursive descent over a parsed manifest. Every schema level is a static
//! table of `FieldRule`s; `PodValidator::walk_mapping` applies a table
//! to one mapping node.
//!
//! ## Walk order
//!
//! 1. A node that is not a mapping reports `<field> must be mapping` and
//!    its subtree is skipped. Siblings are still checked.
//! 2. Present fields are dispatched in the order the author wrote them.
//!    Unknown fields are ignored.
//! 3. The table is then walked in declared order: deferred fields are
//!    checked if present, and absent required fields report
//!    `<field> is required` on line 0.
//!
//! Containers defer `name`, `image` and `resources`, so their findings
//! always follow those of `ports` and the health checks of the same
//! container.
//! Resource requirement sets (`requests`, `limits`) are the one closed
//! level: keys other than `cpu` and `memory` are reported.
//!
//! ## Messages
//!
//! Message templates are reproduced verbatim by tooling that consumes the
//! output. Keep them stable.

use std::collections::HashSet;

use podcheck_core::{ErrorCollector, Node, ValidationError};

use crate::fields::Fields;
use crate::format::{self, API_VERSIONS, KINDS, OPERATING_SYSTEMS, PROTOCOLS};
use crate::profile::{CpuPolicy, ValidationProfile};

/// Check applied to the value of a recognized field. Receives the field
/// name so shared checks can word their messages.
type Check = fn(&mut PodValidator, &str, &Node);

/// One recognized field of a schema level.
#[derive(Clone, Copy)]
struct FieldRule {
    name: &'static str,
    required: bool,
    /// Check after the scan of the mapping instead of when encountered.
    deferred: bool,
    check: Check,
}

const DOCUMENT: &[FieldRule] = &[
    FieldRule { name: "apiVersion", required: true, deferred: false, check: PodValidator::check_api_version },
    FieldRule { name: "kind", required: true, deferred: false, check: PodValidator::check_kind },
    FieldRule { name: "metadata", required: true, deferred: false, check: PodValidator::check_metadata },
    FieldRule { name: "spec", required: true, deferred: false, check: PodValidator::check_spec },
];

const METADATA: &[FieldRule] = &[
    FieldRule { name: "name", required: true, deferred: false, check: PodValidator::check_non_empty },
    FieldRule { name: "namespace", required: false, deferred: false, check: PodValidator::check_string },
    FieldRule { name: "labels", required: false, deferred: false, check: PodValidator::check_labels },
];

const SPEC: &[FieldRule] = &[
    FieldRule { name: "os", required: false, deferred: false, check: PodValidator::check_os },
    FieldRule { name: "containers", required: true, deferred: false, check: PodValidator::check_containers },
];

// name, image and resources are checked after ports and health checks, in this order.
const CONTAINER: &[FieldRule] = &[
    FieldRule { name: "name", required: true, deferred: true, check: PodValidator::check_container_name },
    FieldRule { name: "image", required: true, deferred: true, check: PodValidator::check_image },
    FieldRule { name: "resources", required: true, deferred: true, check: PodValidator::check_resources },
    FieldRule { name: "ports", required: false, deferred: false, check: PodValidator::check_ports },
    FieldRule { name: "readinessProbe", required: false, deferred: false, check: PodValidator::check_health_check },
    FieldRule { name: "livenessProbe", required: false, deferred: false, check: PodValidator::check_health_check },
];

const RESOURCES: &[FieldRule] = &[
    FieldRule { name: "requests", required: false, deferred: false, check: PodValidator::check_requirement_set },
    FieldRule { name: "limits", required: false, deferred: false, check: PodValidator::check_requirement_set },
];

const PORT: &[FieldRule] = &[
    FieldRule { name: "containerPort", required: true, deferred: false, check: PodValidator::check_port_number },
    FieldRule { name: "protocol", required: false, deferred: false, check: PodValidator::check_protocol },
];

const HEALTH_CHECK: &[FieldRule] = &[
    FieldRule { name: "httpGet", required: true, deferred: false, check: PodValidator::check_http_get },
];

const HTTP_GET: &[FieldRule] = &[
    FieldRule { name: "path", required: true, deferred: false, check: PodValidator::check_path },
    FieldRule { name: "port", required: true, deferred: false, check: PodValidator::check_port_number },
];

/// One validation session: owns the diagnostics for a single file.
///
/// A session is not reusable across files; build a new one per run so no
/// container names or diagnostics leak between documents.
#[derive(Debug)]
pub struct PodValidator {
    collector: ErrorCollector,
    profile: ValidationProfile,
    container_names: HashSet<String>,
}

impl PodValidator {
    /// Start a session for `file` (the identifier stamped on diagnostics).
    pub fn new(file: impl Into<String>, profile: ValidationProfile) -> Self {
        Self {
            collector: ErrorCollector::new(file),
            profile,
            container_names: HashSet::new(),
        }
    }

    /// Validate the documents parsed from the session's file.
    ///
    /// The stream must hold exactly one document whose root is a mapping;
    /// anything else reports `root must be mapping` and nothing further.
    pub fn validate(&mut self, documents: &[Node]) {
        tracing::debug!(
            file = self.collector.file(),
            documents = documents.len(),
            "validating pod manifest"
        );
        match documents {
            [root] if root.is_mapping() => {
                self.walk_mapping("root", root, DOCUMENT);
            }
            [root] => self.report(root.line, "root must be mapping"),
            _ => self.report(0, "root must be mapping"),
        }
        tracing::debug!(
            file = self.collector.file(),
            errors = self.collector.len(),
            "validation finished"
        );
    }

    /// Diagnostics collected so far, in report order.
    pub fn errors(&self) -> &[ValidationError] {
        self.collector.errors()
    }

    /// End the session and hand over its diagnostics.
    pub fn finish(self) -> ErrorCollector {
        self.collector
    }

    fn report(&mut self, line: usize, message: impl Into<String>) {
        self.collector.report(line, message);
    }

    fn walk_mapping(&mut self, field: &str, node: &Node, rules: &[FieldRule]) {
        if !node.is_mapping() {
            tracing::trace!(field, found = node.kind_name(), "expected mapping");
            self.report(node.line, format!("{field} must be mapping"));
            return;
        }
        let fields = Fields::of(node);
        tracing::trace!(field, entries = fields.len(), "walking mapping");

        for entry in fields.iter() {
            if let Some(rule) = rules.iter().find(|r| r.name == entry.key) {
                if !rule.deferred {
                    (rule.check)(self, entry.key, entry.value);
                }
            }
        }

        for rule in rules {
            match fields.get(rule.name) {
                Some(value) if rule.deferred => (rule.check)(self, rule.name, value),
                None if rule.required => self.report(0, format!("{} is required", rule.name)),
                _ => {}
            }
        }
    }

    fn expect_scalar<'n>(&mut self, field: &str, node: &'n Node) -> Option<&'n str> {
        let text = node.as_scalar();
        if text.is_none() {
            tracing::trace!(field, found = node.kind_name(), "expected scalar");
            self.report(node.line, format!("{field} must be string"));
        }
        text
    }

    fn expect_int(&mut self, field: &str, node: &Node) -> Option<i64> {
        let value = node.as_scalar().and_then(format::parse_int);
        if value.is_none() {
            self.report(node.line, format!("{field} must be int"));
        }
        value
    }

    fn check_enum(&mut self, field: &str, node: &Node, allowed: &[&str]) {
        if let Some(value) = self.expect_scalar(field, node) {
            if !format::is_one_of(value, allowed) {
                self.report(
                    node.line,
                    format!("{field} has unsupported value '{value}'"),
                );
            }
        }
    }

    fn check_api_version(&mut self, field: &str, node: &Node) {
        self.check_enum(field, node, API_VERSIONS);
    }

    fn check_kind(&mut self, field: &str, node: &Node) {
        self.check_enum(field, node, KINDS);
    }

    fn check_metadata(&mut self, field: &str, node: &Node) {
        self.walk_mapping(field, node, METADATA);
    }

    fn check_string(&mut self, field: &str, node: &Node) {
        self.expect_scalar(field, node);
    }

    fn check_non_empty(&mut self, field: &str, node: &Node) {
        if let Some(value) = self.expect_scalar(field, node) {
            if value.is_empty() {
                self.report(node.line, format!("{field} is required"));
            }
        }
    }

    fn check_labels(&mut self, field: &str, node: &Node) {
        if !node.is_mapping() {
            self.report(node.line, format!("{field} must be mapping"));
            return;
        }
        for label in Fields::of(node).iter() {
            if !label.value.is_scalar() {
                self.report(label.value.line, "label key/value must be string");
            }
        }
    }

    fn check_spec(&mut self, field: &str, node: &Node) {
        self.walk_mapping(field, node, SPEC);
    }

    fn check_os(&mut self, field: &str, node: &Node) {
        self.check_enum(field, node, OPERATING_SYSTEMS);
    }

    fn check_containers(&mut self, field: &str, node: &Node) {
        let Some(containers) = node.as_sequence() else {
            self.report(node.line, format!("{field} must be sequence"));
            return;
        };
        self.container_names.clear();
        for container in containers {
            tracing::trace!(line = container.line, "validating container");
            self.walk_mapping("container", container, CONTAINER);
        }
    }

    fn check_container_name(&mut self, field: &str, node: &Node) {
        let Some(name) = self.expect_scalar(field, node) else {
            return;
        };
        if name.is_empty() {
            self.report(node.line, format!("{field} is required"));
            return;
        }
        if !format::is_identifier(name) {
            self.report(
                node.line,
                format!("container name has invalid format '{name}'"),
            );
        }
        if !self.container_names.insert(name.to_string()) {
            self.report(
                node.line,
                format!("container name '{name}' is not unique"),
            );
        }
    }

    fn check_image(&mut self, field: &str, node: &Node) {
        if let Some(image) = self.expect_scalar(field, node) {
            if !format::is_image_reference(image) {
                self.report(node.line, format!("{field} has invalid format '{image}'"));
            }
        }
    }

    fn check_resources(&mut self, field: &str, node: &Node) {
        self.walk_mapping(field, node, RESOURCES);
    }

    /// `requests` or `limits`. The key set is closed, unlike every other
    /// level.
    fn check_requirement_set(&mut self, prefix: &str, node: &Node) {
        if !node.is_mapping() {
            self.report(node.line, format!("{prefix} must be mapping"));
            return;
        }
        for resource in Fields::of(node).iter() {
            match resource.key {
                "cpu" => self.check_cpu(resource.key, resource.value),
                "memory" => self.check_memory(prefix, resource.value),
                other => self.report(
                    resource.key_line,
                    format!("{prefix} has unsupported resource type '{other}'"),
                ),
            }
        }
    }

    fn check_cpu(&mut self, field: &str, node: &Node) {
        let Some(cpu) = self.expect_int(field, node) else {
            return;
        };
        if self.profile.cpu == CpuPolicy::Positive && cpu <= 0 {
            self.report(node.line, format!("{field} value out of range"));
        }
    }

    fn check_memory(&mut self, prefix: &str, node: &Node) {
        if let Some(memory) = self.expect_scalar("memory", node) {
            if !format::is_memory_quantity(memory) {
                self.report(
                    node.line,
                    format!("{prefix}.memory has invalid format '{memory}'"),
                );
            }
        }
    }

    fn check_ports(&mut self, field: &str, node: &Node) {
        let Some(ports) = node.as_sequence() else {
            self.report(node.line, format!("{field} must be sequence"));
            return;
        };
        for port in ports {
            self.walk_mapping("port", port, PORT);
        }
    }

    fn check_port_number(&mut self, field: &str, node: &Node) {
        if let Some(port) = self.expect_int(field, node) {
            if !format::is_port_in_range(port) {
                self.report(node.line, format!("{field} value out of range"));
            }
        }
    }

    fn check_protocol(&mut self, field: &str, node: &Node) {
        self.check_enum(field, node, PROTOCOLS);
    }

    fn check_health_check(&mut self, field: &str, node: &Node) {
        self.walk_mapping(field, node, HEALTH_CHECK);
    }

    fn check_http_get(&mut self, field: &str, node: &Node) {
        self.walk_mapping(field, node, HTTP_GET);
    }

    fn check_path(&mut self, field: &str, node: &Node) {
        if let Some(path) = self.expect_scalar(field, node) {
            if !format::is_absolute_path(path) {
                self.report(node.line, format!("{field} must be absolute path"));
            }
        }
    }
}

/// Validate the documents of one file in a fresh session.
pub fn validate_pod(file: &str, documents: &[Node], profile: ValidationProfile) -> ErrorCollector {
    let mut validator = PodValidator::new(file, profile);
    validator.validate(documents);
    validator.finish()
}
