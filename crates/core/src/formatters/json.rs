use crate::report::AuditReport;
use crate::{Result, SitelexError};
use serde::Serialize;

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    rendered.map_err(|e| SitelexError::RenderError(e.to_string()))
}

/// Convert a full audit report to JSON
pub fn convert_to_json(report: &AuditReport, config: &JsonConfig) -> Result<String> {
    to_json(report, config.pretty)
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, report: &AuditReport) -> Result<String> {
        convert_to_json(report, &self.config)
    }
}
