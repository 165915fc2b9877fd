//! Console output formatter for iteration records

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use enkf_iter_application::{IterSettingsSnapshot, IterationPlan};
use enkf_iter_domain::{ConfigIssue, FieldValue, IterField, OutputFormat, Severity};
use serde_json::{Value, json};

const UNSET: &str = "<unset>";

/// Formats command results as aligned text or JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter {
    format: OutputFormat,
}

impl ConsoleFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        format!("{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn key_width(fields: impl Iterator<Item = IterField>) -> usize {
        fields.map(|f| f.key().len()).max().unwrap_or(0)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_snapshot(&self, snapshot: &IterSettingsSnapshot) -> String {
        if self.is_json() {
            return Self::to_json(snapshot);
        }

        let entries = snapshot.entries();
        let width = Self::key_width(entries.iter().map(|(f, _)| *f));

        let mut output = Self::header("Analysis iteration settings");
        for (field, value) in &entries {
            let value = match value {
                Some(v) => v.to_string().normal(),
                None => UNSET.dimmed(),
            };
            output.push_str(&format!(
                "  {:<width$}  {}  {}\n",
                field.key(),
                value,
                format!("({})", field.keyword()).dimmed(),
                width = width
            ));
        }
        output
    }

    fn format_value(&self, field: IterField, value: Option<&FieldValue>) -> String {
        if self.is_json() {
            let mut map = serde_json::Map::new();
            map.insert(
                field.key().to_string(),
                value.map(|v| json!(v)).unwrap_or(Value::Null),
            );
            return Self::to_json(&Value::Object(map));
        }

        match value {
            Some(v) => v.to_string(),
            None => UNSET.to_string(),
        }
    }

    fn format_keys(&self, fields: &[IterField]) -> String {
        if self.is_json() {
            let keys: Vec<Value> = fields
                .iter()
                .map(|f| {
                    json!({
                        "key": f.key(),
                        "keyword": f.keyword(),
                        "kind": f.kind().as_str(),
                    })
                })
                .collect();
            return Self::to_json(&keys);
        }

        let width = Self::key_width(fields.iter().copied());
        fields
            .iter()
            .map(|f| {
                format!(
                    "{:<width$}  {:<7}  {}",
                    f.key(),
                    f.kind().as_str(),
                    f.keyword().dimmed(),
                    width = width
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_plan(&self, plan: &[IterationPlan]) -> String {
        if self.is_json() {
            return Self::to_json(plan);
        }

        if plan.is_empty() {
            return format!("{}\n", "No iterations configured".yellow());
        }

        let case_width = plan
            .iter()
            .map(|p| p.case.len())
            .max()
            .unwrap_or(0)
            .max("case".len());

        let mut output = Self::header("Iteration plan");
        output.push_str(&format!(
            "  {:>4}  {:<case_width$}  {}\n",
            "iter".bold(),
            "case".bold(),
            "runpath".bold(),
            case_width = case_width
        ));
        for entry in plan {
            output.push_str(&format!(
                "  {:>4}  {:<case_width$}  {}\n",
                entry.iteration,
                entry.case,
                entry.runpath,
                case_width = case_width
            ));
        }
        output
    }

    fn format_issues(&self, issues: &[ConfigIssue]) -> String {
        if self.is_json() {
            let list: Vec<Value> = issues
                .iter()
                .map(|i| json!({ "severity": i.severity, "message": i.message }))
                .collect();
            return Self::to_json(&list);
        }

        if issues.is_empty() {
            return format!("{}\n", "Configuration OK".green());
        }

        let mut output = String::new();
        for issue in issues {
            let label = match issue.severity {
                Severity::Error => issue.severity.as_str().red().bold(),
                Severity::Warning => issue.severity.as_str().yellow().bold(),
            };
            output.push_str(&format!("{}: {}\n", label, issue.message));
        }
        output
    }
}
