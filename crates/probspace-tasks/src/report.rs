use std::fmt;

use serde::Serialize;

use crate::format::format_probability;

/// Result of one demonstration task or configured scenario.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskReport {
    pub title: String,
    pub lines: Vec<ReportLine>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportLine {
    pub label: String,
    #[serde(flatten)]
    pub value: ReportValue,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportValue {
    Probability { value: f64, display: String },
    Flag { value: bool },
    Outcomes { values: Vec<String> },
}

impl TaskReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn probability(mut self, label: impl Into<String>, value: f64) -> Self {
        self.lines.push(ReportLine {
            label: label.into(),
            value: ReportValue::Probability {
                value,
                display: format_probability(value),
            },
        });
        self
    }

    pub fn flag(mut self, label: impl Into<String>, value: bool) -> Self {
        self.lines.push(ReportLine {
            label: label.into(),
            value: ReportValue::Flag { value },
        });
        self
    }

    /// Adds an outcome listing, numbers ordered numerically before other labels.
    pub fn outcomes(mut self, label: impl Into<String>, mut values: Vec<String>) -> Self {
        values.sort_by(|a, b| display_key(a).cmp(&display_key(b)));
        self.lines.push(ReportLine {
            label: label.into(),
            value: ReportValue::Outcomes { values },
        });
        self
    }

    pub fn line(&self, label: &str) -> Option<&ReportValue> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| &line.value)
    }
}

fn display_key(value: &str) -> (u8, i64, &str) {
    match value.parse::<i64>() {
        Ok(number) => (0, number, value),
        Err(_) => (1, 0, value),
    }
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportValue::Probability { display, .. } => f.write_str(display),
            ReportValue::Flag { value } => f.write_str(if *value { "yes" } else { "no" }),
            ReportValue::Outcomes { values } => write!(f, "{{{}}}", values.join(", ")),
        }
    }
}

impl fmt::Display for TaskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.title)?;
        for line in &self.lines {
            writeln!(f, "  {} = {}", line.label, line.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportValue, TaskReport};

    fn sample() -> TaskReport {
        TaskReport::new("Die")
            .probability("P(A)", 0.5)
            .flag("A and B independent", true)
            .outcomes("A", vec!["6".to_string(), "12".to_string(), "4".to_string()])
    }

    #[test]
    fn text_rendering_lists_each_line() {
        let text = sample().to_string();
        assert_eq!(
            text,
            "Die:\n  P(A) = 1/2\n  A and B independent = yes\n  A = {4, 6, 12}\n"
        );
    }

    #[test]
    fn json_rendering_flattens_values() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["title"], "Die");
        assert_eq!(json["lines"][0]["kind"], "probability");
        assert_eq!(json["lines"][0]["display"], "1/2");
        assert_eq!(json["lines"][1]["value"], true);
        assert_eq!(json["lines"][2]["values"][0], "4");
    }

    #[test]
    fn lookup_by_label() {
        let report = sample();
        assert_eq!(
            report.line("A and B independent"),
            Some(&ReportValue::Flag { value: true })
        );
        assert!(report.line("missing").is_none());
    }
}
