use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root scenario file loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScenarioFile {
    pub run_id: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub scenarios: Vec<ScenarioConfig>,
}

impl ScenarioFile {
    /// Load a scenario file from disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: ScenarioFile =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.logging.normalize();

        if self.scenarios.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "scenarios".to_string(),
                message: "at least one scenario must be specified".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            scenario.validate()?;
            if !seen.insert(scenario.name.as_str()) {
                return Err(ValidationError::InvalidField {
                    field: "scenarios".to_string(),
                    message: format!("scenario name '{}' defined more than once", scenario.name),
                });
            }
        }
        Ok(())
    }

    /// Structured log path with `{run_id}` placeholders substituted.
    pub fn resolved_log_path(&self) -> Option<PathBuf> {
        self.logging
            .json_file
            .as_deref()
            .map(|template| resolve_template(&self.run_id, template))
    }
}

/// One sample space with its named events and the queries to evaluate.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    pub outcomes: OutcomeSpec,
    #[serde(default)]
    pub events: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub queries: Vec<QueryConfig>,
}

impl ScenarioConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "scenarios.name".to_string(),
                message: "scenario name must not be empty".to_string(),
            });
        }

        let field = |suffix: &str| format!("scenarios[{}].{suffix}", self.name);
        self.outcomes.validate(&field("outcomes"))?;

        for (index, query) in self.queries.iter().enumerate() {
            let query_field = field(&format!("queries[{index}]"));
            let names = query.event_names();
            match query.arity() {
                Arity::One | Arity::Two if names.len() != query.arity().expected() => {
                    return Err(ValidationError::InvalidField {
                        field: query_field,
                        message: format!(
                            "'{}' expects exactly {} event(s), got {}",
                            query.kind(),
                            query.arity().expected(),
                            names.len()
                        ),
                    });
                }
                Arity::AtLeastOne if names.is_empty() => {
                    return Err(ValidationError::InvalidField {
                        field: query_field,
                        message: format!("'{}' expects at least one event", query.kind()),
                    });
                }
                _ => {}
            }
            if let Some(unknown) = names.iter().find(|name| !self.events.contains_key(**name)) {
                return Err(ValidationError::InvalidField {
                    field: query_field,
                    message: format!("event '{unknown}' is not defined"),
                });
            }
        }
        Ok(())
    }
}

/// Either an explicit outcome list or an inclusive integer range.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OutcomeSpec {
    #[serde(default)]
    pub list: Option<Vec<String>>,
    #[serde(default)]
    pub range: Option<RangeSpec>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct RangeSpec {
    pub start: i64,
    pub end: i64,
}

impl OutcomeSpec {
    /// Outcome labels in declaration order.
    pub fn labels(&self) -> Vec<String> {
        match (&self.list, &self.range) {
            (Some(list), _) => list.clone(),
            (None, Some(range)) => (range.start..=range.end).map(|n| n.to_string()).collect(),
            (None, None) => Vec::new(),
        }
    }

    fn validate(&self, field: &str) -> Result<(), ValidationError> {
        match (&self.list, &self.range) {
            (Some(_), Some(_)) | (None, None) => Err(ValidationError::InvalidField {
                field: field.to_string(),
                message: "exactly one of 'list' or 'range' must be given".to_string(),
            }),
            (Some(list), None) if list.is_empty() => Err(ValidationError::InvalidField {
                field: format!("{field}.list"),
                message: "outcome list must not be empty".to_string(),
            }),
            (None, Some(range)) if range.start > range.end => Err(ValidationError::InvalidField {
                field: format!("{field}.range"),
                message: format!("start {} is greater than end {}", range.start, range.end),
            }),
            _ => Ok(()),
        }
    }
}

/// A question asked about the named events of a scenario.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryConfig {
    Probability { event: String },
    Complement { event: String },
    Intersection { events: Vec<String> },
    Union { events: Vec<String> },
    Difference { event: String, minus: String },
    Conditional { event: String, given: String },
    Independent { events: Vec<String> },
    MutuallyIndependent { events: Vec<String> },
    MutuallyExclusive { events: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    One,
    Two,
    AtLeastOne,
}

impl Arity {
    fn expected(self) -> usize {
        match self {
            Arity::One | Arity::AtLeastOne => 1,
            Arity::Two => 2,
        }
    }
}

impl QueryConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryConfig::Probability { .. } => "probability",
            QueryConfig::Complement { .. } => "complement",
            QueryConfig::Intersection { .. } => "intersection",
            QueryConfig::Union { .. } => "union",
            QueryConfig::Difference { .. } => "difference",
            QueryConfig::Conditional { .. } => "conditional",
            QueryConfig::Independent { .. } => "independent",
            QueryConfig::MutuallyIndependent { .. } => "mutually_independent",
            QueryConfig::MutuallyExclusive { .. } => "mutually_exclusive",
        }
    }

    /// Every event name the query refers to.
    pub fn event_names(&self) -> Vec<&str> {
        match self {
            QueryConfig::Probability { event } | QueryConfig::Complement { event } => {
                vec![event.as_str()]
            }
            QueryConfig::Difference { event, minus } => vec![event.as_str(), minus.as_str()],
            QueryConfig::Conditional { event, given } => vec![event.as_str(), given.as_str()],
            QueryConfig::Intersection { events }
            | QueryConfig::Union { events }
            | QueryConfig::Independent { events }
            | QueryConfig::MutuallyIndependent { events }
            | QueryConfig::MutuallyExclusive { events } => {
                events.iter().map(String::as_str).collect()
            }
        }
    }

    fn arity(&self) -> Arity {
        match self {
            QueryConfig::Probability { .. } | QueryConfig::Complement { .. } => Arity::One,
            QueryConfig::Difference { .. }
            | QueryConfig::Conditional { .. }
            | QueryConfig::Independent { .. }
            | QueryConfig::MutuallyExclusive { .. } => Arity::Two,
            QueryConfig::Intersection { .. }
            | QueryConfig::Union { .. }
            | QueryConfig::MutuallyIndependent { .. } => Arity::AtLeastOne,
        }
    }
}

/// Logging configuration; defaults to `info` on stderr.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub json_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            json_file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self
            .json_file
            .as_deref()
            .is_some_and(|path| path.trim().is_empty())
        {
            self.json_file = None;
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Errors surfaced when loading scenario files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "die_demo"
logging:
  tracing_level: "debug"
  json_file: "out/{run_id}/log.jsonl"
scenarios:
  - name: "die"
    outcomes:
      range: { start: 1, end: 6 }
    events:
      even: ["2", "4", "6"]
      three_six: ["3", "6"]
    queries:
      - { kind: probability, event: even }
      - { kind: intersection, events: [even, three_six] }
      - { kind: independent, events: [even, three_six] }
      - { kind: conditional, event: even, given: three_six }
  - name: "coins"
    outcomes:
      list: ["HH", "HT", "TH", "TT"]
    events:
      a: ["HH", "HT"]
    queries:
      - { kind: complement, event: a }
"#;

    fn parse(yaml: &str) -> ScenarioFile {
        serde_yaml::from_str(yaml).expect("parse yaml")
    }

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg = parse(BASIC_YAML);
        cfg.validate().expect("validate");

        assert_eq!(cfg.scenarios.len(), 2);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(
            cfg.scenarios[0].outcomes.labels(),
            vec!["1", "2", "3", "4", "5", "6"]
        );
        assert_eq!(
            cfg.scenarios[0].queries[3],
            QueryConfig::Conditional {
                event: "even".to_string(),
                given: "three_six".to_string()
            }
        );
        assert_eq!(
            cfg.resolved_log_path(),
            Some(PathBuf::from("out/die_demo/log.jsonl"))
        );
    }

    #[test]
    fn logging_defaults_when_omitted() {
        let yaml = BASIC_YAML.replace(
            "logging:\n  tracing_level: \"debug\"\n  json_file: \"out/{run_id}/log.jsonl\"\n",
            "",
        );
        let mut cfg = parse(&yaml);
        cfg.validate().expect("validate");
        assert_eq!(cfg.logging, LoggingConfig::default());
        assert!(cfg.resolved_log_path().is_none());
    }

    #[test]
    fn rejects_undefined_event() {
        let yaml = BASIC_YAML.replace("{ kind: complement, event: a }", "{ kind: complement, event: b }");
        let mut cfg = parse(&yaml);
        let err = cfg.validate().expect_err("unknown event");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, message }
                if field == "scenarios[coins].queries[0]" && message.contains("'b'")
        ));
    }

    #[test]
    fn rejects_wrong_arity() {
        let yaml = BASIC_YAML.replace(
            "{ kind: independent, events: [even, three_six] }",
            "{ kind: independent, events: [even] }",
        );
        let mut cfg = parse(&yaml);
        let err = cfg.validate().expect_err("arity");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "scenarios[die].queries[2]"
        ));
    }

    #[test]
    fn rejects_inverted_range_and_ambiguous_outcomes() {
        let inverted = BASIC_YAML.replace("{ start: 1, end: 6 }", "{ start: 6, end: 1 }");
        let err = parse(&inverted).validate().expect_err("inverted range");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "scenarios[die].outcomes.range"
        ));

        let ambiguous = BASIC_YAML.replace(
            "      list: [\"HH\", \"HT\", \"TH\", \"TT\"]\n",
            "      list: [\"HH\", \"HT\", \"TH\", \"TT\"]\n      range: { start: 1, end: 2 }\n",
        );
        let err = parse(&ambiguous).validate().expect_err("ambiguous outcomes");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "scenarios[coins].outcomes"
        ));
    }

    #[test]
    fn rejects_duplicate_scenarios() {
        let yaml = BASIC_YAML.replace("name: \"coins\"", "name: \"die\"");
        let err = parse(&yaml).validate().expect_err("duplicate scenario");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "scenarios"
        ));
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("die_demo", "die demo");
        let err = parse(&yaml).validate().expect_err("invalid run id");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "run_id"
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ScenarioFile::from_path("does/not/exist.yaml").expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.path(), Path::new("does/not/exist.yaml"));
    }
}
