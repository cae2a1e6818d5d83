pub mod config;
pub mod format;
pub mod logging;
pub mod report;
pub mod scenario;
pub mod tasks;

pub use config::{ConfigError, ScenarioFile, ValidationError};
pub use format::format_probability;
pub use report::{ReportLine, ReportValue, TaskReport};
pub use scenario::{ScenarioError, ScenarioRunner, run_file};
pub use tasks::{BuiltinTask, run_builtin};
