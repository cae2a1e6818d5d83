//! Evaluates configured scenarios against the event algebra.

use std::collections::BTreeMap;

use probspace_core::{Event, EventError, ProbabilityModel};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{QueryConfig, ScenarioConfig, ScenarioFile};
use crate::report::TaskReport;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario '{scenario}' refers to undefined event '{event}'")]
    UnknownEvent { scenario: String, event: String },
    #[error("scenario '{scenario}': '{query}' cannot take {got} event(s)")]
    Arity {
        scenario: String,
        query: &'static str,
        got: usize,
    },
    #[error("scenario '{scenario}': {source}")]
    Event {
        scenario: String,
        #[source]
        source: EventError,
    },
}

/// A scenario's sample space together with its named events.
pub struct ScenarioRunner<'a> {
    config: &'a ScenarioConfig,
    model: ProbabilityModel<String>,
    events: BTreeMap<&'a str, Event<String>>,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(config: &'a ScenarioConfig) -> Self {
        let model = ProbabilityModel::new(config.outcomes.labels());
        let events = config
            .events
            .iter()
            .map(|(name, favorable)| {
                let event = Event::new(&model, favorable.iter().cloned());
                if event.len() != favorable.len() {
                    warn!(
                        scenario = %config.name,
                        event = %name,
                        declared = favorable.len(),
                        kept = event.len(),
                        "event lists outcomes outside the sample space or duplicates"
                    );
                }
                (name.as_str(), event)
            })
            .collect();
        Self {
            config,
            model,
            events,
        }
    }

    pub fn model(&self) -> &ProbabilityModel<String> {
        &self.model
    }

    pub fn run(&self) -> Result<TaskReport, ScenarioError> {
        info!(
            scenario = %self.config.name,
            outcomes = self.model.count_outcomes(),
            events = self.events.len(),
            queries = self.config.queries.len(),
            "evaluating scenario"
        );
        let mut report = TaskReport::new(self.config.name.clone());
        for query in &self.config.queries {
            report = self.answer(report, query)?;
        }
        Ok(report)
    }

    fn answer(
        &self,
        report: TaskReport,
        query: &QueryConfig,
    ) -> Result<TaskReport, ScenarioError> {
        let report = match query {
            QueryConfig::Probability { event } => {
                report.probability(format!("P({event})"), self.event(event)?.probability())
            }
            QueryConfig::Complement { event } => {
                let complement = self.event(event)?.complement();
                report
                    .outcomes(format!("not {event}"), outcome_labels(&complement))
                    .probability(format!("P(not {event})"), complement.probability())
            }
            QueryConfig::Intersection { events } => {
                let joint = self.fold(query, events, Event::intersection)?;
                let label = events.join(" ∩ ");
                report
                    .outcomes(label.clone(), outcome_labels(&joint))
                    .probability(format!("P({label})"), joint.probability())
            }
            QueryConfig::Union { events } => {
                let union = self.fold(query, events, Event::union)?;
                let label = events.join(" ∪ ");
                report
                    .outcomes(label.clone(), outcome_labels(&union))
                    .probability(format!("P({label})"), union.probability())
            }
            QueryConfig::Difference { event, minus } => {
                let difference = self
                    .event(event)?
                    .difference(self.event(minus)?)
                    .map_err(|source| self.event_error(source))?;
                let label = format!("{event} \\ {minus}");
                report
                    .outcomes(label.clone(), outcome_labels(&difference))
                    .probability(format!("P({label})"), difference.probability())
            }
            QueryConfig::Conditional { event, given } => {
                let value = self
                    .event(event)?
                    .conditional_probability(self.event(given)?)
                    .map_err(|source| self.event_error(source))?;
                report.probability(format!("P({event} | {given})"), value)
            }
            QueryConfig::Independent { events } => {
                let [a, b] = self.pair(query, events)?;
                let independent = a
                    .is_independent(b)
                    .map_err(|source| self.event_error(source))?;
                report.flag(format!("{} independent", events.join(" and ")), independent)
            }
            QueryConfig::MutuallyIndependent { events } => {
                let collected = self.collect(events)?;
                let independent = Event::check_mutually_independent(&collected)
                    .map_err(|source| self.event_error(source))?;
                report.flag(
                    format!("{} mutually independent", events.join(", ")),
                    independent,
                )
            }
            QueryConfig::MutuallyExclusive { events } => {
                let [a, b] = self.pair(query, events)?;
                let exclusive =
                    Event::are_mutually_exclusive(a, b).map_err(|source| self.event_error(source))?;
                report.flag(
                    format!("{} mutually exclusive", events.join(" and ")),
                    exclusive,
                )
            }
        };
        Ok(report)
    }

    fn event(&self, name: &str) -> Result<&Event<String>, ScenarioError> {
        self.events
            .get(name)
            .ok_or_else(|| ScenarioError::UnknownEvent {
                scenario: self.config.name.clone(),
                event: name.to_string(),
            })
    }

    fn collect(&self, names: &[String]) -> Result<Vec<Event<String>>, ScenarioError> {
        names
            .iter()
            .map(|name| self.event(name).cloned())
            .collect()
    }

    fn pair(
        &self,
        query: &QueryConfig,
        names: &[String],
    ) -> Result<[&Event<String>; 2], ScenarioError> {
        match names {
            [a, b] => Ok([self.event(a)?, self.event(b)?]),
            _ => Err(self.arity_error(query, names.len())),
        }
    }

    fn fold(
        &self,
        query: &QueryConfig,
        names: &[String],
        combine: fn(&Event<String>, &Event<String>) -> Result<Event<String>, EventError>,
    ) -> Result<Event<String>, ScenarioError> {
        let (first, rest) = names
            .split_first()
            .ok_or_else(|| self.arity_error(query, 0))?;
        let mut acc = self.event(first)?.clone();
        for name in rest {
            acc = combine(&acc, self.event(name)?).map_err(|source| self.event_error(source))?;
        }
        Ok(acc)
    }

    fn arity_error(&self, query: &QueryConfig, got: usize) -> ScenarioError {
        ScenarioError::Arity {
            scenario: self.config.name.clone(),
            query: query.kind(),
            got,
        }
    }

    fn event_error(&self, source: EventError) -> ScenarioError {
        ScenarioError::Event {
            scenario: self.config.name.clone(),
            source,
        }
    }
}

fn outcome_labels(event: &Event<String>) -> Vec<String> {
    event.favorable_outcomes().iter().cloned().collect()
}

/// Runs every scenario of a validated file, in declaration order.
pub fn run_file(file: &ScenarioFile) -> Result<Vec<TaskReport>, ScenarioError> {
    file.scenarios
        .iter()
        .map(|scenario| ScenarioRunner::new(scenario).run())
        .collect()
}
