//! Built-in textbook exercises solved with the event algebra.

use clap::ValueEnum;
use probspace_core::space::{
    PlayingCard, Rank, Suit, coin_sequences, dice_pairs, range, standard_deck,
};
use probspace_core::{Event, EventError, ProbabilityModel};
use tracing::info;

use crate::report::TaskReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuiltinTask {
    /// Conditional probability on numbers, coins, dice and two-sided cards.
    Conditional,
    /// Product-rule independence checks on the numbers 1..12.
    Independence,
    /// Pairwise versus mutual independence of two coin tosses.
    Coins,
    /// Suit and rank events on a standard deck.
    Cards,
}

impl BuiltinTask {
    pub const ALL: [BuiltinTask; 4] = [
        BuiltinTask::Conditional,
        BuiltinTask::Independence,
        BuiltinTask::Coins,
        BuiltinTask::Cards,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            BuiltinTask::Conditional => "conditional",
            BuiltinTask::Independence => "independence",
            BuiltinTask::Coins => "coins",
            BuiltinTask::Cards => "cards",
        }
    }

    pub fn run(self) -> Result<Vec<TaskReport>, EventError> {
        info!(task = self.as_str(), "running built-in task");
        match self {
            BuiltinTask::Conditional => Ok(vec![
                even_given_multiple_of_five()?,
                two_heads_given_one()?,
                dice_sum_given_even()?,
                two_sided_cards()?,
            ]),
            BuiltinTask::Independence => Ok(vec![
                threes_versus("even numbers", [2, 4, 6, 8, 10, 12])?,
                threes_versus("numbers up to 4", [1, 2, 3, 4])?,
            ]),
            BuiltinTask::Coins => Ok(vec![coin_pairs()?]),
            BuiltinTask::Cards => Ok(vec![deck_suits_and_ranks()?]),
        }
    }
}

/// Runs the given tasks in order, or every task when the list is empty.
pub fn run_builtin(tasks: &[BuiltinTask]) -> Result<Vec<TaskReport>, EventError> {
    let all = BuiltinTask::ALL;
    let selected: &[BuiltinTask] = if tasks.is_empty() {
        &all
    } else {
        tasks
    };
    let mut reports = Vec::new();
    for task in selected {
        reports.extend(task.run()?);
    }
    Ok(reports)
}

fn even_given_multiple_of_five() -> Result<TaskReport, EventError> {
    let model = range(1, 10);
    let even = Event::new(&model, [2, 4, 6, 8, 10]);
    let fives = Event::new(&model, [5, 10]);

    Ok(TaskReport::new("Even numbers and multiples of five in 1..10")
        .probability("P(A|B)", even.conditional_probability(&fives)?)
        .probability("P(B|A)", fives.conditional_probability(&even)?))
}

fn two_heads_given_one() -> Result<TaskReport, EventError> {
    let model = coin_sequences(2);
    let both = Event::new(&model, ["HH".to_string()]);
    let at_least_one = Event::new(&model, ["HH", "HT", "TH"].map(String::from));

    Ok(TaskReport::new("Two heads given at least one head")
        .probability("P(A∩B)", both.intersection(&at_least_one)?.probability())
        .probability("P(B)", at_least_one.probability())
        .probability("P(A|B)", both.conditional_probability(&at_least_one)?))
}

fn dice_sum_given_even() -> Result<TaskReport, EventError> {
    let model = dice_pairs(6);
    let both_even: Vec<(i32, i32)> = model
        .outcomes()
        .into_iter()
        .filter(|&(first, second)| first % 2 == 0 && second % 2 == 0)
        .collect();
    let sum_eight = both_even
        .iter()
        .copied()
        .filter(|&(first, second)| first + second == 8);

    let target = Event::new(&model, sum_eight);
    let condition = Event::new(&model, both_even);

    Ok(TaskReport::new("Sum of eight given both dice even")
        .probability("P(sum=8 | both even)", target.conditional_probability(&condition)?))
}

/// Three cards: white/white, black/black and white/black, one face drawn up.
fn two_sided_cards() -> Result<TaskReport, EventError> {
    let sides = [
        "white-white:1",
        "white-white:2",
        "black-black:1",
        "black-black:2",
        "white-black:up",
        "white-black:down",
    ];
    let model = ProbabilityModel::new(sides);
    let black_bottom = Event::new(
        &model,
        ["black-black:1", "black-black:2", "white-black:up"],
    );
    let white_top = Event::new(
        &model,
        ["white-white:1", "white-white:2", "white-black:up"],
    );

    Ok(TaskReport::new("Two-sided cards")
        .probability("P(black bottom)", black_bottom.probability())
        .probability(
            "P(black bottom | white top)",
            black_bottom.conditional_probability(&white_top)?,
        ))
}

fn threes_versus<const N: usize>(label: &str, other: [i32; N]) -> Result<TaskReport, EventError> {
    let model = range(1, 12);
    let threes = Event::new(&model, [3, 6, 9, 12]);
    let other = Event::new(&model, other);

    let joint = threes.intersection(&other)?.probability();
    Ok(TaskReport::new(format!("Multiples of three and {label} in 1..12"))
        .probability("P(A∩B)", joint)
        .probability("P(A)·P(B)", threes.probability() * other.probability())
        .flag("independent", threes.is_independent(&other)?))
}

fn coin_pairs() -> Result<TaskReport, EventError> {
    let model = coin_sequences(2);
    let first_heads = Event::new(&model, ["HH", "HT"].map(String::from));
    let second_heads = Event::new(&model, ["HH", "TH"].map(String::from));
    let exactly_one = Event::new(&model, ["HT", "TH"].map(String::from));

    let report = TaskReport::new("Two coin tosses")
        .probability("P(A∩B)", first_heads.intersection(&second_heads)?.probability())
        .probability("P(A∩C)", first_heads.intersection(&exactly_one)?.probability())
        .probability("P(B∩C)", second_heads.intersection(&exactly_one)?.probability())
        .flag("A and B independent", first_heads.is_independent(&second_heads)?)
        .flag("A and C independent", first_heads.is_independent(&exactly_one)?)
        .flag("B and C independent", second_heads.is_independent(&exactly_one)?);

    let events = [first_heads, second_heads, exactly_one];
    let joint = Event::intersect_all(&events)?.map_or(0.0, |event| event.probability());
    Ok(report
        .probability("P(A∩B∩C)", joint)
        .flag(
            "A, B and C mutually independent",
            Event::check_mutually_independent(&events)?,
        ))
}

fn deck_suits_and_ranks() -> Result<TaskReport, EventError> {
    let model = standard_deck();
    let cards = PlayingCard::full_deck();
    let pick = |keep: fn(&PlayingCard) -> bool| {
        Event::new(&model, cards.iter().copied().filter(|card| keep(card)))
    };
    let hearts = pick(|card| card.suit == Suit::Hearts);
    let faces = pick(|card| card.rank.is_face());
    let kings = pick(|card| card.rank == Rank::King);

    Ok(TaskReport::new("Standard deck")
        .probability("P(heart)", hearts.probability())
        .probability("P(face card)", faces.probability())
        .probability("P(king | face card)", kings.conditional_probability(&faces)?)
        .flag("heart and face card independent", hearts.is_independent(&faces)?)
        .flag(
            "king and face card mutually exclusive",
            Event::are_mutually_exclusive(&kings, &faces)?,
        ))
}

#[cfg(test)]
mod tests {
    use super::{BuiltinTask, run_builtin};
    use crate::report::ReportValue;

    fn display(reports: &[crate::report::TaskReport], title: &str, label: &str) -> String {
        reports
            .iter()
            .find(|report| report.title.starts_with(title))
            .and_then(|report| report.line(label))
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn conditional_tasks_match_textbook_answers() {
        let reports = BuiltinTask::Conditional.run().unwrap();
        assert_eq!(reports.len(), 4);
        assert_eq!(display(&reports, "Even numbers", "P(A|B)"), "1/2");
        assert_eq!(display(&reports, "Even numbers", "P(B|A)"), "1/5");
        assert_eq!(display(&reports, "Two heads", "P(A|B)"), "1/3");
        assert_eq!(display(&reports, "Sum of eight", "P(sum=8 | both even)"), "1/3");
        assert_eq!(display(&reports, "Two-sided", "P(black bottom)"), "1/2");
        assert_eq!(
            display(&reports, "Two-sided", "P(black bottom | white top)"),
            "1/3"
        );
    }

    #[test]
    fn independence_tasks() {
        let reports = BuiltinTask::Independence.run().unwrap();
        assert_eq!(
            reports[0].line("independent"),
            Some(&ReportValue::Flag { value: true })
        );
        assert_eq!(
            reports[1].line("independent"),
            Some(&ReportValue::Flag { value: false })
        );
        assert_eq!(display(&reports, "Multiples of three and numbers", "P(A∩B)"), "1/12");
        assert_eq!(display(&reports, "Multiples of three and numbers", "P(A)·P(B)"), "1/9");
    }

    #[test]
    fn coin_task_is_pairwise_but_not_mutually_independent() {
        let reports = BuiltinTask::Coins.run().unwrap();
        let report = &reports[0];
        for label in ["A and B independent", "A and C independent", "B and C independent"] {
            assert_eq!(report.line(label), Some(&ReportValue::Flag { value: true }));
        }
        assert_eq!(
            report.line("A, B and C mutually independent"),
            Some(&ReportValue::Flag { value: false })
        );
        assert_eq!(display(&reports, "Two coin", "P(A∩B∩C)"), "0/1");
    }

    #[test]
    fn card_task() {
        let reports = BuiltinTask::Cards.run().unwrap();
        assert_eq!(display(&reports, "Standard deck", "P(heart)"), "1/4");
        assert_eq!(display(&reports, "Standard deck", "P(face card)"), "3/13");
        assert_eq!(display(&reports, "Standard deck", "P(king | face card)"), "1/3");
        assert_eq!(
            display(&reports, "Standard deck", "king and face card mutually exclusive"),
            "no"
        );
    }

    #[test]
    fn empty_selection_runs_everything() {
        let all = run_builtin(&[]).unwrap();
        let coins_only = run_builtin(&[BuiltinTask::Coins]).unwrap();
        assert_eq!(all.len(), 8);
        assert_eq!(coins_only.len(), 1);
    }
}
