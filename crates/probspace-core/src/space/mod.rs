//! Ready-made sample spaces for common textbook experiments.

mod card;

pub use card::{PlayingCard, Rank, Suit};

use crate::model::ProbabilityModel;

/// Integers `start..=end`; empty when `start > end`.
pub fn range(start: i32, end: i32) -> ProbabilityModel<i32> {
    ProbabilityModel::new(start..=end)
}

/// A fair die numbered `1..=sides`.
pub fn die(sides: i32) -> ProbabilityModel<i32> {
    range(1, sides)
}

/// Ordered results `(first, second)` of rolling two dice.
pub fn dice_pairs(sides: i32) -> ProbabilityModel<(i32, i32)> {
    ProbabilityModel::new(
        (1..=sides).flat_map(|first| (1..=sides).map(move |second| (first, second))),
    )
}

/// Every `H`/`T` sequence of the given length, in lexicographic order.
pub fn coin_sequence_outcomes(tosses: u32) -> Vec<String> {
    let total = 1usize << tosses;
    (0..total)
        .map(|mask| {
            (0..tosses)
                .rev()
                .map(|bit| if mask >> bit & 1 == 0 { 'H' } else { 'T' })
                .collect()
        })
        .collect()
}

pub fn coin_sequences(tosses: u32) -> ProbabilityModel<String> {
    ProbabilityModel::new(coin_sequence_outcomes(tosses))
}

/// The 52-card French deck.
pub fn standard_deck() -> ProbabilityModel<PlayingCard> {
    ProbabilityModel::new(PlayingCard::full_deck())
}
