use probspace_core::space::{PlayingCard, Rank, Suit, standard_deck};
use probspace_core::{Event, ProbabilityModel};

fn close(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() < 1e-3
}

#[test]
fn every_card_is_equally_likely() {
    let deck = standard_deck();
    for card in PlayingCard::full_deck() {
        assert!(close(deck.probability(&card), 1.0 / 52.0));
    }
}

#[test]
fn removing_a_card_changes_probabilities() {
    let deck = standard_deck();
    let ace_of_spades = PlayingCard::new(Rank::Ace, Suit::Spades);

    assert!(deck.remove_outcome(&ace_of_spades));
    assert_eq!(deck.probability(&ace_of_spades), 0.0);
    assert!(close(
        deck.probability(&PlayingCard::new(Rank::Two, Suit::Clubs)),
        1.0 / 51.0
    ));
}

#[test]
fn adding_a_duplicate_card_is_rejected() {
    let deck = standard_deck();
    let ace_of_hearts = PlayingCard::new(Rank::Ace, Suit::Hearts);

    assert!(!deck.add_outcome(ace_of_hearts));
    assert!(close(deck.probability(&ace_of_hearts), 1.0 / 52.0));
}

#[test]
fn empty_deck_gives_zero() {
    let deck: ProbabilityModel<PlayingCard> = ProbabilityModel::empty();
    assert_eq!(
        deck.probability(&PlayingCard::new(Rank::Two, Suit::Hearts)),
        0.0
    );
}

#[test]
fn suit_and_rank_events_are_independent() {
    let deck = standard_deck();
    let cards = PlayingCard::full_deck();
    let hearts = Event::new(&deck, cards.iter().copied().filter(|c| c.suit == Suit::Hearts));
    let faces = Event::new(&deck, cards.iter().copied().filter(|c| c.rank.is_face()));
    let red = Event::new(&deck, cards.iter().copied().filter(|c| c.suit.is_red()));

    assert!(hearts.is_independent(&faces).expect("same deck"));
    assert!(red.is_independent(&faces).expect("same deck"));
    assert!(!hearts.is_independent(&red).expect("same deck"));
    assert!(close(
        hearts.conditional_probability(&red).expect("same deck"),
        0.5
    ));
}
