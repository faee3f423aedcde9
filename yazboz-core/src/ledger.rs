//! Ledger operations: pure `(record, input) -> record` transformations.
//!
//! Each operation checks its own preconditions and returns a fresh record,
//! leaving the input untouched. Persisting the result is the caller's job
//! (see [`crate::table::Table`]).

use crate::numbers::{parse_leading_int, parse_positive, parse_price, parse_score};
use crate::rules;
use crate::session::{GameKind, SessionRecord};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("fill in every player's score")]
    BlankScore,
    #[error("expected {expected} score entries, got {actual}")]
    EntryCount { expected: usize, actual: usize },
    #[error("the game is already over")]
    GameOver,
    #[error("no player at seat {0}")]
    UnknownPlayer(usize),
    #[error("player {player} has no round {round}")]
    UnknownRound { player: usize, round: usize },
    #[error("player {player} has no penalty {index}")]
    UnknownPenalty { player: usize, index: usize },
    #[error("no player selected")]
    NoPlayerSelected,
    #[error("`{0}` is not an accepted value")]
    InvalidValue(String),
    #[error("player name cannot be blank")]
    BlankName,
    #[error("{kind} tables do not track {feature}")]
    Unsupported {
        kind: GameKind,
        feature: &'static str,
    },
}

impl LedgerError {
    /// Only a blank score blocks with a message; every other failure is a
    /// dropped edit.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::BlankScore)
    }
}

fn check_player(record: &SessionRecord, player: usize) -> Result<(), LedgerError> {
    if player < record.player_count() {
        Ok(())
    } else {
        Err(LedgerError::UnknownPlayer(player))
    }
}

fn require(record: &SessionRecord, kind: GameKind, feature: &'static str) -> Result<(), LedgerError> {
    if record.kind == kind {
        Ok(())
    } else {
        Err(LedgerError::Unsupported {
            kind: record.kind,
            feature,
        })
    }
}

fn invalid(text: &str) -> LedgerError {
    LedgerError::InvalidValue(text.to_string())
}

/// Append one round, one entry per player in seating order.
///
/// # Errors
///
/// [`LedgerError::GameOver`] once the game has a result,
/// [`LedgerError::EntryCount`] if the entries don't match the seats, and
/// [`LedgerError::BlankScore`] if any entry is blank.
pub fn append_round<S: AsRef<str>>(
    record: &SessionRecord,
    entries: &[S],
) -> Result<SessionRecord, LedgerError> {
    if rules::evaluate(record).finished {
        return Err(LedgerError::GameOver);
    }
    if entries.len() != record.player_count() {
        return Err(LedgerError::EntryCount {
            expected: record.player_count(),
            actual: entries.len(),
        });
    }
    if entries.iter().any(|entry| entry.as_ref().trim().is_empty()) {
        return Err(LedgerError::BlankScore);
    }
    let mut next = record.clone();
    for (row, entry) in next.rounds.iter_mut().zip(entries) {
        row.push(parse_score(entry.as_ref()));
    }
    Ok(next)
}

/// Overwrite one cell of the round table.
///
/// # Errors
///
/// Out-of-range coordinates or non-numeric text.
pub fn edit_round(
    record: &SessionRecord,
    player: usize,
    round: usize,
    value: &str,
) -> Result<SessionRecord, LedgerError> {
    check_player(record, player)?;
    if round >= record.rounds[player].len() {
        return Err(LedgerError::UnknownRound { player, round });
    }
    let value = parse_leading_int(value).ok_or_else(|| invalid(value))?;
    let mut next = record.clone();
    next.rounds[player][round] = value;
    Ok(next)
}

/// Add a penalty to the selected player (Cezalı 101).
///
/// # Errors
///
/// No selection, an unknown seat, or an amount that isn't a positive integer.
pub fn add_penalty(
    record: &SessionRecord,
    player: Option<usize>,
    amount: &str,
) -> Result<SessionRecord, LedgerError> {
    require(record, GameKind::Penalty101, "penalties")?;
    let player = player.ok_or(LedgerError::NoPlayerSelected)?;
    check_player(record, player)?;
    let amount = parse_positive(amount).ok_or_else(|| invalid(amount))?;
    let mut next = record.clone();
    next.penalties[player].push(amount);
    Ok(next)
}

fn check_penalty(record: &SessionRecord, player: usize, index: usize) -> Result<(), LedgerError> {
    require(record, GameKind::Penalty101, "penalties")?;
    check_player(record, player)?;
    if index < record.penalties[player].len() {
        Ok(())
    } else {
        Err(LedgerError::UnknownPenalty { player, index })
    }
}

/// Replace one penalty entry.
///
/// # Errors
///
/// Unknown entry or a non-positive amount.
pub fn edit_penalty(
    record: &SessionRecord,
    player: usize,
    index: usize,
    amount: &str,
) -> Result<SessionRecord, LedgerError> {
    check_penalty(record, player, index)?;
    let amount = parse_positive(amount).ok_or_else(|| invalid(amount))?;
    let mut next = record.clone();
    next.penalties[player][index] = amount;
    Ok(next)
}

/// Remove one penalty entry. Later entries shift down, so indices taken
/// before the call no longer line up.
///
/// # Errors
///
/// Unknown entry.
pub fn delete_penalty(
    record: &SessionRecord,
    player: usize,
    index: usize,
) -> Result<SessionRecord, LedgerError> {
    check_penalty(record, player, index)?;
    let mut next = record.clone();
    next.penalties[player].remove(index);
    Ok(next)
}

/// Rename a player. Scores stay attached to the seat, not the name.
///
/// # Errors
///
/// Unknown seat or a blank name.
pub fn rename_player(
    record: &SessionRecord,
    player: usize,
    name: &str,
) -> Result<SessionRecord, LedgerError> {
    check_player(record, player)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::BlankName);
    }
    let mut next = record.clone();
    next.players[player] = name.to_string();
    Ok(next)
}

/// Change how many hands a Cezalı 101 game runs.
///
/// # Errors
///
/// Wrong game or a non-positive value.
pub fn set_hand_target(record: &SessionRecord, value: &str) -> Result<SessionRecord, LedgerError> {
    require(record, GameKind::Penalty101, "a hand target")?;
    let target = parse_positive(value)
        .and_then(|target| u32::try_from(target).ok())
        .ok_or_else(|| invalid(value))?;
    let mut next = record.clone();
    next.hand_target = target;
    Ok(next)
}

/// Change the Pişti target score.
///
/// # Errors
///
/// Wrong game or a non-positive value.
pub fn set_target_score(record: &SessionRecord, value: &str) -> Result<SessionRecord, LedgerError> {
    require(record, GameKind::Pisti, "a target score")?;
    let target = parse_positive(value).ok_or_else(|| invalid(value))?;
    let mut next = record.clone();
    next.target_score = target;
    Ok(next)
}

/// One more of `drink`. Unknown drinks start a new counter.
#[must_use]
pub fn add_drink(record: &SessionRecord, drink: &str) -> SessionRecord {
    let mut next = record.clone();
    *next.drink_counts.entry(drink.to_string()).or_insert(0) += 1;
    next
}

/// One fewer of `drink`; nothing happens at zero.
#[must_use]
pub fn remove_drink(record: &SessionRecord, drink: &str) -> SessionRecord {
    let mut next = record.clone();
    if let Some(count) = next.drink_counts.get_mut(drink) {
        *count = count.saturating_sub(1);
    }
    next
}

/// Set a drink's unit price. Zero is a valid price.
///
/// # Errors
///
/// Text that isn't a price at this table's precision.
pub fn set_drink_price(
    record: &SessionRecord,
    drink: &str,
    price: &str,
) -> Result<SessionRecord, LedgerError> {
    let price = parse_price(price, record.kind.allows_fractional_prices())
        .ok_or_else(|| invalid(price))?;
    let mut next = record.clone();
    next.drink_prices.insert(drink.to_string(), price);
    Ok(next)
}

/// Start the same table over.
///
/// Rounds, penalties and drink counts are cleared. Drink prices and the
/// table's thresholds stay.
#[must_use]
pub fn reset(record: &SessionRecord) -> SessionRecord {
    let seats = record.player_count();
    SessionRecord {
        rounds: vec![Vec::new(); seats],
        penalties: vec![Vec::new(); seats],
        drink_counts: Default::default(),
        ..record.clone()
    }
}
