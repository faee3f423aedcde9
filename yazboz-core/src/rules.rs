//! End-of-game rules, one evaluator per game.
//!
//! Evaluators are pure: the same rows and threshold always give the same
//! [`Outcome`].
//!
//! When several players share the deciding score, the lowest player index is
//! picked. That is how the first release scanned for the extreme value, not
//! a rule of any of these games; it is kept so saved tables are judged the
//! same way they always were.

use crate::constants::{BATAK_ROUND_LIMIT, OKEY_ROUND_LIMIT};
use crate::session::{GameKind, SessionRecord};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Standing {
    Winner,
    Loser,
}

/// The player a finished game singles out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub player: usize,
    pub standing: Standing,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub finished: bool,
    pub verdict: Option<Verdict>,
    /// Per-player totals the rule judged on.
    pub final_scores: Vec<i64>,
}

impl Outcome {
    fn ongoing(final_scores: Vec<i64>) -> Self {
        Self {
            finished: false,
            verdict: None,
            final_scores,
        }
    }

    fn decided(final_scores: Vec<i64>, player: Option<usize>, standing: Standing) -> Self {
        let verdict = player.map(|player| Verdict {
            player,
            standing,
            score: final_scores[player],
        });
        Self {
            finished: true,
            verdict,
            final_scores,
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<usize> {
        self.verdict
            .filter(|v| v.standing == Standing::Winner)
            .map(|v| v.player)
    }

    #[must_use]
    pub fn loser(&self) -> Option<usize> {
        self.verdict
            .filter(|v| v.standing == Standing::Loser)
            .map(|v| v.player)
    }
}

/// Per-player sums. Totals saturate at the `i64` bounds.
#[must_use]
pub fn round_totals(rounds: &[Vec<i64>]) -> Vec<i64> {
    rounds
        .iter()
        .map(|row| row.iter().copied().fold(0, i64::saturating_add))
        .collect()
}

#[must_use]
pub fn penalty_totals(penalties: &[Vec<i64>]) -> Vec<i64> {
    round_totals(penalties)
}

/// Round total plus penalty total per player. Penalty rows may be missing.
#[must_use]
pub fn final_scores(rounds: &[Vec<i64>], penalties: &[Vec<i64>]) -> Vec<i64> {
    let penalty = penalty_totals(penalties);
    round_totals(rounds)
        .into_iter()
        .enumerate()
        .map(|(i, total)| total.saturating_add(penalty.get(i).copied().unwrap_or(0)))
        .collect()
}

fn rounds_played(rounds: &[Vec<i64>]) -> usize {
    rounds.first().map_or(0, Vec::len)
}

fn first_index_of(scores: &[i64], target: Option<i64>) -> Option<usize> {
    let target = target?;
    scores.iter().position(|score| *score == target)
}

fn lowest(scores: &[i64]) -> Option<usize> {
    first_index_of(scores, scores.iter().copied().min())
}

fn highest(scores: &[i64]) -> Option<usize> {
    first_index_of(scores, scores.iter().copied().max())
}

/// Okey: after fifteen rounds the lowest total wins.
#[must_use]
pub fn evaluate_okey(rounds: &[Vec<i64>]) -> Outcome {
    let totals = round_totals(rounds);
    if rounds.is_empty() || rounds_played(rounds) < OKEY_ROUND_LIMIT {
        return Outcome::ongoing(totals);
    }
    let winner = lowest(&totals);
    Outcome::decided(totals, winner, Standing::Winner)
}

/// Batak: after thirteen hands the highest total wins.
#[must_use]
pub fn evaluate_batak(rounds: &[Vec<i64>]) -> Outcome {
    let totals = round_totals(rounds);
    if rounds.is_empty() || rounds_played(rounds) < BATAK_ROUND_LIMIT {
        return Outcome::ongoing(totals);
    }
    let winner = highest(&totals);
    Outcome::decided(totals, winner, Standing::Winner)
}

/// Pişti: the first player, in seating order, at or past `target_score` wins.
#[must_use]
pub fn evaluate_pisti(rounds: &[Vec<i64>], target_score: i64) -> Outcome {
    let totals = round_totals(rounds);
    match totals.iter().position(|total| *total >= target_score) {
        Some(winner) => Outcome::decided(totals, Some(winner), Standing::Winner),
        None => Outcome::ongoing(totals),
    }
}

/// Cezalı 101: after `hand_target` hands the highest round-plus-penalty
/// total loses.
#[must_use]
pub fn evaluate_penalty101(rounds: &[Vec<i64>], penalties: &[Vec<i64>], hand_target: u32) -> Outcome {
    // Scores are whole numbers, so the final-score floor the first release
    // applied is already implied by integer arithmetic.
    let scores = final_scores(rounds, penalties);
    let target = usize::try_from(hand_target).unwrap_or(usize::MAX);
    if rounds.is_empty() || rounds_played(rounds) < target {
        return Outcome::ongoing(scores);
    }
    let loser = highest(&scores);
    Outcome::decided(scores, loser, Standing::Loser)
}

/// Evaluate a record with the rule of its own game.
#[must_use]
pub fn evaluate(record: &SessionRecord) -> Outcome {
    match record.kind {
        GameKind::Okey => evaluate_okey(&record.rounds),
        GameKind::Batak => evaluate_batak(&record.rounds),
        GameKind::Pisti => evaluate_pisti(&record.rounds, record.target_score),
        GameKind::Penalty101 => {
            evaluate_penalty101(&record.rounds, &record.penalties, record.hand_target)
        }
    }
}
