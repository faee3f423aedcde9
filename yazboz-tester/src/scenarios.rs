//! Named QA scenarios run against the core engine.
//!
//! Every scenario gets a seeded RNG per iteration. Fixed scenarios use it to
//! vary how totals are spread over rounds; the expected result never
//! depends on the seed.

use anyhow::{Context, Result, bail, ensure};
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use yazboz_core::constants::{BATAK_ROUND_LIMIT, OKEY_ROUND_LIMIT};
use yazboz_core::{
    GameKind, LedgerError, MemoryStore, SavedAt, ScoreKeeper, SessionRecord, archive, evaluate,
    ledger,
};

pub type ScenarioFn = fn(&mut ChaCha8Rng) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    pub run: ScenarioFn,
}

const CATALOG: &[Scenario] = &[
    Scenario {
        key: "okey-win",
        description: "Okey: lowest total after 15 rounds wins",
        run: okey_win,
    },
    Scenario {
        key: "batak-win",
        description: "Batak: highest total after 13 hands wins",
        run: batak_win,
    },
    Scenario {
        key: "pisti-early-end",
        description: "Pişti: game ends on the round a player reaches the target",
        run: pisti_early_end,
    },
    Scenario {
        key: "penalty101-loss",
        description: "Cezalı 101: highest rounds-plus-penalties total loses",
        run: penalty101_loss,
    },
    Scenario {
        key: "tie-break",
        description: "Ties go to the lowest seat in every game",
        run: tie_break,
    },
    Scenario {
        key: "migration",
        description: "Records missing newer fields load with defaults",
        run: migration,
    },
    Scenario {
        key: "drink-floor",
        description: "Drink counts never go below zero",
        run: drink_floor,
    },
    Scenario {
        key: "reset-idempotence",
        description: "Resetting twice equals resetting once",
        run: reset_idempotence,
    },
    Scenario {
        key: "archive-roundtrip",
        description: "Save, resume and judge a table through the archive",
        run: archive_roundtrip,
    },
    Scenario {
        key: "random-tables",
        description: "Random tables keep rows aligned and outcomes deterministic",
        run: random_tables,
    },
];

pub fn catalog() -> &'static [Scenario] {
    CATALOG
}

pub fn get_scenario(key: &str) -> Option<Scenario> {
    catalog().iter().copied().find(|scenario| scenario.key == key)
}

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    catalog().iter().map(|scenario| (scenario.key, scenario.description))
}

fn seat(kind: GameKind, players: usize) -> Result<SessionRecord> {
    let names: Vec<String> = (1..=players).map(|n| format!("Oyuncu {n}")).collect();
    SessionRecord::new(kind, &names).context("seating players")
}

/// Spread `total` over `parts` non-negative values.
fn split_total(rng: &mut ChaCha8Rng, total: i64, parts: usize) -> Vec<i64> {
    let mut cuts: Vec<i64> = (1..parts).map(|_| rng.gen_range(0..=total)).collect();
    cuts.push(0);
    cuts.push(total);
    cuts.sort_unstable();
    cuts.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Append rounds so each player's rows sum to `totals`.
fn play_totals(
    rng: &mut ChaCha8Rng,
    record: SessionRecord,
    totals: &[i64],
    rounds: usize,
) -> Result<SessionRecord> {
    let columns: Vec<Vec<i64>> = totals
        .iter()
        .map(|total| split_total(rng, *total, rounds))
        .collect();
    (0..rounds).try_fold(record, |record, round| {
        let entries: Vec<String> = columns.iter().map(|col| col[round].to_string()).collect();
        ledger::append_round(&record, &entries).with_context(|| format!("round {}", round + 1))
    })
}

fn okey_win(rng: &mut ChaCha8Rng) -> Result<()> {
    let record = seat(GameKind::Okey, 3)?;
    let record = play_totals(rng, record, &[120, 95, 140], OKEY_ROUND_LIMIT - 1)?;
    ensure!(!evaluate(&record).finished, "Okey ended before round 15");
    let record = ledger::append_round(&record, &["0", "0", "0"])?;
    let outcome = evaluate(&record);
    ensure!(outcome.finished, "Okey not finished after 15 rounds");
    ensure!(
        outcome.final_scores == [120, 95, 140],
        "unexpected totals {:?}",
        outcome.final_scores
    );
    ensure!(outcome.winner() == Some(1), "winner {:?}, expected 1", outcome.winner());
    Ok(())
}

fn batak_win(rng: &mut ChaCha8Rng) -> Result<()> {
    let mut record = seat(GameKind::Batak, 4)?;
    for _ in 0..BATAK_ROUND_LIMIT {
        let entries: Vec<String> = (0..4).map(|_| rng.gen_range(0..=13).to_string()).collect();
        record = ledger::append_round(&record, &entries)?;
    }
    let outcome = evaluate(&record);
    let best = outcome.final_scores.iter().copied().max().unwrap_or(0);
    let expected = outcome.final_scores.iter().position(|total| *total == best);
    ensure!(outcome.finished, "Batak not finished after 13 hands");
    ensure!(
        outcome.winner() == expected,
        "winner {:?}, expected {expected:?}",
        outcome.winner()
    );
    match ledger::append_round(&record, &["1", "1", "1", "1"]) {
        Err(LedgerError::GameOver) => Ok(()),
        other => bail!("14th Batak hand was not refused: {other:?}"),
    }
}

fn pisti_early_end(rng: &mut ChaCha8Rng) -> Result<()> {
    let record = seat(GameKind::Pisti, 2)?;
    let record = play_totals(rng, record, &[125, 65], 5)?;
    ensure!(!evaluate(&record).finished, "Pişti ended below the target");
    let record = ledger::append_round(&record, &["30", "15"])?;
    let outcome = evaluate(&record);
    ensure!(outcome.finished, "Pişti did not end at 155");
    ensure!(outcome.winner() == Some(0), "winner {:?}", outcome.winner());
    ensure!(outcome.final_scores == [155, 80], "totals {:?}", outcome.final_scores);
    Ok(())
}

fn penalty101_loss(rng: &mut ChaCha8Rng) -> Result<()> {
    let record = seat(GameKind::Penalty101, 2)?;
    let record = play_totals(rng, record, &[450, 430], 9)?;
    let mut record = record;
    for amount in split_total(rng, 100, 3).into_iter().filter(|a| *a > 0) {
        record = ledger::add_penalty(&record, Some(1), &amount.to_string())?;
    }
    let outcome = evaluate(&record);
    ensure!(outcome.finished, "Cezalı 101 not finished after 9 hands");
    ensure!(outcome.final_scores == [450, 530], "finals {:?}", outcome.final_scores);
    ensure!(outcome.loser() == Some(1), "loser {:?}", outcome.loser());
    Ok(())
}

fn tie_break(rng: &mut ChaCha8Rng) -> Result<()> {
    let players = rng.gen_range(3..=6);
    let low = rng.gen_range(0..5_i64);
    let high = low + rng.gen_range(1..5_i64);
    let tied_at = |value: i64, others: i64| -> Vec<String> {
        (0..players)
            .map(|index| if index == 0 || index > 2 { others } else { value })
            .map(|v| v.to_string())
            .collect()
    };

    let cases = [
        (GameKind::Okey, OKEY_ROUND_LIMIT, tied_at(low, high)),
        (GameKind::Batak, BATAK_ROUND_LIMIT, tied_at(high, low)),
        (GameKind::Penalty101, 9, tied_at(high, low)),
    ];
    for (kind, rounds, row) in cases {
        let mut record = seat(kind, players)?;
        for _ in 0..rounds {
            record = ledger::append_round(&record, &row)?;
        }
        let verdict = evaluate(&record)
            .verdict
            .with_context(|| format!("{kind} produced no verdict"))?;
        ensure!(verdict.player == 1, "{kind} tie went to seat {}", verdict.player);
    }

    let record = seat(GameKind::Pisti, players)?;
    let record = ledger::append_round(&record, &tied_at(151, 0))?;
    ensure!(evaluate(&record).winner() == Some(1), "Pişti tie not resolved to seat 1");
    Ok(())
}

fn migration(rng: &mut ChaCha8Rng) -> Result<()> {
    let kind = *GameKind::ALL.choose(rng).context("no game kinds")?;
    let raw = r#"{"oyuncular":["Ali","Veli"],"skorlar":[[10,20],[5,7]]}"#;
    let record = SessionRecord::from_json(raw, kind)?;
    ensure!(record.drink_counts.is_empty(), "drink counts not back-filled");
    ensure!(record.drink_prices.is_empty(), "drink prices not back-filled");
    ensure!(record.players == ["Ali", "Veli"], "players changed");
    ensure!(record.rounds == [vec![10, 20], vec![5, 7]], "rounds changed");
    ensure!(record.penalties.len() == 2, "penalty rows not sized to players");
    let again = SessionRecord::from_json(&serde_json::to_string(&record)?, kind)?;
    ensure!(again == record, "normalize is not idempotent for {kind}");
    Ok(())
}

fn drink_floor(rng: &mut ChaCha8Rng) -> Result<()> {
    let mut record = seat(GameKind::Okey, 2)?;
    let mut model = 0_u32;
    for step in 0..200 {
        if rng.gen_bool(0.4) {
            record = ledger::add_drink(&record, "çay");
            model += 1;
        } else {
            record = ledger::remove_drink(&record, "çay");
            model = model.saturating_sub(1);
        }
        let count = record.drink_counts.get("çay").copied().unwrap_or(0);
        ensure!(count == model, "step {step}: count {count}, expected {model}");
    }
    Ok(())
}

fn reset_idempotence(rng: &mut ChaCha8Rng) -> Result<()> {
    let kind = *GameKind::ALL.choose(rng).context("no game kinds")?;
    let mut record = seat(kind, 3)?;
    for _ in 0..rng.gen_range(0..6) {
        let entries: Vec<String> = (0..3).map(|_| rng.gen_range(0..40).to_string()).collect();
        if let Ok(next) = ledger::append_round(&record, &entries) {
            record = next;
        }
        record = ledger::add_drink(&record, "kahve");
    }
    record = ledger::set_drink_price(&record, "kahve", "15")?;
    let once = ledger::reset(&record);
    let twice = ledger::reset(&once);
    ensure!(once == twice, "second reset changed the {kind} table");
    ensure!(once.round_count() == 0, "rounds survived reset");
    ensure!(once.drink_counts.is_empty(), "drink counts survived reset");
    ensure!(
        once.drink_prices.get("kahve") == Some(&15.0),
        "drink price lost on reset"
    );
    Ok(())
}

fn archive_roundtrip(rng: &mut ChaCha8Rng) -> Result<()> {
    let store = MemoryStore::new();
    let keeper = ScoreKeeper::new(store.clone());
    let mut table = keeper.start_table(GameKind::Pisti, &["Ali", "Veli", "Ayşe"])?;
    table.apply(|record| ledger::set_target_score(record, "101"))?;
    table.apply(|record| ledger::append_round(record, &["40", "101", "12"]))?;
    let millis = rng.gen_range(1_600_000_000_000_i64..1_900_000_000_000);
    let stamp = SavedAt {
        millis,
        date: "19.10.2026".into(),
        time: "21:00".into(),
    };
    let first = table.save_to_archive(&stamp);
    let second = table.save_to_archive(&stamp);
    ensure!(first.id != second.id, "archive ids collided");
    let saved = table.record().clone();
    table.close();

    let resumed = keeper.resume_saved(&first.id)?;
    ensure!(*resumed.record() == saved, "resumed table differs from the saved one");
    let outcome = first.outcome().context("saved game has an unknown kind")?;
    ensure!(outcome.winner() == Some(1), "archived winner {:?}", outcome.winner());
    ensure!(archive::delete(&store, &second.id), "delete reported nothing removed");
    ensure!(keeper.saved_games().len() == 1, "delete left {} entries", keeper.saved_games().len());
    Ok(())
}

fn random_tables(rng: &mut ChaCha8Rng) -> Result<()> {
    let kind = *GameKind::ALL.choose(rng).context("no game kinds")?;
    let players = rng.gen_range(2..=6);
    let mut record = seat(kind, players)?;
    if kind == GameKind::Penalty101 {
        record = ledger::set_hand_target(&record, &rng.gen_range(1..=12).to_string())?;
    }
    for _ in 0..30 {
        let entries: Vec<String> = (0..players).map(|_| rng.gen_range(0..60).to_string()).collect();
        let before = record.round_count();
        match ledger::append_round(&record, &entries) {
            Ok(next) => {
                ensure!(
                    next.rounds.iter().all(|row| row.len() == before + 1),
                    "{kind}: rows out of step after append"
                );
                record = next;
            }
            Err(LedgerError::GameOver) => {
                ensure!(evaluate(&record).finished, "{kind}: refused append before the end");
                break;
            }
            Err(err) => bail!("{kind}: unexpected append failure: {err}"),
        }
        ensure!(
            evaluate(&record) == evaluate(&record.clone()),
            "{kind}: outcome not deterministic"
        );
    }
    Ok(())
}
