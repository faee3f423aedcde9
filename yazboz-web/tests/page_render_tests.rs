use futures::executor::block_on;
use yazboz_core::{
    DrinkCatalog, GameKind, MemoryStore, SavedAt, ScoreKeeper, SessionRecord, SetupError, ledger,
};
use yazboz_web::pages::{
    home::{HomePage, HomePageProps},
    not_found::{NotFound, Props as NotFoundProps},
    scoreboard::{ScoreboardPage, ScoreboardPageProps},
    setup::{SetupPage, SetupPageProps, setup_error_message},
};
use yazboz_web::scoreboard::ScoreboardState;
use yew::{Callback, LocalServerRenderer};

fn seated(kind: GameKind) -> SessionRecord {
    SessionRecord::new(kind, &["Ali", "Veli"]).unwrap()
}

fn board(record: SessionRecord) -> String {
    let props = ScoreboardPageProps {
        state: ScoreboardState::new(record),
        catalog: DrinkCatalog::builtin(),
        on_action: Callback::noop(),
    };
    block_on(LocalServerRenderer::<ScoreboardPage>::with_props(props).render())
}

#[test]
fn scoreboard_shows_rounds_totals_and_controls() {
    yazboz_web::i18n::set_lang("tr");
    let record = ledger::append_round(&seated(GameKind::Okey), &["12", "7"]).unwrap();
    let record = ledger::append_round(&record, &["3", "30"]).unwrap();
    let html = board(record);
    assert!(html.contains("Normal Okey"));
    assert!(html.contains("2 / 15 el"));
    assert!(html.contains("15"));
    assert!(html.contains("37"));
    assert!(html.contains("Eli ekle"));
    assert!(html.contains("Çıkış"));
    assert!(!html.contains("Ceza ekle"));
}

#[test]
fn penalty101_board_has_penalty_panel_and_final_row() {
    yazboz_web::i18n::set_lang("en");
    let record = ledger::append_round(&seated(GameKind::Penalty101), &["40", "10"]).unwrap();
    let record = ledger::add_penalty(&record, Some(1), "101").unwrap();
    let html = board(record);
    assert!(html.contains("Add penalty"));
    assert!(html.contains("Hands: 9"));
    assert!(html.contains("Final"));
    assert!(html.contains("111"));
    assert!(html.contains("x2"));
    yazboz_web::i18n::set_lang("tr");
}

#[test]
fn finished_game_shows_banner_and_hides_round_entry() {
    yazboz_web::i18n::set_lang("en");
    let record = ledger::set_target_score(&seated(GameKind::Pisti), "50").unwrap();
    let record = ledger::append_round(&record, &["20", "55"]).unwrap();
    let html = board(record);
    assert!(html.contains("Game over!"));
    assert!(html.contains("Winner: Veli (55)"));
    assert!(!html.contains("Add round"));
    yazboz_web::i18n::set_lang("tr");
}

#[test]
fn pisti_board_offers_target_presets() {
    let record = ledger::set_target_score(&seated(GameKind::Pisti), "251").unwrap();
    let html = board(record);
    assert!(html.contains("target-presets"));
    for target in ["151", "351", "501"] {
        assert!(html.contains(target));
    }
    assert!(html.contains("target-preset active"));

    assert!(!board(seated(GameKind::Okey)).contains("target-presets"));
}

#[test]
fn drink_panel_formats_bill_by_game() {
    yazboz_web::i18n::set_lang("en");
    let record = ledger::add_drink(&seated(GameKind::Penalty101), "çay");
    let record = ledger::add_drink(&record, "çay");
    let record = ledger::set_drink_price(&record, "çay", "7.5").unwrap();
    assert!(board(record).contains("Bill: 15.00 ₺"));

    let record = ledger::add_drink(&seated(GameKind::Batak), "kola");
    let record = ledger::set_drink_price(&record, "kola", "20").unwrap();
    assert!(board(record).contains("Bill: 20 ₺"));
    yazboz_web::i18n::set_lang("tr");
}

#[test]
fn home_lists_saved_games_with_outcome() {
    yazboz_web::i18n::set_lang("en");
    let store = MemoryStore::new();
    let keeper = ScoreKeeper::new(store.clone());
    let table = keeper.start_table(GameKind::Pisti, &["Ali", "Veli"]).unwrap();
    let record = ledger::append_round(table.record(), &["151", "0"]).unwrap();
    let table = yazboz_core::Table::from_parts(store.clone(), record);
    table.save_to_archive(&SavedAt {
        millis: 1,
        date: "19.10.2026".into(),
        time: "21:30".into(),
    });

    let props = HomePageProps {
        active: keeper.active_kinds(),
        saved: keeper.saved_games(),
        current_lang: "en".into(),
        on_continue: Callback::noop(),
        on_new: Callback::noop(),
        on_resume: Callback::noop(),
        on_delete: Callback::noop(),
        on_lang_change: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<HomePage>::with_props(props).render());
    assert!(html.contains("Continue"));
    assert!(html.contains("19.10.2026 21:30"));
    assert!(html.contains("Winner: Ali"));
    assert!(html.contains("Ali, Veli"));
    yazboz_web::i18n::set_lang("tr");
}

#[test]
fn setup_page_shows_errors() {
    yazboz_web::i18n::set_lang("tr");
    let message = setup_error_message(&SetupError::BlankName(1));
    let props = SetupPageProps {
        kind: GameKind::Penalty101,
        error: Some(message.clone().into()),
        on_start: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<SetupPage>::with_props(props).render());
    assert!(html.contains("Cezalı 101 için oyuncular"));
    assert!(html.contains(&message));
    assert_eq!(
        setup_error_message(&SetupError::PlayerCount {
            count: 1,
            min: 2,
            max: 6
        }),
        "Oyuncu sayısı 2 ile 6 arasında olmalı."
    );
}

#[test]
fn not_found_renders_back_link() {
    yazboz_web::i18n::set_lang("en");
    let props = NotFoundProps {
        on_go_home: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NotFound>::with_props(props).render());
    assert!(html.contains("Back to home"));
    yazboz_web::i18n::set_lang("tr");
}
