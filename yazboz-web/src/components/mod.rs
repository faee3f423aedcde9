pub mod drink_panel;
pub mod edit_panel;
pub mod outcome_banner;
pub mod penalty_panel;
pub mod round_entry;
pub mod saved_games;
pub mod score_table;
