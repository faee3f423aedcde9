use crate::components::{
    drink_panel::DrinkPanel, edit_panel::EditPanel, outcome_banner::OutcomeBanner,
    penalty_panel::PenaltyPanel, round_entry::RoundEntry, score_table::ScoreTable,
};
use crate::i18n::{t, tr, tr1};
use crate::scoreboard::{ScoreAction, ScoreboardState};
use std::collections::BTreeMap;
use yazboz_core::constants::{BATAK_ROUND_LIMIT, OKEY_ROUND_LIMIT, PISTI_TARGET_PRESETS};
use yazboz_core::{DrinkCatalog, EditTarget, GameKind, evaluate};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ScoreboardPageProps {
    pub state: ScoreboardState,
    pub catalog: DrinkCatalog,
    pub on_action: Callback<ScoreAction>,
}

fn action_button(on_action: &Callback<ScoreAction>, action: ScoreAction, key: &str, class: &'static str) -> Html {
    let cb = on_action.clone();
    let onclick = Callback::from(move |_| cb.emit(action.clone()));
    html! { <button type="button" class={class} {onclick}>{ t(key) }</button> }
}

fn progress(played: usize, limit: usize) -> String {
    let (played, limit) = (played.to_string(), limit.to_string());
    tr(
        "scoreboard.progress",
        Some(&BTreeMap::from([("played", played.as_str()), ("limit", limit.as_str())])),
    )
}

/// Threshold line under the title; editable thresholds open the edit panel.
fn threshold(state: &ScoreboardState, on_action: &Callback<ScoreAction>) -> Html {
    let record = &state.record;
    let editable = |target: EditTarget, text: String| {
        let cb = on_action.clone();
        let onclick = Callback::from(move |_| cb.emit(ScoreAction::BeginEdit(target)));
        html! { <button type="button" class="cell-edit" {onclick}>{ text }</button> }
    };
    match record.kind {
        GameKind::Okey => html! { <span>{ progress(record.round_count(), OKEY_ROUND_LIMIT) }</span> },
        GameKind::Batak => html! { <span>{ progress(record.round_count(), BATAK_ROUND_LIMIT) }</span> },
        GameKind::Pisti => {
            let presets = PISTI_TARGET_PRESETS.iter().map(|&target| {
                let cb = on_action.clone();
                let onclick = Callback::from(move |_| cb.emit(ScoreAction::SetTarget(target)));
                let class = if target == record.target_score { "target-preset active" } else { "target-preset" };
                html! { <button type="button" {class} {onclick}>{ target.to_string() }</button> }
            });
            html! {
                <>
                    { editable(
                        EditTarget::TargetScore,
                        tr1("scoreboard.target_score", "n", &record.target_score.to_string()),
                    ) }
                    <span class="target-presets">{ for presets }</span>
                </>
            }
        }
        GameKind::Penalty101 => editable(
            EditTarget::HandTarget,
            tr1("scoreboard.hand_target", "n", &record.hand_target.to_string()),
        ),
    }
}

#[function_component(ScoreboardPage)]
pub fn scoreboard_page(props: &ScoreboardPageProps) -> Html {
    let state = &props.state;
    let record = &state.record;
    let outcome = evaluate(record);

    html! {
        <main class="scoreboard" data-game={record.kind.slug()}>
            <header>
                <h1>{ record.kind.display_name() }</h1>
                { threshold(state, &props.on_action) }
            </header>
            <OutcomeBanner outcome={outcome.clone()} players={record.players.clone()} />
            if let Some(notice) = state.notice.clone() {
                <p class="notice" role="alert">{ notice }</p>
            }
            <ScoreTable record={record.clone()} on_action={props.on_action.clone()} />
            if !outcome.finished {
                <RoundEntry kind={record.kind} players={record.players.clone()}
                    draft={state.draft.clone()} on_action={props.on_action.clone()} />
            }
            if record.kind.has_penalties() {
                <PenaltyPanel players={record.players.clone()}
                    penalties={record.penalties.clone()}
                    selected={state.penalty_player}
                    amount={state.penalty_text.clone()}
                    on_action={props.on_action.clone()} />
            }
            if let Some(edit) = state.edit.clone() {
                <EditPanel {edit} on_action={props.on_action.clone()} />
            }
            <DrinkPanel catalog={props.catalog.clone()}
                counts={record.drink_counts.clone()}
                prices={record.drink_prices.clone()}
                fractional={record.kind.allows_fractional_prices()}
                on_action={props.on_action.clone()} />
            <nav class="controls">
                { action_button(&props.on_action, ScoreAction::NewGame, "scoreboard.new_game", "") }
                { action_button(&props.on_action, ScoreAction::Save, "scoreboard.save", "primary") }
                { action_button(&props.on_action, ScoreAction::Exit, "scoreboard.exit", "danger") }
            </nav>
        </main>
    }
}
