use crate::i18n::t;
use crate::scoreboard::ScoreAction;
use yazboz_core::{EditTarget, SessionRecord, final_scores, penalty_totals, round_totals};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ScoreTableProps {
    pub record: SessionRecord,
    pub on_action: Callback<ScoreAction>,
}

fn edit_cb(on_action: &Callback<ScoreAction>, target: EditTarget) -> Callback<MouseEvent> {
    let cb = on_action.clone();
    Callback::from(move |_| cb.emit(ScoreAction::BeginEdit(target)))
}

fn totals_row(label: String, values: &[i64], class: &'static str) -> Html {
    html! {
        <tr class={class}>
            <th scope="row">{ label }</th>
            { for values.iter().map(|value| html! { <td>{ value }</td> }) }
        </tr>
    }
}

/// Round-by-round grid. Clicking a name or a score opens it for editing.
#[function_component(ScoreTable)]
pub fn score_table(props: &ScoreTableProps) -> Html {
    let record = &props.record;
    let players = record.player_count();

    let header = record.players.iter().enumerate().map(|(player, name)| {
        html! {
            <th scope="col">
                <button type="button" class="cell-edit"
                    onclick={edit_cb(&props.on_action, EditTarget::Name { player })}>
                    { name.clone() }
                </button>
            </th>
        }
    });

    let rows = (0..record.round_count()).map(|round| {
        html! {
            <tr>
                <th scope="row">{ round + 1 }</th>
                { for (0..players).map(|player| {
                    let value = record.rounds[player][round];
                    html! {
                        <td>
                            <button type="button" class="cell-edit"
                                onclick={edit_cb(&props.on_action, EditTarget::Score { player, round })}>
                                { value }
                            </button>
                        </td>
                    }
                }) }
            </tr>
        }
    });

    let footer = if record.kind.has_penalties() {
        html! {
            <>
                { totals_row(t("scoreboard.total"), &round_totals(&record.rounds), "totals") }
                { totals_row(t("scoreboard.penalties"), &penalty_totals(&record.penalties), "penalties") }
                { totals_row(t("scoreboard.final"), &final_scores(&record.rounds, &record.penalties), "final") }
            </>
        }
    } else {
        totals_row(t("scoreboard.total"), &round_totals(&record.rounds), "totals")
    };

    html! {
        <table class="score-table">
            <thead>
                <tr>
                    <th scope="col">{ t("scoreboard.round") }</th>
                    { for header }
                </tr>
            </thead>
            <tbody>{ for rows }</tbody>
            <tfoot>{ footer }</tfoot>
        </table>
    }
}
