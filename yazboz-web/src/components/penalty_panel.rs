use crate::i18n::t;
use crate::scoreboard::ScoreAction;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yazboz_core::EditTarget;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct PenaltyPanelProps {
    pub players: Vec<String>,
    pub penalties: Vec<Vec<i64>>,
    pub selected: Option<usize>,
    pub amount: String,
    pub on_action: Callback<ScoreAction>,
}

/// Penalty entry and per-player penalty lists (Cezalı 101).
#[function_component(PenaltyPanel)]
pub fn penalty_panel(props: &PenaltyPanelProps) -> Html {
    let on_select = {
        let cb = props.on_action.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            cb.emit(ScoreAction::SelectPenaltyPlayer(select.value().parse().ok()));
        })
    };
    let on_amount = {
        let cb = props.on_action.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(ScoreAction::PenaltyText(input.value()));
        })
    };
    let on_add = {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(ScoreAction::AddPenalty))
    };

    let options = props.players.iter().enumerate().map(|(player, name)| {
        html! {
            <option value={player.to_string()} selected={props.selected == Some(player)}>
                { name.clone() }
            </option>
        }
    });

    let lists = props.players.iter().enumerate().map(|(player, name)| {
        let entries = props
            .penalties
            .get(player)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, amount)| {
                let edit = {
                    let cb = props.on_action.clone();
                    Callback::from(move |_| {
                        cb.emit(ScoreAction::BeginEdit(EditTarget::Penalty { player, index }));
                    })
                };
                let delete = {
                    let cb = props.on_action.clone();
                    Callback::from(move |_| cb.emit(ScoreAction::DeletePenalty { player, index }))
                };
                html! {
                    <li>
                        <button type="button" class="cell-edit" onclick={edit}>{ amount }</button>
                        <button type="button" class="danger" onclick={delete}>{ t("penalty.delete") }</button>
                    </li>
                }
            });
        html! {
            <div class="penalty-list">
                <h4>{ name.clone() }</h4>
                <ul>{ for entries }</ul>
            </div>
        }
    });

    html! {
        <section class="penalty-panel">
            <h3>{ t("penalty.title") }</h3>
            <select onchange={on_select}>
                <option value="" selected={props.selected.is_none()}>{ t("penalty.select_player") }</option>
                { for options }
            </select>
            <input type="text" inputmode="numeric" placeholder={t("penalty.amount")}
                value={props.amount.clone()} oninput={on_amount} />
            <button type="button" onclick={on_add}>{ t("penalty.add") }</button>
            <div class="penalty-lists">{ for lists }</div>
        </section>
    }
}
