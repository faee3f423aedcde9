use crate::i18n::t;
use crate::scoreboard::ScoreAction;
use web_sys::HtmlInputElement;
use yazboz_core::{GameKind, RoundDraft, presets};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct RoundEntryProps {
    pub kind: GameKind,
    pub players: Vec<String>,
    pub draft: RoundDraft,
    pub on_action: Callback<ScoreAction>,
}

#[function_component(RoundEntry)]
pub fn round_entry(props: &RoundEntryProps) -> Html {
    let quick = presets(props.kind);

    let fields = props.players.iter().enumerate().map(|(player, name)| {
        let oninput = {
            let cb = props.on_action.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                cb.emit(ScoreAction::SetEntry {
                    player,
                    text: input.value(),
                });
            })
        };
        let buttons = quick.iter().map(|preset| {
            let cb = props.on_action.clone();
            let entry = preset.entry;
            let onclick = Callback::from(move |_| cb.emit(ScoreAction::Quick { player, entry }));
            html! { <button type="button" class="quick" {onclick}>{ t(preset.key) }</button> }
        });
        html! {
            <div class="entry-field">
                <label>
                    <span>{ name.clone() }</span>
                    <input type="text" inputmode="numeric"
                        value={props.draft.entry(player).unwrap_or_default().to_string()}
                        {oninput} />
                </label>
                if !quick.is_empty() {
                    <div class="quick-row">{ for buttons }</div>
                }
            </div>
        }
    });

    let on_add = {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(ScoreAction::AppendRound))
    };

    html! {
        <section class="round-entry">
            { for fields }
            <button type="button" class="primary" onclick={on_add}>
                { t("scoreboard.add_round") }
            </button>
        </section>
    }
}
