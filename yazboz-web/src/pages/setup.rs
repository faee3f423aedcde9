use crate::i18n::{t, tr, tr1};
use std::collections::BTreeMap;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yazboz_core::constants::{DEFAULT_PLAYER_COUNT, MAX_PLAYERS, MIN_PLAYERS};
use yazboz_core::{GameKind, SetupError};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SetupPageProps {
    pub kind: GameKind,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    /// Names for the chosen number of seats, untrimmed.
    pub on_start: Callback<Vec<String>>,
}

/// Localized text for a rejected player list.
#[must_use]
pub fn setup_error_message(err: &SetupError) -> String {
    match err {
        SetupError::PlayerCount { min, max, .. } => {
            let (min, max) = (min.to_string(), max.to_string());
            tr(
                "setup.error.count",
                Some(&BTreeMap::from([("min", min.as_str()), ("max", max.as_str())])),
            )
        }
        SetupError::BlankName(_) => t("setup.error.blank_name"),
    }
}

#[function_component(SetupPage)]
pub fn setup_page(props: &SetupPageProps) -> Html {
    let count = use_state(|| DEFAULT_PLAYER_COUNT);
    let names = use_state(|| vec![String::new(); MAX_PLAYERS]);

    let on_count = {
        let count = count.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(value) = select.value().parse::<usize>() {
                count.set(value.clamp(MIN_PLAYERS, MAX_PLAYERS));
            }
        })
    };

    let fields = (0..*count).map(|seat| {
        let oninput = {
            let names = names.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let mut next = (*names).clone();
                next[seat] = input.value();
                names.set(next);
            })
        };
        let label = tr1("setup.player_label", "n", &(seat + 1).to_string());
        html! {
            <label class="player-name">
                <span>{ label }</span>
                <input type="text" value={names[seat].clone()} {oninput} />
            </label>
        }
    });

    let options = (MIN_PLAYERS..=MAX_PLAYERS).map(|n| {
        html! { <option value={n.to_string()} selected={n == *count}>{ n }</option> }
    });

    let on_start = {
        let cb = props.on_start.clone();
        let names = names.clone();
        let count = *count;
        Callback::from(move |_| cb.emit(names[..count].to_vec()))
    };

    html! {
        <main class="setup">
            <h1>{ tr1("setup.title", "game", props.kind.display_name()) }</h1>
            <label>
                <span>{ t("setup.player_count") }</span>
                <select onchange={on_count}>{ for options }</select>
            </label>
            { for fields }
            if let Some(error) = props.error.clone() {
                <p class="error" role="alert">{ error }</p>
            }
            <button type="button" class="primary" onclick={on_start}>{ t("setup.start") }</button>
        </main>
    }
}
