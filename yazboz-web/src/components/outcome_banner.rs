use crate::i18n::{t, tr};
use std::collections::BTreeMap;
use yazboz_core::{Outcome, Standing};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct OutcomeBannerProps {
    pub outcome: Outcome,
    pub players: Vec<String>,
}

/// End-of-game line, rendered only once the game is decided.
#[function_component(OutcomeBanner)]
pub fn outcome_banner(props: &OutcomeBannerProps) -> Html {
    let Some(verdict) = props.outcome.verdict.filter(|_| props.outcome.finished) else {
        return html! {};
    };
    let name = props
        .players
        .get(verdict.player)
        .cloned()
        .unwrap_or_default();
    let score = verdict.score.to_string();
    let key = match verdict.standing {
        Standing::Winner => "outcome.winner",
        Standing::Loser => "outcome.loser",
    };
    let args = BTreeMap::from([("name", name.as_str()), ("score", score.as_str())]);

    html! {
        <div class="outcome-banner" role="status" aria-live="polite">
            <strong>{ t("outcome.over") }</strong>
            <span>{ tr(key, Some(&args)) }</span>
        </div>
    }
}
