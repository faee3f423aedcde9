use crate::i18n::{t, tr};
use std::collections::BTreeMap;
use yazboz_core::{ArchivedGame, Standing};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SavedGamesProps {
    pub games: Vec<ArchivedGame>,
    pub on_resume: Callback<String>,
    pub on_delete: Callback<String>,
}

fn outcome_line(game: &ArchivedGame) -> String {
    let verdict = game
        .outcome()
        .filter(|outcome| outcome.finished)
        .and_then(|outcome| outcome.verdict);
    match verdict {
        Some(verdict) => {
            let name = game.players.get(verdict.player).map_or("", String::as_str);
            let key = match verdict.standing {
                Standing::Winner => "home.winner",
                Standing::Loser => "home.loser",
            };
            tr(key, Some(&BTreeMap::from([("name", name)])))
        }
        None => t("home.in_progress"),
    }
}

#[function_component(SavedGames)]
pub fn saved_games(props: &SavedGamesProps) -> Html {
    if props.games.is_empty() {
        return html! { <p class="empty">{ t("home.no_saved") }</p> };
    }

    // Newest first.
    let items = props.games.iter().rev().map(|game| {
        let on_resume = {
            let cb = props.on_resume.clone();
            let id = game.id.clone();
            Callback::from(move |_| cb.emit(id.clone()))
        };
        let on_delete = {
            let cb = props.on_delete.clone();
            let id = game.id.clone();
            Callback::from(move |_| cb.emit(id.clone()))
        };
        let stamp = tr(
            "home.saved_at",
            Some(&BTreeMap::from([
                ("date", game.saved_date.as_str()),
                ("time", game.saved_time.as_str()),
            ])),
        );
        html! {
            <li class="saved-game">
                <div>
                    <strong>{ game.game_name.clone() }</strong>
                    <small>{ stamp }</small>
                </div>
                <p>{ game.players.join(", ") }</p>
                <p class="saved-outcome">{ outcome_line(game) }</p>
                <button type="button" onclick={on_resume}>{ t("home.resume") }</button>
                <button type="button" class="danger" onclick={on_delete}>{ t("home.delete") }</button>
            </li>
        }
    });

    html! { <ul class="saved-games">{ for items }</ul> }
}
