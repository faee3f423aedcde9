use crate::components::saved_games::SavedGames;
use crate::i18n::{locales, t};
use web_sys::HtmlSelectElement;
use yazboz_core::{ArchivedGame, GameKind};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct HomePageProps {
    /// Games with a session in progress.
    pub active: Vec<GameKind>,
    pub saved: Vec<ArchivedGame>,
    pub current_lang: String,
    pub on_continue: Callback<GameKind>,
    pub on_new: Callback<GameKind>,
    pub on_resume: Callback<String>,
    pub on_delete: Callback<String>,
    pub on_lang_change: Callback<String>,
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let cards = GameKind::ALL.into_iter().map(|kind| {
        let on_new = {
            let cb = props.on_new.clone();
            Callback::from(move |_| cb.emit(kind))
        };
        let on_continue = {
            let cb = props.on_continue.clone();
            Callback::from(move |_| cb.emit(kind))
        };
        html! {
            <li class="game-card" data-game={kind.slug()}>
                <h3>{ kind.display_name() }</h3>
                if props.active.contains(&kind) {
                    <button type="button" class="primary" onclick={on_continue}>
                        { t("home.continue") }
                    </button>
                }
                <button type="button" onclick={on_new}>{ t("home.new") }</button>
            </li>
        }
    });

    let on_lang = {
        let cb = props.on_lang_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            cb.emit(select.value());
        })
    };
    let options = locales().iter().map(|meta| {
        html! {
            <option value={meta.code} selected={meta.code == props.current_lang}>{ meta.name }</option>
        }
    });

    html! {
        <main class="home">
            <header>
                <h1>{ t("app.title") }</h1>
                <label class="lang-select">
                    <span>{ t("app.language") }</span>
                    <select onchange={on_lang}>{ for options }</select>
                </label>
            </header>
            <section>
                <h2>{ t("home.tables") }</h2>
                <ul class="game-cards">{ for cards }</ul>
            </section>
            <section>
                <h2>{ t("home.saved") }</h2>
                <SavedGames games={props.saved.clone()}
                    on_resume={props.on_resume.clone()}
                    on_delete={props.on_delete.clone()} />
            </section>
        </main>
    }
}
