//! Route switch and the containers that bind pages to browser storage.

use crate::clock;
use crate::i18n;
use crate::pages::{
    home::HomePage,
    not_found::NotFound,
    scoreboard::ScoreboardPage,
    setup::{SetupPage, setup_error_message},
};
use crate::router::Route;
use crate::scoreboard::{Effect, ScoreAction, ScoreboardState};
use crate::storage::BrowserStore;
use yazboz_core::{DrinkCatalog, GameKind, ScoreKeeper};
use yew::prelude::*;
use yew_router::prelude::*;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

/// Map a route to its container. Unknown game slugs fall through to 404.
#[must_use]
pub fn switch(route: Route) -> Html {
    match (&route, route.game()) {
        (Route::Home, _) => html! { <HomeContainer /> },
        (Route::Setup { slug }, Some(kind)) => html! { <SetupContainer key={slug.clone()} {kind} /> },
        (Route::Scoreboard { slug }, Some(kind)) => {
            html! { <ScoreboardContainer key={slug.clone()} {kind} /> }
        }
        _ => html! { <NotFoundContainer /> },
    }
}

fn push(navigator: Option<&Navigator>, route: &Route) {
    if let Some(nav) = navigator {
        nav.push(route);
    }
}

#[function_component(HomeContainer)]
pub fn home_container() -> Html {
    let navigator = use_navigator();
    // Bumped to re-read storage after a delete or a language switch
    let revision = use_state(|| 0_u32);
    let keeper = ScoreKeeper::new(BrowserStore);
    let bump = {
        let revision = revision.clone();
        move || revision.set(revision.wrapping_add(1))
    };

    let on_continue = {
        let navigator = navigator.clone();
        Callback::from(move |kind: GameKind| push(navigator.as_ref(), &Route::scoreboard(kind)))
    };
    let on_new = {
        let navigator = navigator.clone();
        Callback::from(move |kind: GameKind| push(navigator.as_ref(), &Route::setup(kind)))
    };
    let on_resume = {
        let navigator = navigator.clone();
        Callback::from(move |id: String| {
            match ScoreKeeper::new(BrowserStore).resume_saved(&id) {
                Ok(table) => push(navigator.as_ref(), &Route::scoreboard(table.kind())),
                Err(err) => log::warn!("could not resume saved game: {err}"),
            }
        })
    };
    let on_delete = {
        let bump = bump.clone();
        Callback::from(move |id: String| {
            ScoreKeeper::new(BrowserStore).delete_saved(&id);
            bump();
        })
    };
    let on_lang_change = Callback::from(move |lang: String| {
        i18n::set_lang(&lang);
        bump();
    });

    html! {
        <HomePage active={keeper.active_kinds()}
            saved={keeper.saved_games()}
            current_lang={i18n::current_lang()}
            {on_continue} {on_new} {on_resume} {on_delete} {on_lang_change} />
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct TableProps {
    pub kind: GameKind,
}

#[function_component(SetupContainer)]
pub fn setup_container(props: &TableProps) -> Html {
    let kind = props.kind;
    let navigator = use_navigator();
    let error = use_state(|| None::<AttrValue>);

    let on_start = {
        let error = error.clone();
        Callback::from(move |names: Vec<String>| {
            match ScoreKeeper::new(BrowserStore).start_table(kind, &names) {
                Ok(_) => push(navigator.as_ref(), &Route::scoreboard(kind)),
                Err(err) => error.set(Some(setup_error_message(&err).into())),
            }
        })
    };

    html! { <SetupPage {kind} error={(*error).clone()} {on_start} /> }
}

#[function_component(ScoreboardContainer)]
pub fn scoreboard_container(props: &TableProps) -> Html {
    let kind = props.kind;
    let navigator = use_navigator();
    let state = use_state(move || ScoreboardState::load(BrowserStore, kind));
    let catalog = use_memo((), |_| DrinkCatalog::load_default());

    let Some(current) = (*state).clone() else {
        log::debug!("no stored {kind} table, back to the landing page");
        return html! { <Redirect<Route> to={Route::Home} /> };
    };

    let on_action = {
        let state = state.clone();
        Callback::from(move |action: ScoreAction| {
            let Some(mut next) = (*state).clone() else {
                return;
            };
            match next.dispatch(BrowserStore, action, clock::now) {
                Effect::None => state.set(Some(next)),
                Effect::LeaveTable => {
                    push(navigator.as_ref(), &Route::Home);
                    state.set(None);
                }
            }
        })
    };

    html! { <ScoreboardPage state={current} catalog={(*catalog).clone()} {on_action} /> }
}

#[function_component(NotFoundContainer)]
fn not_found_container() -> Html {
    let navigator = use_navigator();
    let on_go_home = Callback::from(move |()| push(navigator.as_ref(), &Route::Home));
    html! { <NotFound {on_go_home} /> }
}
