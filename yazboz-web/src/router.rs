use yazboz_core::GameKind;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/oyun/:slug")]
    Setup { slug: String },
    #[at("/oyun/:slug/skor")]
    Scoreboard { slug: String },
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub fn setup(kind: GameKind) -> Self {
        Self::Setup {
            slug: kind.slug().to_string(),
        }
    }

    #[must_use]
    pub fn scoreboard(kind: GameKind) -> Self {
        Self::Scoreboard {
            slug: kind.slug().to_string(),
        }
    }

    /// Game addressed by this route; unknown slugs resolve to `None`.
    #[must_use]
    pub fn game(&self) -> Option<GameKind> {
        match self {
            Self::Setup { slug } | Self::Scoreboard { slug } => GameKind::from_slug(slug),
            Self::Home | Self::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_round_trip_through_paths() {
        for kind in GameKind::ALL {
            let setup = Route::setup(kind);
            let board = Route::scoreboard(kind);
            assert_eq!(Route::recognize(&setup.to_path()), Some(setup.clone()));
            assert_eq!(Route::recognize(&board.to_path()), Some(board.clone()));
            assert_eq!(setup.game(), Some(kind));
            assert_eq!(board.game(), Some(kind));
        }
        assert_eq!(Route::scoreboard(GameKind::Penalty101).to_path(), "/oyun/cezali-101/skor");
    }

    #[test]
    fn unknown_slugs_have_no_game() {
        let route = Route::Setup {
            slug: "tavla".into(),
        };
        assert_eq!(route.game(), None);
        assert_eq!(Route::Home.game(), None);
    }
}
