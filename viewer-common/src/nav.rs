//! Menu button routes.

use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    /// DOM id of the button.
    pub id: &'static str,
    /// Relative URL the page is redirected to on click.
    pub href: &'static str,
}

pub const ROUTES: [Route; 6] = [
    Route {
        id: "buttonBACK",
        href: "../index.html",
    },
    Route {
        id: "button1",
        href: "podsite/puzzles.html",
    },
    Route {
        id: "button2",
        href: "podsite/play.html",
    },
    Route {
        id: "button3",
        href: "../tasks/task1.html",
    },
    Route {
        id: "button4",
        href: "../tasks/task2.html",
    },
    Route {
        id: "button5",
        href: "../tasks/task3.html",
    },
];

/// Performs the page redirect.
pub trait Navigate {
    fn navigate(&self, href: &str) -> Result<()>;
}

impl Route {
    pub fn follow(&self, navigator: &dyn Navigate) -> Result<()> {
        log::debug!("{} clicked, navigating to {}", self.id, self.href);
        navigator.navigate(self.href)
    }
}

/// Look every route's element up once and keep the ones that exist.
/// Missing elements are skipped without logging.
pub fn resolve<E>(mut lookup: impl FnMut(&str) -> Option<E>) -> Vec<(Route, E)> {
    ROUTES
        .iter()
        .filter_map(|route| lookup(route.id).map(|element| (*route, element)))
        .collect()
}
