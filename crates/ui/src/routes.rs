use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{SessionsView, TestListView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", TestListView)] TestList {},
        #[route("/sessions", SessionsView)] Sessions {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Testdesk" }
            ul {
                li { Link { to: Route::TestList {}, "Tests" } }
                li { Link { to: Route::Sessions {}, "Sessions" } }
            }
        }
    }
}
