use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SessionRowVm, map_session_rows};

#[derive(Clone, Debug, PartialEq)]
struct SessionsData {
    rows: Vec<SessionRowVm>,
}

#[component]
pub fn SessionsView() -> Element {
    let ctx = use_context::<AppContext>();
    let sessions = ctx.sessions();

    let resource = use_resource(move || {
        let sessions = sessions.clone();
        async move {
            let items = sessions.list_sessions().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(SessionsData {
                rows: map_session_rows(&items),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Sessions" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.rows.is_empty() {
                        p { "No sessions started yet." }
                    } else {
                        table { class: "sessions",
                            thead {
                                tr {
                                    th { "Started" }
                                    th { "Group" }
                                    th { "Subgroup" }
                                    th { "Technician" }
                                    th { "Tests" }
                                }
                            }
                            tbody {
                                for row in data.rows {
                                    SessionRow { key: "{row.id}", row: row.clone() }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn SessionRow(row: SessionRowVm) -> Element {
    rsx! {
        tr {
            td { "{row.created_at_str}" }
            td { "{row.group}" }
            td { "{row.sub_group}" }
            td { "{row.technician}" }
            td { "{row.test_count}" }
        }
    }
}
