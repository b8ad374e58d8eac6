use dioxus::prelude::*;

use testdesk_core::model::{TestId, TestResult};

use crate::context::AppContext;
use crate::vm::{
    Notice, OptionVm, TestListVm, TestRowVm, map_group_options, map_sub_group_options,
    map_test_rows,
};

#[component]
pub fn TestListView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let test_cases = ctx.test_cases();
    let sessions = ctx.sessions();
    let user = ctx.current_user().cloned();
    let policy = ctx.session_error_policy();

    let mut vm = use_signal(TestListVm::new);
    let mut notice = use_signal(|| None::<Notice>);
    let mut new_use_case = use_signal(String::new);
    let mut new_description = use_signal(String::new);

    let generation = use_memo(move || vm.read().reload_generation());
    let _loader = use_resource(move || {
        let catalog = catalog.clone();
        let _ = generation();
        async move {
            let ticket = vm.write().begin_load();
            let result = catalog.load().await;
            vm.write().finish_load(ticket, result);
        }
    });

    let on_result = use_callback(move |(id, result): (TestId, TestResult)| {
        vm.write().edit_result(&id, result);
    });

    let on_observation = use_callback(move |(id, observation): (TestId, String)| {
        vm.write().edit_observation(&id, observation);
    });

    let on_save = {
        let test_cases = test_cases.clone();
        use_callback(move |id: TestId| {
            let test_cases = test_cases.clone();
            let Some(test) = vm.read().test(&id).cloned() else {
                return;
            };
            spawn(async move {
                let observation = Some(test.observation().to_owned());
                let result = test_cases.save(test.id(), test.result().clone(), observation).await;
                let shown = vm.read().finish_save(result);
                notice.set(Some(shown));
            });
        })
    };

    let on_delete = {
        let test_cases = test_cases.clone();
        use_callback(move |id: TestId| {
            let test_cases = test_cases.clone();
            vm.write().begin_delete();
            spawn(async move {
                let result = test_cases.delete(&id).await;
                let shown = vm.write().finish_delete(result);
                notice.set(Some(shown));
            });
        })
    };

    let on_reset = move |_: MouseEvent| vm.write().reset_all();

    let on_start_session = {
        let technician = user.as_ref().map(|u| u.id.clone());
        move |_: MouseEvent| {
            let sessions = sessions.clone();
            let session = vm.read().build_session(technician.clone());
            spawn(async move {
                let result = sessions.start_session(&session).await;
                let shown = vm.write().finish_start_session(session, result, policy);
                if let Some(shown) = shown {
                    notice.set(Some(shown));
                }
            });
        }
    };

    let on_create = move |evt: FormEvent| {
        evt.prevent_default();
        let test_cases = test_cases.clone();
        let (Some(group), Some(sub_group)) = (
            vm.read().selected_group().cloned(),
            vm.read().selected_sub_group().cloned(),
        ) else {
            return;
        };
        let use_case = new_use_case.read().clone();
        let description = Some(new_description.read().trim().to_owned()).filter(|d| !d.is_empty());
        vm.write().begin_create();
        spawn(async move {
            let result = test_cases.create(group, sub_group, use_case, description).await;
            if result.is_ok() {
                new_use_case.set(String::new());
                new_description.set(String::new());
            }
            let shown = vm.write().finish_create(result);
            notice.set(Some(shown));
        });
    };

    let (groups, sub_groups, rows, selected_group, selected_sub_group, loading) = {
        let state = vm.read();
        (
            map_group_options(state.groups()),
            map_sub_group_options(state.eligible_sub_groups()),
            map_test_rows(&state.filtered_tests(), state.groups(), state.sub_groups()),
            state.selected_group().map(ToString::to_string).unwrap_or_default(),
            state.selected_sub_group().map(ToString::to_string).unwrap_or_default(),
            state.is_loading(),
        )
    };
    let has_group = !selected_group.is_empty();
    let has_sub_group = !selected_sub_group.is_empty();
    let can_edit = user.is_some();
    let can_delete = user.as_ref().is_some_and(|u| u.admin);

    rsx! {
        div { class: "page",
            h2 { "Tests" }

            if let Some(current) = notice() {
                div { class: current.css_class(), role: "status",
                    span { "{current.message}" }
                    button {
                        class: "notice-dismiss",
                        onclick: move |_| notice.set(None),
                        "Dismiss"
                    }
                }
            }

            div { class: "filters",
                FilterSelect {
                    id: "group-filter",
                    placeholder: "All groups",
                    options: groups,
                    selected: selected_group,
                    disabled: false,
                    on_change: move |value: String| vm.write().select_group(value.parse().ok()),
                }
                FilterSelect {
                    id: "sub-group-filter",
                    placeholder: "All subgroups",
                    options: sub_groups,
                    selected: selected_sub_group,
                    disabled: !has_group,
                    on_change: move |value: String| vm.write().select_sub_group(value.parse().ok()),
                }
                if loading {
                    span { class: "loading", "Loading..." }
                }
            }

            div { class: "toolbar",
                button {
                    id: "reset-all",
                    disabled: !can_edit,
                    onclick: on_reset,
                    "Reset all"
                }
                button {
                    id: "start-session",
                    class: "primary",
                    disabled: !can_edit || !has_sub_group,
                    onclick: on_start_session,
                    "Start test session"
                }
            }

            if rows.is_empty() {
                p { class: "empty", "No tests match the selected filters." }
            } else {
                table { class: "tests",
                    thead {
                        tr {
                            th { "Group" }
                            th { "Use case" }
                            th { "Result" }
                            th { "Observation" }
                            th { "Actions" }
                        }
                    }
                    tbody {
                        for row in rows {
                            TestRow {
                                key: "{row.id}",
                                row: row.clone(),
                                can_edit,
                                can_delete,
                                on_result,
                                on_observation,
                                on_save,
                                on_delete,
                            }
                        }
                    }
                }
            }

            if can_edit && has_sub_group {
                form { class: "new-test", onsubmit: on_create,
                    h3 { "Add test" }
                    input {
                        id: "new-use-case",
                        placeholder: "Use case",
                        value: "{new_use_case}",
                        oninput: move |evt| new_use_case.set(evt.value()),
                    }
                    textarea {
                        id: "new-description",
                        placeholder: "Description",
                        value: "{new_description}",
                        oninput: move |evt| new_description.set(evt.value()),
                    }
                    button { r#type: "submit", "Add" }
                }
            }
        }
    }
}

#[component]
fn FilterSelect(
    id: &'static str,
    placeholder: &'static str,
    options: Vec<OptionVm>,
    selected: String,
    disabled: bool,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        select {
            id,
            disabled,
            onchange: move |evt| on_change.call(evt.value()),
            option { value: "", selected: selected.is_empty(), "{placeholder}" }
            for opt in options {
                option {
                    key: "{opt.value}",
                    value: "{opt.value}",
                    selected: opt.value == selected,
                    "{opt.label}"
                }
            }
        }
    }
}

#[component]
fn TestRow(
    row: TestRowVm,
    can_edit: bool,
    can_delete: bool,
    on_result: EventHandler<(TestId, TestResult)>,
    on_observation: EventHandler<(TestId, String)>,
    on_save: EventHandler<TestId>,
    on_delete: EventHandler<TestId>,
) -> Element {
    let result_id = row.id.clone();
    let observation_id = row.id.clone();
    let save_id = row.id.clone();
    let delete_id = row.id.clone();
    let current = row.result.label().to_owned();
    // Labels outside the known set are offered too, so the select shows them as stored.
    let choices: Vec<TestResult> = TestResult::ALL
        .into_iter()
        .chain(row.result.is_other().then(|| row.result.clone()))
        .collect();

    rsx! {
        tr { class: "test-row",
            td { "{row.scope}" }
            td {
                span { class: "use-case", "{row.use_case}" }
                if let Some(description) = row.description.as_ref() {
                    p { class: "description", "{description}" }
                }
            }
            td {
                select {
                    disabled: !can_edit,
                    onchange: move |evt| {
                        if let Ok(result) = evt.value().parse::<TestResult>() {
                            on_result.call((result_id.clone(), result));
                        }
                    },
                    for choice in choices {
                        option {
                            value: "{choice}",
                            selected: choice.label() == current,
                            "{choice}"
                        }
                    }
                }
            }
            td {
                textarea {
                    disabled: !can_edit,
                    value: "{row.observation}",
                    oninput: move |evt| on_observation.call((observation_id.clone(), evt.value())),
                }
            }
            td { class: "actions",
                button {
                    disabled: !can_edit,
                    onclick: move |_| on_save.call(save_id.clone()),
                    "Save"
                }
                if can_delete {
                    button {
                        class: "danger",
                        onclick: move |_| on_delete.call(delete_id.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}
