use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{
    AppServices, CatalogService, SessionService, StaticCredentials, TestCaseService,
};
use storage::repository::{InMemoryRepository, Storage};
use testdesk_core::model::{
    CurrentUser, Group, GroupId, SubGroup, SubGroupId, TestCase, TestId, TestResult, UserId,
};

use crate::context::{UiApp, build_app_context};
use crate::views::{SessionsView, TestListView};
use crate::vm::SessionErrorPolicy;

#[derive(Clone)]
struct TestApp {
    user: Option<CurrentUser>,
    services: AppServices,
}

impl UiApp for TestApp {
    fn current_user(&self) -> Option<CurrentUser> {
        self.user.clone()
    }

    fn session_error_policy(&self) -> SessionErrorPolicy {
        SessionErrorPolicy::NotifyUser
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn test_cases(&self) -> Arc<TestCaseService> {
        self.services.test_cases()
    }

    fn sessions(&self) -> Arc<SessionService> {
        self.services.sessions()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    TestList,
    Sessions,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    match props.view {
        ViewKind::TestList => rsx! { TestListView {} },
        ViewKind::Sessions => rsx! { SessionsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Two groups, one subgroup each, one test per subgroup.
pub fn seeded_repo() -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    repo.seed(
        vec![
            Group::new(GroupId::new("g1"), "Web"),
            Group::new(GroupId::new("g2"), "Mobile"),
        ],
        vec![
            SubGroup::new(SubGroupId::new("s1"), "Login", Some(GroupId::new("g1"))),
            SubGroup::new(SubGroupId::new("s2"), "Checkout", Some(GroupId::new("g2"))),
        ],
        vec![
            TestCase::new(
                TestId::new("t1"),
                GroupId::new("g1"),
                SubGroupId::new("s1"),
                "User signs in",
            ),
            TestCase::new(
                TestId::new("t2"),
                GroupId::new("g2"),
                SubGroupId::new("s2"),
                "User pays by card",
            )
            .with_description(Some("Visa only".into()))
            .with_result(TestResult::Other("Pendente".into())),
        ],
    )
    .expect("seed repo");
    repo
}

pub fn technician(admin: bool) -> CurrentUser {
    CurrentUser::new(UserId::new("u1"), admin)
}

pub fn setup_view_harness(
    view: ViewKind,
    repo: InMemoryRepository,
    user: Option<CurrentUser>,
    credentials: StaticCredentials,
) -> ViewHarness {
    let storage = Storage::from_memory(&repo);
    let services = AppServices::from_storage(&storage, Arc::new(credentials));
    let app = Arc::new(TestApp { user, services });
    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app, view });
    ViewHarness { dom, repo }
}
