use services::{Catalog, CatalogError, SessionServiceError, TestCaseServiceError};
use testdesk_core::model::{
    Group, GroupId, NewSession, Session, SubGroup, SubGroupId, TestCase, TestId, TestResult,
    UserId,
};

use crate::vm::notice::Notice;

/// Identifies one reference-data load.
///
/// Tickets increase monotonically; only the latest one may apply its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// A newer load was started after this one; its result was dropped.
    Superseded,
}

/// What to do when starting a session fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionErrorPolicy {
    /// Log and show an error notice, like save and delete do.
    #[default]
    NotifyUser,
    /// Log only; the user is not told.
    LogOnly,
}

/// Returns the subgroups whose parent is `group`.
#[must_use]
pub fn eligible_sub_groups(sub_groups: &[SubGroup], group: Option<&GroupId>) -> Vec<SubGroup> {
    let Some(group) = group else {
        return Vec::new();
    };
    sub_groups
        .iter()
        .filter(|sub| sub.belongs_to(group))
        .cloned()
        .collect()
}

/// A test passes when it matches every filter that is set.
#[must_use]
pub fn test_matches(
    test: &TestCase,
    group: Option<&GroupId>,
    sub_group: Option<&SubGroupId>,
) -> bool {
    group.is_none_or(|g| test.group_id() == g)
        && sub_group.is_none_or(|sg| test.sub_group_id() == sg)
}

/// State of the test list screen.
///
/// Field edits stay local until an explicit save. Reloads are driven by the
/// stale flag: every change to it bumps `reload_generation`, which the view
/// watches.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestListVm {
    tests: Vec<TestCase>,
    groups: Vec<Group>,
    sub_groups: Vec<SubGroup>,
    selected_group: Option<GroupId>,
    selected_sub_group: Option<SubGroupId>,
    // Cached for `selected_group`; refreshed only when its inputs change.
    eligible: Vec<SubGroup>,
    loading: bool,
    stale: bool,
    reload_generation: u64,
    latest_load: u64,
    active_session: Option<NewSession>,
}

impl TestListVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn sub_groups(&self) -> &[SubGroup] {
        &self.sub_groups
    }

    #[must_use]
    pub fn selected_group(&self) -> Option<&GroupId> {
        self.selected_group.as_ref()
    }

    #[must_use]
    pub fn selected_sub_group(&self) -> Option<&SubGroupId> {
        self.selected_sub_group.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    #[must_use]
    pub fn reload_generation(&self) -> u64 {
        self.reload_generation
    }

    #[must_use]
    pub fn active_session(&self) -> Option<&NewSession> {
        self.active_session.as_ref()
    }

    #[must_use]
    pub fn test(&self, id: &TestId) -> Option<&TestCase> {
        self.tests.iter().find(|test| test.id() == id)
    }

    // ─── Filters ───────────────────────────────────────────────────────────────

    /// Select a group, or clear the selection with `None`.
    ///
    /// A subgroup selection that does not belong to the new group is cleared.
    pub fn select_group(&mut self, group: Option<GroupId>) {
        if self.selected_group == group {
            return;
        }
        self.selected_group = group;
        self.refresh_eligible();
        let keep_sub_group = self
            .selected_sub_group
            .as_ref()
            .is_some_and(|sg| self.eligible.iter().any(|sub| &sub.id == sg));
        if !keep_sub_group {
            self.selected_sub_group = None;
        }
    }

    pub fn select_sub_group(&mut self, sub_group: Option<SubGroupId>) {
        self.selected_sub_group = sub_group;
    }

    #[must_use]
    pub fn eligible_sub_groups(&self) -> &[SubGroup] {
        &self.eligible
    }

    #[must_use]
    pub fn filtered_tests(&self) -> Vec<&TestCase> {
        self.tests
            .iter()
            .filter(|test| {
                test_matches(
                    test,
                    self.selected_group.as_ref(),
                    self.selected_sub_group.as_ref(),
                )
            })
            .collect()
    }

    fn refresh_eligible(&mut self) {
        self.eligible = eligible_sub_groups(&self.sub_groups, self.selected_group.as_ref());
    }

    // ─── Local edits ───────────────────────────────────────────────────────────

    pub fn edit_result(&mut self, id: &TestId, result: TestResult) {
        self.replace_test(id, |test| test.with_result(result.clone()));
    }

    pub fn edit_observation(&mut self, id: &TestId, observation: impl Into<String>) {
        let observation = observation.into();
        self.replace_test(id, |test| test.with_observation(observation.clone()));
    }

    /// Reset every held test, not just the filtered ones.
    pub fn reset_all(&mut self) {
        self.tests = std::mem::take(&mut self.tests)
            .into_iter()
            .map(TestCase::reset)
            .collect();
    }

    fn replace_test(&mut self, id: &TestId, edit: impl Fn(TestCase) -> TestCase) {
        self.tests = std::mem::take(&mut self.tests)
            .into_iter()
            .map(|test| if test.id() == id { edit(test) } else { test })
            .collect();
    }

    // ─── Loading ───────────────────────────────────────────────────────────────

    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        self.loading = true;
        LoadTicket(self.latest_load)
    }

    /// Apply the result of the load identified by `ticket`.
    ///
    /// On failure the previously loaded data is kept. Results of superseded
    /// loads are dropped without touching state.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Catalog, CatalogError>,
    ) -> LoadOutcome {
        if ticket.0 != self.latest_load {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest_load,
                "dropping superseded load"
            );
            return LoadOutcome::Superseded;
        }
        self.loading = false;
        match result {
            Ok(catalog) => {
                self.groups = catalog.groups;
                self.sub_groups = catalog.sub_groups;
                self.tests = catalog.tests;
                self.refresh_eligible();
                LoadOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(error = %err, "keeping previous test list");
                LoadOutcome::Failed
            }
        }
    }

    /// Set the stale trigger. Any change schedules a reload.
    pub fn set_stale(&mut self, stale: bool) {
        if self.stale != stale {
            self.stale = stale;
            self.reload_generation += 1;
        }
    }

    // ─── Remote actions ────────────────────────────────────────────────────────

    /// Outcome of saving one test. Local state is left as the user edited it.
    #[must_use]
    pub fn finish_save(&self, result: Result<(), TestCaseServiceError>) -> Notice {
        match result {
            Ok(()) => Notice::success("Test saved."),
            Err(_) => Notice::error("Could not save the test."),
        }
    }

    pub fn begin_delete(&mut self) {
        self.set_stale(false);
    }

    /// On success the list is marked stale so it reloads.
    pub fn finish_delete(&mut self, result: Result<(), TestCaseServiceError>) -> Notice {
        match result {
            Ok(()) => {
                self.set_stale(true);
                Notice::success("Test deleted.")
            }
            Err(_) => Notice::error("Could not delete the test."),
        }
    }

    pub fn begin_create(&mut self) {
        self.set_stale(false);
    }

    pub fn finish_create(&mut self, result: Result<TestCase, TestCaseServiceError>) -> Notice {
        match result {
            Ok(_) => {
                self.set_stale(true);
                Notice::success("Test added.")
            }
            Err(TestCaseServiceError::NewTest(err)) => Notice::error(format!("{err}.")),
            Err(_) => Notice::error("Could not add the test."),
        }
    }

    /// Session payload for the current selection and the filtered tests.
    #[must_use]
    pub fn build_session(&self, technician: Option<UserId>) -> NewSession {
        NewSession::new(
            self.selected_group.clone(),
            self.selected_sub_group.clone(),
            technician,
            self.filtered_tests().into_iter().cloned().collect(),
        )
    }

    /// Record the outcome of starting `session`.
    ///
    /// Returns the notice to show, if any; a failure under
    /// `SessionErrorPolicy::LogOnly` shows nothing.
    pub fn finish_start_session(
        &mut self,
        session: NewSession,
        result: Result<Option<Session>, SessionServiceError>,
        policy: SessionErrorPolicy,
    ) -> Option<Notice> {
        match result {
            Ok(_) => {
                self.active_session = Some(session);
                Some(Notice::success("Test session started."))
            }
            Err(err) => match policy {
                SessionErrorPolicy::NotifyUser => {
                    Some(Notice::error("Could not start the test session."))
                }
                SessionErrorPolicy::LogOnly => {
                    tracing::warn!(error = %err, "session start failed; not notifying user");
                    None
                }
            },
        }
    }
}
