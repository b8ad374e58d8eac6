use testdesk_core::model::{Group, SubGroup, TestCase, TestId, TestResult};

/// UI-ready representation of a group or subgroup for a select control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub value: String,
    pub label: String,
}

#[must_use]
pub fn map_group_options(groups: &[Group]) -> Vec<OptionVm> {
    groups
        .iter()
        .map(|group| OptionVm {
            value: group.id.to_string(),
            label: group.name.clone(),
        })
        .collect()
}

#[must_use]
pub fn map_sub_group_options(sub_groups: &[SubGroup]) -> Vec<OptionVm> {
    sub_groups
        .iter()
        .map(|sub| OptionVm {
            value: sub.id.to_string(),
            label: sub.name.clone(),
        })
        .collect()
}

/// One row of the test table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestRowVm {
    pub id: TestId,
    pub scope: String,
    pub use_case: String,
    pub description: Option<String>,
    pub result: TestResult,
    pub observation: String,
}

/// Map filtered tests into table rows, labelling each with its group and subgroup names.
#[must_use]
pub fn map_test_rows(
    tests: &[&TestCase],
    groups: &[Group],
    sub_groups: &[SubGroup],
) -> Vec<TestRowVm> {
    tests
        .iter()
        .map(|test| TestRowVm {
            id: test.id().clone(),
            scope: format_scope(test, groups, sub_groups),
            use_case: test.use_case().to_owned(),
            description: test.description().map(str::to_owned),
            result: test.result().clone(),
            observation: test.observation().to_owned(),
        })
        .collect()
}

fn format_scope(test: &TestCase, groups: &[Group], sub_groups: &[SubGroup]) -> String {
    let group = groups
        .iter()
        .find(|g| &g.id == test.group_id())
        .map_or_else(|| test.group_id().to_string(), |g| g.name.clone());
    match sub_groups.iter().find(|s| &s.id == test.sub_group_id()) {
        Some(sub) => format!("{group} / {}", sub.name),
        None => group,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testdesk_core::model::{GroupId, SubGroupId};

    #[test]
    fn rows_use_names_and_fall_back_to_ids() {
        let groups = vec![Group::new(GroupId::new("g1"), "Web")];
        let sub_groups = vec![SubGroup::new(
            SubGroupId::new("s1"),
            "Login",
            Some(GroupId::new("g1")),
        )];
        let known = TestCase::new(
            TestId::new("t1"),
            GroupId::new("g1"),
            SubGroupId::new("s1"),
            "A",
        );
        let orphan = TestCase::new(
            TestId::new("t2"),
            GroupId::new("gx"),
            SubGroupId::new("sx"),
            "B",
        );

        let rows = map_test_rows(&[&known, &orphan], &groups, &sub_groups);

        assert_eq!(rows[0].scope, "Web / Login");
        assert_eq!(rows[1].scope, "gx");
        assert_eq!(rows[1].result, TestResult::NotTested);
    }
}
