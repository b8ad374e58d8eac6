use crate::model::ids::{GroupId, SubGroupId};

/// Top-level category of test cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

impl Group {
    #[must_use]
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Category nested under a [`Group`].
///
/// `group_id` is the canonical parent reference. Upstream payloads carry the
/// parent either as a flat id or as an embedded group object; both are folded
/// into this field when records are mapped, so nothing downstream has to care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubGroup {
    pub id: SubGroupId,
    pub name: String,
    pub group_id: Option<GroupId>,
}

impl SubGroup {
    #[must_use]
    pub fn new(id: SubGroupId, name: impl Into<String>, group_id: Option<GroupId>) -> Self {
        Self {
            id,
            name: name.into(),
            group_id,
        }
    }

    /// Returns true when this subgroup hangs off `group`.
    #[must_use]
    pub fn belongs_to(&self, group: &GroupId) -> bool {
        self.group_id.as_ref() == Some(group)
    }
}
