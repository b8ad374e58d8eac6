use crate::model::ids::UserId;

/// The signed-in technician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub admin: bool,
}

impl CurrentUser {
    #[must_use]
    pub fn new(id: UserId, admin: bool) -> Self {
        Self { id, admin }
    }
}
