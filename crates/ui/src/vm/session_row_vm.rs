use testdesk_core::model::Session;

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRowVm {
    pub id: String,
    pub group: String,
    pub sub_group: String,
    pub technician: String,
    pub test_count: usize,
    pub created_at_str: String,
}

impl From<&Session> for SessionRowVm {
    fn from(session: &Session) -> Self {
        let or_dash = |value: Option<String>| value.unwrap_or_else(|| "--".to_owned());
        Self {
            id: session.id.to_string(),
            group: or_dash(session.group_id.as_ref().map(ToString::to_string)),
            sub_group: or_dash(session.sub_group_id.as_ref().map(ToString::to_string)),
            technician: or_dash(session.technician.as_ref().map(ToString::to_string)),
            test_count: session.test_ids.len(),
            created_at_str: or_dash(session.created_at.map(format_datetime)),
        }
    }
}

#[must_use]
pub fn map_session_rows(sessions: &[Session]) -> Vec<SessionRowVm> {
    sessions.iter().map(SessionRowVm::from).collect()
}
