mod group;
mod ids;
mod session;
mod test_case;
mod user;

pub use ids::{GroupId, ParseIdError, SessionId, SubGroupId, TestId, UserId};

pub use group::{Group, SubGroup};
pub use session::{NewSession, Session};
pub use test_case::{
    NewTestCase, NewTestCaseError, TestCase, TestResult, TestResultError, TestUpdate,
};
pub use user::CurrentUser;
