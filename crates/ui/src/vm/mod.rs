mod notice;
mod session_row_vm;
mod test_list_vm;
mod test_row_vm;
mod time_fmt;

pub use notice::{Notice, NoticeKind};
pub use session_row_vm::{SessionRowVm, map_session_rows};
pub use test_list_vm::{
    LoadOutcome, LoadTicket, SessionErrorPolicy, TestListVm, eligible_sub_groups, test_matches,
};
pub use test_row_vm::{
    OptionVm, TestRowVm, map_group_options, map_sub_group_options, map_test_rows,
};
