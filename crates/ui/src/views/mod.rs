mod sessions;
mod state;
mod test_list;

pub use sessions::SessionsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use test_list::TestListView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
