//! Client-side core of the job board: cached server data, filter state, the
//! view projection over them, and the coordinator that issues mutations and
//! refreshes the cache.

pub mod api;
pub mod coordinator;
pub mod error;
pub mod filter;
pub mod forms;
pub mod store;
pub mod view;

pub use api::{HttpJobBoard, JobBoardApi};
pub use coordinator::{BatchReport, BoardEvent, DeleteOutcome, MutationCoordinator, MutationKey};
pub use error::{BoardError, FormError, Operation};
pub use filter::{FilterCriteria, FilterState, JobTypeFilter, LocationFilter, SortOrder, ALL};
pub use forms::{CreateJobForm, EditJobForm, JobForm};
pub use store::JobStore;
pub use view::project;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
