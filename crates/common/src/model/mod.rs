//! Data carriers shared across service boundaries
//!
//! Pure DTOs: a generic response wrapper, pagination types, and primary-key
//! envelopes. Everything here derives `serde` traits and holds no behaviour
//! beyond small invariant-preserving accessors.

mod ids;
mod page;
mod response;

pub use ids::{Id, MultiId};
pub use page::{PageQuery, PagedData, DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use response::{ApiResponse, CODE_FAIL, CODE_SUCCESS};
