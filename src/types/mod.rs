//! Shared request and response types.

mod pagination;
mod response;

pub use pagination::{JobMatchPage, Paginated, PaginationMeta, PaginationParams};
pub use response::{Created, NoContent};
