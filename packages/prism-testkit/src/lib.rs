pub mod fixtures;

mod row;
mod scope;
mod search;

pub use row::Row;
pub use scope::MemoryScope;
pub use search::FixedSearch;
