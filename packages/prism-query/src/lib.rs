//! Query composition: ranked search results intersected with structured filters, sorted and
//! paginated.

pub mod composer;
pub mod page;
pub mod params;
pub mod rules;
pub mod scope;
pub mod search;

mod error;

pub use composer::{QueryComposer, order_by_ids, ordered_intersection};
pub use error::{Error, Result};
pub use page::{Page, PageRequest};
pub use params::QueryParams;
pub use rules::{FilterRule, QueryRules, QueryRulesBuilder, ResolvedSort, SortRule};
pub use scope::{Criterion, Scope};
pub use search::{RankedIdSet, SearchEngine, SearchOptions};
