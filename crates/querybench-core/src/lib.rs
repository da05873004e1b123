pub mod catalog;
pub mod error;
pub mod filter;
pub mod history;
pub mod types;

pub use catalog::{Catalog, QueryTemplate};
pub use error::QuerybenchError;
pub use filter::{FilterClause, FilterSet};
pub use history::{ExecutionRecord, History};
pub use types::{ResultSet, Value};
