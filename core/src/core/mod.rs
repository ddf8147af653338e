pub mod context_data;
pub mod file_set;
pub mod middleware;

pub use context_data::ContextData;
pub use file_set::{FileRecord, FileSet};
pub use middleware::{Handler, Middleware};
