//! Terminal UI helpers - colored output, progress, tables

pub mod output;
pub mod progress;
pub mod table;

pub use output::{error, header, info, success, warn};
pub use progress::{ImportMessage, ProgressManager, Spinner};
pub use table::{field_table, mapping_table, stats_table};
