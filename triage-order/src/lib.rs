pub mod priority;
pub mod report;
pub mod handlers;
pub mod processor;

pub use priority::PriorityRule;
pub use report::{CsvReportWriter, ExportError, ReportWriter};
pub use handlers::{ExportHandler, FlagHandler, LookupHandler, StatusRule};
pub use processor::{BatchError, OrderProcessor};
