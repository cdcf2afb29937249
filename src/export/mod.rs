// Export module - delivery directory and batch report

pub mod report;
pub mod writer;

pub use report::BatchReport;
pub use writer::OutputWriter;
