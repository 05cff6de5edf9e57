mod exporter;

pub use exporter::{ExportSummary, Exporter};
