mod row;
mod sink;

pub use row::ReportRow;
pub use sink::CsvSink;
