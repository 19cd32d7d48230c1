pub mod format;

pub use format::render_report;

/// Destination for human-readable report lines.
pub trait ReportSink {
    fn emit(&mut self, line: &str);
}

/// Writes report lines to stdout.
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for ConsoleSink {
    fn emit(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Collects lines in memory.
impl ReportSink for Vec<String> {
    fn emit(&mut self, line: &str) {
        self.push(line.to_string());
    }
}
