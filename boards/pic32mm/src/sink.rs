//! Diagnostic output through defmt

use hal_abstractions::LineSink;

/// Forwards calibration diagnostics to the defmt logger
#[derive(Debug, Default, Clone, Copy)]
pub struct DefmtSink;

impl LineSink for DefmtSink {
    fn write_line(&mut self, line: &str) {
        defmt::info!("{=str}", line);
    }
}
