//! Export sink trait definition.

use crate::error::Result;

/// Destination of an exported result table.
pub trait ExportSink {
    /// Field delimiter the sink expects.
    fn delimiter(&self) -> u8 {
        b','
    }

    /// Deliver the serialized table.
    fn deliver(&mut self, content: &str) -> Result<()>;
}
