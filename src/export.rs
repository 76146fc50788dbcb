//! JSON export — hand a computed flow to an external renderer.
//!
//! ```text
//! FlowDiagram ─► export_json()        ─► { "nodes": [...], "edges": [...] }
//! SankeyData  ─► export_sankey_json() ─► { "nodes": [...], "links": [...] }
//! ```

use std::io::Write;

use crate::flow::{FlowDiagram, SankeyData};
use crate::Result;

/// Write `diagram` as pretty-printed JSON followed by a newline.
pub fn export_json(diagram: &FlowDiagram, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, diagram)?;
    writeln!(writer)?;
    Ok(())
}

/// Write Sankey data as pretty-printed JSON followed by a newline.
pub fn export_sankey_json(sankey: &SankeyData, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, sankey)?;
    writeln!(writer)?;
    Ok(())
}
