//! JSON file output.
//!
//! The document is written to a temporary file next to the destination and
//! renamed over it once complete, so readers never observe a half-written
//! graph and a failed run leaves the previous file in place.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::{ExportError, ExportResult, OutputGraph};

/// Write `graph` to `path`, replacing any existing file.
///
/// The parent directory must already exist.
pub fn write_graph(graph: &OutputGraph, path: &Path, pretty: bool) -> ExportResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let wrap = |source: io::Error| ExportError::Write { path: path.to_path_buf(), source };

    let mut tmp = NamedTempFile::new_in(dir).map_err(wrap)?;
    encode_graph(graph, BufWriter::new(tmp.as_file_mut()), pretty).map_err(wrap)?;
    tmp.as_file().sync_all().map_err(wrap)?;

    // Temp files are created owner-only; the output is meant to be served.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(wrap)?;
    }

    tmp.persist(path).map_err(|e| wrap(e.error))?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "wrote graph"
    );
    Ok(())
}

/// Serialize `graph` into `w` and flush it.
///
/// A failing writer (disk full, closed pipe) surfaces as the underlying
/// `io::Error`; `OutputGraph` itself always serializes.
pub(crate) fn encode_graph<W: Write>(graph: &OutputGraph, mut w: W, pretty: bool) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut w, graph)?;
    } else {
        serde_json::to_writer(&mut w, graph)?;
    }
    w.flush()
}

/// Read a graph previously written by [`write_graph`].
///
/// Rejects files whose node keys do not match their ids, whose ids are not
/// contiguous from 0, or whose edges reference missing nodes.
pub fn read_graph(path: &Path) -> ExportResult<OutputGraph> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
