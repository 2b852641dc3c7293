use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::ast::Node;
use crate::errors::{Error, Result};
use crate::syntax::{Parser, SourceContext};

/// File extension of Ark source files.
pub const SOURCE_EXTENSION: &str = "ark";

/// Result of parsing one discovered file.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub ast: Node,
}

/// Recursively scans `root` for `.ark` files.
///
/// A path naming a file is returned as-is, whatever its extension. The
/// returned list is sorted so batch runs are deterministic.
pub fn discover_sources<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !is_source_file(path) {
            continue;
        }

        files.push(path.to_path_buf());
    }
    files.sort();
    debug!(root = %root.display(), count = files.len(), "discovered sources");
    Ok(files)
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(SOURCE_EXTENSION)
}

pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses one file with a fresh parser.
///
/// Parse errors come back with the file attached as their source so they
/// render with a snippet.
pub fn parse_file(path: &Path) -> Result<ParsedFile> {
    let source = read_source(path)?;
    let mut parser = Parser::new(&source);
    if let Err(e) = parser.parse() {
        let ctx = SourceContext::from_file(path.display().to_string(), source.as_str());
        return Err(e.with_source(&ctx).into());
    }
    Ok(ParsedFile {
        path: path.to_path_buf(),
        ast: parser.into_ast(),
    })
}
