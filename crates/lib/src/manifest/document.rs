//! Reading and rewriting the manifest document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::consts::MANIFEST_FIELD;

use super::types::ManifestError;

/// A parsed manifest. Key order is kept as found on disk.
pub type Document = Map<String, Value>;

/// Load the manifest at `path`. It must exist and hold a JSON object.
pub fn read_manifest(path: &Path) -> Result<Document, ManifestError> {
  let content = fs::read_to_string(path).map_err(|e| {
    if e.kind() == io::ErrorKind::NotFound {
      ManifestError::ManifestNotFound {
        path: path.to_path_buf(),
      }
    } else {
      ManifestError::Read {
        path: path.to_path_buf(),
        source: e,
      }
    }
  })?;

  let value: Value = serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
    path: path.to_path_buf(),
    source,
  })?;

  match value {
    Value::Object(map) => Ok(map),
    _ => Err(ManifestError::NotAnObject {
      path: path.to_path_buf(),
    }),
  }
}

/// Replace the ordered output list. The field is added if missing.
pub fn replace_entries(document: &mut Document, entries: &[String]) {
  let list = entries.iter().cloned().map(Value::String).collect();
  document.insert(MANIFEST_FIELD.to_string(), Value::Array(list));
}

/// Write the manifest back to `path`.
///
/// Writes to a sibling temp file and renames it over the original, so a
/// failed write leaves the previous manifest in place.
pub fn write_manifest(path: &Path, document: &Document) -> Result<(), ManifestError> {
  let content = serde_json::to_string(document).map_err(ManifestError::Serialize)?;

  let temp_path = temp_path(path);
  fs::write(&temp_path, &content).map_err(|source| ManifestError::Write {
    path: temp_path.clone(),
    source,
  })?;
  fs::rename(&temp_path, path).map_err(|source| ManifestError::Write {
    path: path.to_path_buf(),
    source,
  })?;

  Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(".tmp");
  path.with_file_name(name)
}
