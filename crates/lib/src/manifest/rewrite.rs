use std::path::Path;

use super::types::PathRewrite;

impl PathRewrite {
  /// Drop declaration files and map the rest to output paths, keeping order.
  pub fn apply(&self, project_dir: &Path, files: &[String]) -> Vec<String> {
    files
      .iter()
      .filter(|file| !self.is_declaration(file))
      .map(|file| self.output_path(project_dir, file))
      .collect()
  }

  pub fn is_declaration(&self, file: &str) -> bool {
    !self.declaration_suffix.is_empty() && file.ends_with(&self.declaration_suffix)
  }

  /// Map one source file to its output path.
  ///
  /// The project directory and the source root are stripped when present, so
  /// absolute, project-relative and root-relative names all land in the same
  /// place. Separators are normalized to `/`.
  pub fn output_path(&self, project_dir: &Path, file: &str) -> String {
    let file = file.replace('\\', "/");
    let project = project_dir.to_string_lossy().replace('\\', "/");

    let relative = strip_dir(&file, &project).unwrap_or(&file);
    let relative = relative.trim_start_matches("./");
    let relative = strip_dir(relative, &self.source_root).unwrap_or(relative);

    let renamed = match relative.strip_suffix(self.source_ext.as_str()) {
      Some(stem) if !self.source_ext.is_empty() => format!("{}{}", stem, self.output_ext),
      _ => relative.to_string(),
    };

    let renamed = renamed.trim_start_matches('/');
    let output_root = self.output_root.trim_end_matches('/');
    if output_root.is_empty() {
      renamed.to_string()
    } else {
      format!("{}/{}", output_root, renamed)
    }
  }
}

/// Strip `dir` from the front of `path` on a segment boundary.
fn strip_dir<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
  let dir = dir.trim_end_matches('/');
  if dir.is_empty() || dir == "." {
    return None;
  }
  let rest = path.strip_prefix(dir)?;
  if rest.is_empty() {
    Some(rest)
  } else {
    rest.strip_prefix('/')
  }
}
