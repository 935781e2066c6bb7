use std::path::{Component, Path, PathBuf};

/// How the path of a parsed message file is written into its report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PathFormat {
    /// Keep the path exactly as it was given
    #[default]
    AsGiven,
    /// Make the path absolute against the current directory
    Absolute,
    /// Make the path relative to the given base directory
    RelativeTo(PathBuf),
}

impl PathFormat {
    /// Build the policy from the mutually exclusive command line options
    pub fn from_options(absolute: bool, relative: Option<PathBuf>) -> Self {
        match (absolute, relative) {
            (true, _) => PathFormat::Absolute,
            (false, Some(base)) => PathFormat::RelativeTo(base),
            (false, None) => PathFormat::AsGiven,
        }
    }

    /// Format `path` according to this policy.
    ///
    /// Paths are translated lexically, symbolic links are not resolved. When a translation is not
    /// possible the path is kept as given.
    pub fn format(&self, path: &Path) -> String {
        let formatted = match self {
            PathFormat::AsGiven => None,
            PathFormat::Absolute => absolute(path),
            PathFormat::RelativeTo(base) => absolute(base)
                .zip(absolute(path))
                .and_then(|(base, path)| relative(&base, &path)),
        };

        formatted
            .unwrap_or_else(|| path.to_path_buf())
            .display()
            .to_string()
    }
}

/// Absolute and cleaned version of `path`
fn absolute(path: &Path) -> Option<PathBuf> {
    match std::path::absolute(path) {
        Ok(path) => Some(clean(&path)),
        Err(e) => {
            warn!("Cannot make {} absolute: {e}", path.display());
            None
        }
    }
}

/// Resolve `.` and `..` components without touching the file system
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() && !cleaned.has_root() {
                    cleaned.push(component);
                }
            }
            _ => cleaned.push(component),
        }
    }
    cleaned
}

/// Path leading from the absolute `base` to the absolute `path`
fn relative(base: &Path, path: &Path) -> Option<PathBuf> {
    pathdiff::diff_paths(path, base).map(|relative| {
        if relative.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            relative
        }
    })
}
