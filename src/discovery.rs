use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Expands the CLI paths: files are taken as given, directories are walked
/// for build-script files (`Makefile`, `makefile`, `*.mk`), in a
/// deterministic order.
pub fn discover_build_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            let walker = WalkDir::new(path).sort_by_file_name().into_iter();
            for entry in walker.filter_map(Result::ok) {
                if entry.file_type().is_file() && is_build_file(entry.path()) {
                    out.push(entry.into_path());
                }
            }
        } else {
            out.push(path.clone());
        }
    }
    out
}

fn is_build_file(path: &Path) -> bool {
    if path.extension() == Some(OsStr::new("mk")) {
        return true;
    }
    matches!(
        path.file_name().and_then(OsStr::to_str),
        Some("Makefile" | "makefile")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_build_file_names() {
        assert!(is_build_file(Path::new("pkg/Makefile")));
        assert!(is_build_file(Path::new("pkg/makefile")));
        assert!(is_build_file(Path::new("mk/bsd.prefs.mk")));
        assert!(!is_build_file(Path::new("pkg/README")));
        assert!(!is_build_file(Path::new("pkg/Makefile.orig")));
    }

    #[test]
    fn walks_directories_and_keeps_explicit_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir(dir.path().join("sub"))?;
        std::fs::write(dir.path().join("Makefile"), "")?;
        std::fs::write(dir.path().join("sub").join("rules.mk"), "")?;
        std::fs::write(dir.path().join("README"), "")?;
        let odd = dir.path().join("notes.txt");
        std::fs::write(&odd, "")?;

        let found = discover_build_files(&[dir.path().to_path_buf(), odd.clone()]);
        assert_eq!(found.len(), 3);
        assert!(found.contains(&dir.path().join("Makefile")));
        assert!(found.contains(&dir.path().join("sub").join("rules.mk")));
        // An explicitly named file is not filtered.
        assert!(found.contains(&odd));
        Ok(())
    }
}
