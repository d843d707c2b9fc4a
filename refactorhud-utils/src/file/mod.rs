//! File system path utilities
//!
//! Variant files are written to mirror trees next to the project, so every
//! path derived from project-relative input goes through these helpers.

use std::path::{Component, Path, PathBuf};

/// Safely join paths, refusing absolute or parent-escaping relative parts
pub fn safe_path_join(base: &Path, relative: &Path) -> crate::Result<PathBuf> {
    let normalized = normalize_path(relative);

    let escapes = normalized
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));

    if normalized.is_absolute() || escapes {
        return Err(crate::UtilError::PathOperation(
            format!("Unsafe path join attempted: {:?} + {:?}", base, relative)
        ));
    }

    Ok(base.join(normalized))
}

/// Lexically normalize a path (`a/./b/../c` becomes `a/c`)
pub fn normalize_path(path: &Path) -> PathBuf {
    path_clean::clean(path)
}

/// Anchor a relative `path` at the current directory, then normalize it.
/// The path does not have to exist.
pub fn absolute_path(path: &Path) -> crate::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_path(path));
    }
    Ok(normalize_path(&std::env::current_dir()?.join(path)))
}

/// Express `path` relative to `base`, both made absolute first so that
/// `./src/A.hs` is found inside `.`
pub fn relative_to(path: &Path, base: &Path) -> crate::Result<PathBuf> {
    let path = absolute_path(path)?;
    let base = absolute_path(base)?;

    path.strip_prefix(&base)
        .map(Path::to_path_buf)
        .map_err(|_| crate::UtilError::PathOperation(
            format!("{} is not inside {}", path.display(), base.display())
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_path_join() {
        let base = Path::new("/work/static_refactored");

        assert_eq!(
            safe_path_join(base, Path::new("src/Main.hs")).unwrap(),
            PathBuf::from("/work/static_refactored/src/Main.hs")
        );
        assert_eq!(
            safe_path_join(base, Path::new("src/./Lib/../Main.hs")).unwrap(),
            PathBuf::from("/work/static_refactored/src/Main.hs")
        );
        assert!(safe_path_join(base, Path::new("../etc/passwd")).is_err());
        assert!(safe_path_join(base, Path::new("/etc/passwd")).is_err());
    }

    #[test]
    fn test_dots_inside_file_names_are_allowed() {
        let base = Path::new("/work/out");
        assert!(safe_path_join(base, Path::new("src/Data..Extra.hs")).is_ok());
    }

    #[test]
    fn test_relative_to() {
        let rel = relative_to(Path::new("/work/project/src/Main.hs"), Path::new("/work/project")).unwrap();
        assert_eq!(rel, PathBuf::from("src/Main.hs"));

        assert!(relative_to(Path::new("/elsewhere/Main.hs"), Path::new("/work/project")).is_err());
    }

    #[test]
    fn test_relative_to_current_directory() {
        assert_eq!(relative_to(Path::new("./src/A.hs"), Path::new(".")).unwrap(), PathBuf::from("src/A.hs"));
        assert_eq!(relative_to(Path::new("proj/src/A.hs"), Path::new("proj")).unwrap(), PathBuf::from("src/A.hs"));
    }

    #[test]
    fn test_absolute_path_anchors_at_current_directory() {
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(absolute_path(Path::new(".")).unwrap(), normalize_path(&cwd));
        assert_eq!(absolute_path(Path::new("proj/./src")).unwrap(), normalize_path(&cwd.join("proj/src")));
        assert_eq!(absolute_path(Path::new("/work/../work/project")).unwrap(), PathBuf::from("/work/project"));
    }
}
