//! Keeps `tests/unit` a mirror of `src` and every test file non-empty

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";
    const TESTS_DIR: &str = "tests";

    // Entry points and module wiring have no behaviour of their own
    fn is_exempt(relative: &str) -> bool {
        relative == "lib.rs" || relative == "main.rs" || relative.ends_with("mod.rs")
    }

    fn rust_files(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                rust_files(&path, base, found)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let relative = path
                    .strip_prefix(base)
                    .map_err(|_| io::Error::other("path outside base directory"))?;
                found.insert(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(())
    }

    fn mirrored(dir: &str) -> BTreeSet<String> {
        let base = Path::new(dir);
        let mut found = BTreeSet::new();
        if let Err(error) = rust_files(base, base, &mut found) {
            assert!(!base.exists(), "Failed to scan {dir}: {error}");
        }
        found.retain(|relative| !is_exempt(relative));
        found
    }

    fn manifest_keys(manifest: &str) -> BTreeSet<&str> {
        manifest
            .lines()
            .filter_map(|line| line.split_once(" = "))
            .map(|(key, _)| key.trim())
            .collect()
    }

    // Tests the package declares its links and readme, and the readme exists
    #[test]
    fn test_package_metadata_is_complete() {
        let manifest = fs::read_to_string("Cargo.toml").unwrap_or_default();
        let keys = manifest_keys(&manifest);
        let missing: Vec<&str> = ["homepage", "repository", "documentation", "readme"]
            .into_iter()
            .filter(|key| !keys.contains(key))
            .collect();

        assert!(
            missing.is_empty(),
            "Cargo.toml is missing: {}",
            missing.join(", ")
        );
        assert!(Path::new("README.md").is_file());
    }

    // Tests every source file has a unit test file at the same relative path
    #[test]
    fn test_every_src_file_has_unit_tests() {
        let tests = mirrored(UNIT_DIR);
        let missing: Vec<String> = mirrored(SRC_DIR)
            .difference(&tests)
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives the source file it covers
    #[test]
    fn test_every_unit_test_has_src_file() {
        let sources = mirrored(SRC_DIR);
        let orphaned: Vec<String> = mirrored(UNIT_DIR)
            .difference(&sources)
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source counterpart:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests each test file declares at least one test
    #[test]
    fn test_every_test_file_contains_tests() {
        let base = Path::new(TESTS_DIR);
        let mut files = BTreeSet::new();
        if let Err(error) = rust_files(base, base, &mut files) {
            assert!(!base.exists(), "Failed to scan {TESTS_DIR}: {error}");
        }

        let empty: Vec<String> = files
            .iter()
            .filter(|relative| !relative.ends_with("mod.rs"))
            .filter(|relative| {
                fs::read_to_string(base.join(relative.as_str()))
                    .is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|relative| format!("  - tests/{relative}"))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty.join("\n")
        );
    }
}
