//! Commit and date stamped in by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `ca-tracker <date> (<commit>)`, printed by `--version` and logged at startup.
pub fn version_line() -> String {
    format!("ca-tracker {} ({})", BUILD_DATE, BUILD_COMMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_is_short_hash_or_unknown() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_line_carries_date_and_commit() {
        let line = version_line();
        assert!(line.starts_with("ca-tracker "));
        assert!(line.contains(BUILD_DATE));
        assert!(line.ends_with(&format!("({})", BUILD_COMMIT)));
    }
}
