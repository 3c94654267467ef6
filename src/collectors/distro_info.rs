use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Key prefix used by lsb-release files (`DISTRIB_CODENAME=…`).
const KEY_PREFIX: &str = "DISTRIB_";

/// Distribution identity fields keyed without the `DISTRIB_` prefix.
pub type DistroInfo = BTreeMap<String, String>;

/// Read and parse the distro identity file at `path`.
/// Returns an empty map if the file can't be read.
pub fn read(path: &Path) -> DistroInfo {
    match fs::read_to_string(path) {
        Ok(text) => parse(&text),
        Err(e)   => {
            tracing::warn!("cannot read {}: {}", path.display(), e);
            DistroInfo::new()
        }
    }
}

/// Parse `KEY=VALUE` / `KEY="VALUE"` lines. Later duplicates win.
pub fn parse(text: &str) -> DistroInfo {
    let mut info = DistroInfo::new();
    for line in text.lines() {
        let (key, value) = match line.trim_end().split_once('=') {
            Some(kv) => kv,
            None     => continue,
        };
        let key = key.strip_prefix(KEY_PREFIX).unwrap_or(key);
        let value = unquote(value);
        if value.is_empty() { continue; }
        info.insert(key.to_string(), value.to_string());
    }
    info
}

/// A lone `"` counts as an empty quoted value.
fn unquote(value: &str) -> &str {
    match value.strip_prefix('"') {
        Some(rest) if value.ends_with('"') => rest.strip_suffix('"').unwrap_or(rest),
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn strips_prefix_and_quotes() {
        let info = parse("DISTRIB_CODENAME=\"testing\"\nDISTRIB_RELEASE=21.0\n");
        let expected: DistroInfo = [("CODENAME", "testing"), ("RELEASE", "21.0")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(info, expected);
    }

    #[test]
    fn ignores_lines_without_separator_and_empty_values() {
        let info = parse("# comment\nDISTRIB_ID=\nDISTRIB_DESCRIPTION=\"\"\nNAME=Manjaro\n");
        assert_eq!(info.len(), 1);
        assert_eq!(info["NAME"], "Manjaro");
    }

    #[test]
    fn splits_on_first_separator_only() {
        let info = parse("DISTRIB_DESCRIPTION=\"a=b\"\n");
        assert_eq!(info["DESCRIPTION"], "a=b");
    }

    #[test]
    fn last_duplicate_wins() {
        let info = parse("DISTRIB_RELEASE=1\nRELEASE=2\n");
        assert_eq!(info["RELEASE"], "2");
    }

    #[test]
    fn lone_quote_is_dropped() {
        let info = parse("DISTRIB_CODENAME=\"\nDISTRIB_RELEASE=17.0\n");
        assert!(!info.contains_key("CODENAME"));
        assert_eq!(info["RELEASE"], "17.0");
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read(&dir.path().join("lsb-release")).is_empty());
    }

    #[test]
    fn reads_file_from_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "DISTRIB_ID=ManjaroLinux\r").unwrap();
        writeln!(f, "DISTRIB_CODENAME=Gellivara").unwrap();
        let info = read(f.path());
        assert_eq!(info["ID"], "ManjaroLinux");
        assert_eq!(info["CODENAME"], "Gellivara");
    }
}
