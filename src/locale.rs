use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Pick the active locale. First match wins:
/// stored choice, exact system locale, its two-letter language, then the default.
pub fn resolve(
    stored: Option<&str>,
    system_locale: Option<&str>,
    available: &BTreeSet<String>,
    default_locale: &str,
) -> String {
    if let Some(s) = stored.filter(|s| available.contains(*s)) {
        return s.to_string();
    }
    if let Some(sys) = system_locale.filter(|s| !s.is_empty()) {
        if available.contains(sys) {
            return sys.to_string();
        }
        let lang: String = sys.chars().take(2).collect();
        if available.contains(&lang) {
            return lang;
        }
    }
    default_locale.to_string()
}

/// Locales with a compiled catalog for `domain` under `locale_dir`,
/// i.e. `<locale_dir>/<locale>/LC_MESSAGES/<domain>.mo`. The default
/// locale needs no catalog and is always present.
pub fn available_locales(locale_dir: &Path, domain: &str, default_locale: &str) -> BTreeSet<String> {
    let mut set = BTreeSet::new();
    set.insert(default_locale.to_string());

    let entries = match fs::read_dir(locale_dir) {
        Ok(e)  => e,
        Err(e) => {
            tracing::warn!("cannot list translations in {}: {}", locale_dir.display(), e);
            return set;
        }
    };
    let catalog = format!("{}.mo", domain);
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.join("LC_MESSAGES").join(&catalog).is_file() { continue; }
        if let Some(name) = entry.file_name().to_str() {
            set.insert(name.to_string());
        }
    }
    set
}

/// The user's locale in `ll_CC` form, from the usual environment
/// variables or, failing that, the platform.
pub fn system_locale() -> Option<String> {
    detect_locale(|k| std::env::var(k).ok())
        .or_else(|| sys_locale::get_locale().and_then(|l| normalize(&l)))
}

fn detect_locale(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|k| lookup(k))
        .find_map(|v| normalize(&v))
}

/// `en_US.UTF-8@euro` → `en_US`, `en-US` → `en_US`. `C`, `POSIX` and
/// empty values mean "no locale".
fn normalize(raw: &str) -> Option<String> {
    let name = raw.split(['.', '@']).next().unwrap_or("").trim();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    Some(name.replace('-', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn stored_choice_wins() {
        assert_eq!(resolve(Some("fr"), Some("de_DE"), &set(&["en", "fr"]), "en"), "fr");
    }

    #[test]
    fn unsupported_system_locale_uses_default() {
        assert_eq!(resolve(None, Some("de_DE"), &set(&["en", "fr"]), "en"), "en");
    }

    #[test]
    fn two_letter_fallback() {
        assert_eq!(resolve(None, Some("fr_FR"), &set(&["en", "fr"]), "en"), "fr");
    }

    #[test]
    fn exact_system_locale_beats_language() {
        assert_eq!(resolve(None, Some("pt_BR"), &set(&["en", "pt", "pt_BR"]), "en"), "pt_BR");
    }

    #[test]
    fn stale_stored_choice_falls_through() {
        assert_eq!(resolve(Some("xx"), Some("fr_FR"), &set(&["en", "fr"]), "en"), "fr");
    }

    #[test]
    fn missing_system_locale_uses_default() {
        assert_eq!(resolve(None, None, &set(&["en", "fr"]), "en"), "en");
        assert_eq!(resolve(None, Some(""), &set(&["en", "fr"]), "en"), "en");
    }

    #[test]
    fn short_system_locale_is_tolerated() {
        assert_eq!(resolve(None, Some("f"), &set(&["en", "fr"]), "en"), "en");
    }

    #[test]
    fn discovers_only_locales_with_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for loc in ["fr", "de_DE"] {
            let msgs = root.join(loc).join("LC_MESSAGES");
            fs::create_dir_all(&msgs).unwrap();
            fs::write(msgs.join("hello.mo"), "").unwrap();
        }
        fs::create_dir_all(root.join("it").join("LC_MESSAGES")).unwrap();
        fs::write(root.join("it/LC_MESSAGES/other.mo"), "").unwrap();

        assert_eq!(available_locales(root, "hello", "en_US"), set(&["de_DE", "en_US", "fr"]));
    }

    #[test]
    fn unreadable_catalog_dir_still_has_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(available_locales(&dir.path().join("nope"), "hello", "en_US"), set(&["en_US"]));
    }

    #[test]
    fn environment_precedence() {
        let env: HashMap<&str, &str> = [("LANG", "de_DE.UTF-8"), ("LC_MESSAGES", "fr_FR.UTF-8")].into();
        let got = detect_locale(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(got.as_deref(), Some("fr_FR"));
    }

    #[test]
    fn c_locale_is_skipped() {
        let env: HashMap<&str, &str> = [("LC_ALL", "C"), ("LANG", "pt_BR.utf8")].into();
        let got = detect_locale(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(got.as_deref(), Some("pt_BR"));
    }

    #[test]
    fn normalizes_platform_tags() {
        assert_eq!(normalize("en-US").as_deref(), Some("en_US"));
        assert_eq!(normalize("ca_ES@valencia").as_deref(), Some("ca_ES"));
        assert_eq!(normalize("POSIX"), None);
        assert_eq!(normalize(""), None);
    }
}
