use std::fs;
use std::path::{Path, PathBuf};

/// Shown in place of a page that exists in no locale.
pub const PAGE_UNAVAILABLE: &str = "Can't load page.";

fn page_path(data_dir: &Path, locale: &str, name: &str) -> PathBuf {
    data_dir.join("pages").join(locale).join(name)
}

/// Names of the documentation pages, taken from the default locale's set.
pub fn page_names(data_dir: &Path, default_locale: &str) -> Vec<String> {
    let dir = data_dir.join("pages").join(default_locale);
    let mut names: Vec<String> = match fs::read_dir(&dir) {
        Ok(entries) => entries
            .flatten()
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().to_str().map(String::from))
            .collect(),
        Err(e) => {
            tracing::warn!("cannot list pages in {}: {}", dir.display(), e);
            Vec::new()
        }
    };
    names.sort();
    names
}

/// Page text in `locale`, else in `default_locale`, else a placeholder.
pub fn read_page(data_dir: &Path, locale: &str, default_locale: &str, name: &str) -> String {
    let mut path = page_path(data_dir, locale, name);
    if !path.is_file() {
        path = page_path(data_dir, default_locale, name);
    }
    match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e)   => {
            tracing::warn!("cannot load page {}: {}", path.display(), e);
            PAGE_UNAVAILABLE.to_string()
        }
    }
}
