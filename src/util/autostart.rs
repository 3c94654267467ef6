use crate::util::preferences::entry_exists;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from toggling the autostart entry.
#[derive(Debug, Error)]
pub enum AutostartError {
    #[error("failed to link {} -> {}: {source}", .link.display(), .target.display())]
    Link {
        link:   PathBuf,
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {}: {source}", .path.display())]
    Remove {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Whether the autostart entry is present. A dangling link still counts.
pub fn is_enabled(autostart_link: &Path) -> bool {
    entry_exists(autostart_link)
}

/// Create or remove the autostart entry. Idempotent: does nothing when the
/// entry is already in the requested state. Returns the state observed on
/// disk afterwards.
pub fn set(enabled: bool, desktop_launcher: &Path, autostart_link: &Path) -> Result<bool, AutostartError> {
    let present = is_enabled(autostart_link);
    if enabled && !present {
        link(desktop_launcher, autostart_link).map_err(|source| AutostartError::Link {
            link:   autostart_link.to_path_buf(),
            target: desktop_launcher.to_path_buf(),
            source,
        })?;
        tracing::info!("autostart enabled: {}", autostart_link.display());
    } else if !enabled && present {
        fs::remove_file(autostart_link).map_err(|source| AutostartError::Remove {
            path: autostart_link.to_path_buf(),
            source,
        })?;
        tracing::info!("autostart disabled: {}", autostart_link.display());
    }
    Ok(is_enabled(autostart_link))
}

#[cfg(unix)]
fn link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn link(target: &Path, link: &Path) -> io::Result<()> {
    fs::copy(target, link).map(|_| ())
}

/// Comment or uncomment `exec_line` in an i3 config. A missing config is
/// not an error. Returns whether the file was rewritten.
pub fn toggle_i3(config: &Path, exec_line: &str, enabled: bool) -> io::Result<bool> {
    let text = match fs::read_to_string(config) {
        Ok(t)  => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    let updated = rewrite_exec_line(&text, exec_line, enabled);
    if updated == text {
        return Ok(false);
    }
    fs::write(config, updated)?;
    tracing::info!("{} `{}` in {}", if enabled { "enabled" } else { "disabled" }, exec_line, config.display());
    Ok(true)
}

fn rewrite_exec_line(text: &str, exec_line: &str, enabled: bool) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    for line in text.split_inclusive('\n') {
        let body = line.trim_end_matches(['\r', '\n']);
        let ending = &line[body.len()..];
        let indent_len = body.len() - body.trim_start().len();
        let (indent, rest) = body.split_at(indent_len);
        let bare = rest.trim_start_matches('#').trim_start();

        if bare != exec_line {
            out.push_str(line);
            continue;
        }
        out.push_str(indent);
        if !enabled { out.push('#'); }
        out.push_str(exec_line);
        out.push_str(ending);
    }
    out
}
