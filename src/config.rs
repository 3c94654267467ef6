use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "welcomer";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub system: SystemConfig,

    #[serde(default)]
    pub urls: UrlsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Application name: gettext domain, launcher file stem and i3 exec target
    pub app_name: String,
    /// Locale that needs no translation catalog (always available)
    pub default_locale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of shipped data; documentation pages live under `<data_dir>/pages/<locale>/`
    pub data_dir: PathBuf,
    /// gettext catalog root: `<locale_dir>/<locale>/LC_MESSAGES/<app_name>.mo`
    pub locale_dir: PathBuf,
    /// Per-user preferences JSON
    pub preferences_file: PathBuf,
    /// System launcher that the autostart entry points at
    pub desktop_file: PathBuf,
    /// Per-user autostart entry; its presence means "autostart enabled"
    pub autostart_file: PathBuf,
    /// i3 config whose `exec` line is toggled alongside the autostart entry
    pub i3_config: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Distro identity file in `KEY=VALUE` form
    pub lsb_release: PathBuf,
    /// Any of these existing means we're running from live media
    pub live_markers: Vec<PathBuf>,
    /// Graphical installer binary
    pub gui_installer: PathBuf,
    /// Text-mode installer binary
    pub cli_installer: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlsConfig {
    /// Documentation and community links: { "wiki" = "https://…" }
    pub welcome: BTreeMap<String, String>,
    /// Social network links
    pub social: BTreeMap<String, String>,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            paths:   PathsConfig::default(),
            system:  SystemConfig::default(),
            urls:    UrlsConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { app_name: APP_NAME.into(), default_locale: "en_US".into() }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir:         PathBuf::from(format!("/usr/share/{}/data", APP_NAME)),
            locale_dir:       PathBuf::from("/usr/share/locale"),
            preferences_file: config_dir.join(APP_NAME).join("preferences.json"),
            desktop_file:     PathBuf::from(format!("/usr/share/applications/{}.desktop", APP_NAME)),
            autostart_file:   config_dir.join("autostart").join(format!("{}.desktop", APP_NAME)),
            i3_config:        home.join(".i3").join("config"),
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            lsb_release:   PathBuf::from("/etc/lsb-release"),
            live_markers:  vec![
                PathBuf::from("/bootmnt/manjaro"),
                PathBuf::from("/run/miso/bootmnt/manjaro"),
            ],
            gui_installer: PathBuf::from("/usr/bin/calamares"),
            cli_installer: PathBuf::from("/usr/bin/cli-installer"),
        }
    }
}

impl Default for UrlsConfig {
    fn default() -> Self {
        let welcome = [
            ("wiki",     "https://wiki.manjaro.org"),
            ("forum",    "https://forum.manjaro.org"),
            ("chat",     "https://kiwiirc.com/client/irc.freenode.net/?nick=manjaro-web|?#manjaro"),
            ("mailling", "https://lists.manjaro.org/cgi-bin/mailman/listinfo"),
            ("development", "https://github.com/manjaro"),
            ("donate",   "https://manjaro.org/donate"),
        ];
        let social = [
            ("facebook", "https://www.facebook.com/ManjaroLinux"),
            ("twitter",  "https://twitter.com/ManjaroLinux"),
            ("reddit",   "https://www.reddit.com/r/ManjaroLinux"),
        ];
        Self {
            welcome: welcome.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            social:  social.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None       => {
                tracing::debug!("no config dir, using defaults");
                Config::default()
            }
        }
    }

    /// Read `path`. A missing file gets the defaults written (first run);
    /// an unreadable or malformed one is left alone and defaults are used.
    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(t)  => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Err(e) = write_defaults(path) {
                    tracing::debug!("could not write default config: {}", e);
                }
                return Config::default();
            }
            Err(e) => {
                tracing::warn!("cannot read {}: {}", path.display(), e);
                return Config::default();
            }
        };
        match toml::from_str(&text) {
            Ok(cfg) => cfg,
            Err(e)  => {
                tracing::warn!("ignoring malformed config {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_NAME).join(format!("{}.toml", APP_NAME)))
    }

    /// Point data, catalogs and the launcher at a source checkout in `root`.
    pub fn with_dev_paths(mut self, root: &Path) -> Self {
        self.paths.data_dir     = root.join("data");
        self.paths.locale_dir   = root.join("locale");
        self.paths.desktop_file = root.join(format!("{}.desktop", self.general.app_name));
        self
    }

    /// The i3 `exec` line that mirrors the autostart entry.
    pub fn i3_exec_line(&self) -> String {
        format!("exec --no-startup-id {}", self.general.app_name)
    }
}

fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# welcomer configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
