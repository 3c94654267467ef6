use crate::collectors::system_facts;
use crate::config::Config;
use crate::locale;
use crate::models::facts::SystemFacts;
use crate::util::{autostart, pages, preferences::Preferences};
use serde_json::{json, Value};
use std::collections::BTreeSet;

/// One running instance: configuration, host facts and the user's
/// preferences, with the active locale resolved.
///
/// Every operation is total. Filesystem failures are logged here and the
/// in-memory state stays authoritative.
pub struct App<'a> {
    cfg:           &'a Config,
    facts:         SystemFacts,
    prefs:         Preferences,
    available:     BTreeSet<String>,
    system_locale: Option<String>,
    locale:        String,
}

impl<'a> App<'a> {
    pub fn new(cfg: &'a Config) -> Self {
        Self::with_system_locale(cfg, locale::system_locale())
    }

    pub fn with_system_locale(cfg: &'a Config, system_locale: Option<String>) -> Self {
        let facts = system_facts::probe(cfg);
        let prefs = Preferences::load(&cfg.paths.preferences_file, &cfg.paths.autostart_file);
        let available = locale::available_locales(
            &cfg.paths.locale_dir,
            &cfg.general.app_name,
            &cfg.general.default_locale,
        );
        let locale = locale::resolve(
            prefs.locale.as_deref(),
            system_locale.as_deref(),
            &available,
            &cfg.general.default_locale,
        );
        tracing::debug!(%locale, ?system_locale, ?available, "resolved locale");

        let mut app = Self { cfg, facts, prefs, available, system_locale, locale };
        if app.prefs.locale.as_deref() != Some(app.locale.as_str()) {
            app.prefs.locale = Some(app.locale.clone());
            app.persist();
        }
        app
    }

    pub fn facts(&self) -> &SystemFacts { &self.facts }
    pub fn preferences(&self) -> &Preferences { &self.prefs }
    pub fn locale(&self) -> &str { &self.locale }
    pub fn available_locales(&self) -> &BTreeSet<String> { &self.available }

    /// Switch to `requested` if a translation exists for it. Returns the
    /// locale in effect afterwards.
    pub fn set_locale(&mut self, requested: &str) -> &str {
        if !self.available.contains(requested) {
            tracing::warn!("no translation for {}, keeping {}", requested, self.locale);
            return &self.locale;
        }
        if requested != self.locale {
            self.locale = requested.to_string();
            self.prefs.locale = Some(self.locale.clone());
            self.persist();
            tracing::info!("locale set to {}", self.locale);
        }
        &self.locale
    }

    /// Enable or disable starting at login. Returns the state actually
    /// found on disk afterwards, which is also what gets stored.
    pub fn set_autostart(&mut self, enabled: bool) -> bool {
        let paths = &self.cfg.paths;
        let observed = match autostart::set(enabled, &paths.desktop_file, &paths.autostart_file) {
            Ok(state) => {
                // i3 follows the entry only once it is in place
                if let Err(e) = autostart::toggle_i3(&paths.i3_config, &self.cfg.i3_exec_line(), state) {
                    tracing::warn!("cannot update {}: {}", paths.i3_config.display(), e);
                }
                state
            }
            Err(e) => {
                tracing::error!("{}", e);
                autostart::is_enabled(&paths.autostart_file)
            }
        };
        if observed != enabled {
            tracing::warn!("autostart requested {} but is {}", enabled, observed);
        }
        self.prefs.autostart = observed;
        self.persist();
        observed
    }

    pub fn pages(&self) -> Vec<String> {
        pages::page_names(&self.cfg.paths.data_dir, &self.cfg.general.default_locale)
    }

    pub fn page(&self, name: &str) -> String {
        pages::read_page(&self.cfg.paths.data_dir, &self.locale, &self.cfg.general.default_locale, name)
    }

    /// Everything a front-end needs to draw the first screen.
    pub fn snapshot(&self) -> Value {
        json!({
            "timestamp":         chrono::Local::now().to_rfc3339(),
            "subtitle":          self.facts.subtitle(),
            "system":            self.facts,
            "installers":        self.facts.launchable_installers(),
            "system_locale":     self.system_locale,
            "locale":            self.locale,
            "available_locales": self.available,
            "preferences":       self.prefs,
            "pages":             self.pages(),
            "urls": {
                "welcome": self.cfg.urls.welcome,
                "social":  self.cfg.urls.social,
            },
        })
    }

    fn persist(&self) {
        if let Err(e) = self.prefs.save(&self.cfg.paths.preferences_file) {
            tracing::warn!("{}", e);
        }
    }
}
