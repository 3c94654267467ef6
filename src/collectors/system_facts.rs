use crate::collectors::distro_info;
use crate::config::Config;
use crate::models::facts::{Arch, Installer, SystemFacts};

/// Probe the host once: distro identity, word size, live media and installers.
pub fn probe(cfg: &Config) -> SystemFacts {
    let mut info = distro_info::read(&cfg.system.lsb_release);
    let is_live = cfg.system.live_markers.iter().any(|p| p.exists());

    let mut installers = Vec::new();
    if cfg.system.gui_installer.is_file() { installers.push(Installer::Gui); }
    if cfg.system.cli_installer.is_file() { installers.push(Installer::Cli); }

    let facts = SystemFacts {
        codename: info.remove("CODENAME"),
        release:  info.remove("RELEASE"),
        arch:     Arch::native(),
        is_live,
        installers,
    };
    tracing::debug!(?facts, "probed system");
    facts
}
