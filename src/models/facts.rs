use serde::Serialize;
use std::fmt;

/// Native word size of the running build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Arch {
    #[serde(rename = "32-bit")]
    Bits32,
    #[serde(rename = "64-bit")]
    Bits64,
}

impl Arch {
    /// Pointer width of the compiled target. Constant for the life of the process.
    pub fn native() -> Self {
        if usize::BITS > 32 { Arch::Bits64 } else { Arch::Bits32 }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Arch::Bits32 => "32-bit",
            Arch::Bits64 => "64-bit",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Installer {
    /// Graphical installer (calamares)
    Gui,
    /// Text-mode installer
    Cli,
}

impl Installer {
    pub fn label(&self) -> &'static str {
        match self {
            Installer::Gui => "graphical",
            Installer::Cli => "text-mode",
        }
    }
}

/// Read-only snapshot of the host, taken once at startup.
#[derive(Debug, Clone, Serialize)]
pub struct SystemFacts {
    pub codename:   Option<String>,
    pub release:    Option<String>,
    pub arch:       Arch,
    pub is_live:    bool,
    /// Installer binaries found on disk
    pub installers: Vec<Installer>,
}

impl SystemFacts {
    /// Installers are only offered when booted from live media.
    pub fn launchable_installers(&self) -> &[Installer] {
        if self.is_live { &self.installers } else { &[] }
    }

    /// Window subtitle: "Codename Release 64-bit", or just the arch when
    /// the distro file is missing either field.
    pub fn subtitle(&self) -> String {
        match (&self.codename, &self.release) {
            (Some(c), Some(r)) => format!("{} {} {}", c, r, self.arch),
            _                  => self.arch.to_string(),
        }
    }
}
