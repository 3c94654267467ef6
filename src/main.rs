mod app;
mod collectors;
mod config;
mod locale;
mod logging;
mod models;
mod util;

use anyhow::Result;
use app::App;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use config::Config;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Parser, Debug)]
#[command(name = "welcomer", about = "Distribution welcome: system info, language, autostart and docs", version = "0.1")]
struct Cli {
    /// Print distribution and system information
    #[arg(long)]
    info: bool,

    /// Print a JSON snapshot of system facts, preferences, pages and links
    #[arg(long)]
    json: bool,

    /// Switch the interface language (must have a translation)
    #[arg(long, value_name = "LOCALE")]
    set_locale: Option<String>,

    /// Start at login
    #[arg(long, value_enum, value_name = "STATE")]
    autostart: Option<Toggle>,

    /// Print a documentation page in the active language
    #[arg(long, value_name = "NAME")]
    page: Option<String>,

    /// List available documentation pages
    #[arg(long)]
    pages: bool,

    /// Print documentation, community and social links
    #[arg(long)]
    links: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Use data, translations and launcher from the current directory
    #[arg(long)]
    dev: bool,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "welcomer", &mut io::stdout());
        return Ok(());
    }

    let mut cfg = Config::load();
    if cli.dev {
        cfg = cfg.with_dev_paths(&std::env::current_dir()?);
    }
    if cli.config {
        return run_print_config(&cfg);
    }

    let mut app = App::new(&cfg);

    if let Some(requested) = &cli.set_locale {
        println!("Language: {}", app.set_locale(requested));
    }
    if let Some(state) = cli.autostart {
        let on = app.set_autostart(state == Toggle::On);
        println!("Autostart: {}", if on { "on" } else { "off" });
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
        return Ok(());
    }
    if let Some(name) = &cli.page {
        println!("{}", app.page(name));
        return Ok(());
    }
    if cli.pages {
        for name in app.pages() {
            println!("{}", name);
        }
        return Ok(());
    }
    if cli.links {
        return run_links(&cfg);
    }
    if cli.info || (cli.set_locale.is_none() && cli.autostart.is_none()) {
        run_info(&app);
    }
    Ok(())
}

fn run_info(app: &App) {
    let facts = app.facts();
    let or_unknown = |v: &Option<String>| v.clone().unwrap_or_else(|| "(unknown)".to_string());

    println!("{}", facts.subtitle());
    println!();
    println!("  codename   = {}", or_unknown(&facts.codename));
    println!("  release    = {}", or_unknown(&facts.release));
    println!("  arch       = {}", facts.arch);
    println!("  live       = {}", facts.is_live);
    let installers: Vec<&str> = facts.launchable_installers().iter().map(|i| i.label()).collect();
    if installers.is_empty() {
        println!("  installers = (none)");
    } else {
        println!("  installers = {}", installers.join(", "));
    }
    println!("  language   = {}", app.locale());
    let languages: Vec<&str> = app.available_locales().iter().map(String::as_str).collect();
    println!("  languages  = {}", languages.join(", "));
    println!("  autostart  = {}", if app.preferences().autostart { "on" } else { "off" });
}

fn run_links(cfg: &Config) -> Result<()> {
    println!("[welcome]");
    for (name, url) in &cfg.urls.welcome {
        println!("  {:<12} {}", name, url);
    }
    println!();
    println!("[social]");
    for (name, url) in &cfg.urls.social {
        println!("  {:<12} {}", name, url);
    }
    Ok(())
}

fn run_print_config(cfg: &Config) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let p = &cfg.paths;
    let s = &cfg.system;
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  app_name         = {}", cfg.general.app_name);
    println!("  default_locale   = {}", cfg.general.default_locale);
    println!();
    println!("[paths]");
    println!("  data_dir         = {}", p.data_dir.display());
    println!("  locale_dir       = {}", p.locale_dir.display());
    println!("  preferences_file = {}", p.preferences_file.display());
    println!("  desktop_file     = {}", p.desktop_file.display());
    println!("  autostart_file   = {}", p.autostart_file.display());
    println!("  i3_config        = {}", p.i3_config.display());
    println!();
    println!("[system]");
    println!("  lsb_release      = {}", s.lsb_release.display());
    for marker in &s.live_markers {
        println!("  live_marker      = {}", marker.display());
    }
    println!("  gui_installer    = {}", s.gui_installer.display());
    println!("  cli_installer    = {}", s.cli_installer.display());
    println!();
    println!("[urls]");
    println!("  welcome = {} link(s), social = {} link(s)", cfg.urls.welcome.len(), cfg.urls.social.len());
    Ok(())
}
