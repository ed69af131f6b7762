//! Flip Wheel CLI - flip the scroll-wheel direction of HID mice.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io::{self, BufRead, IsTerminal};

use clap::Parser;
use tracing::{debug, info};

use fw::cli::{Cli, Commands, CompletionsArgs, ListArgs, ToggleArgs};
use fw::config::{RuntimeConfig, Settings};
use fw::device::{DeviceCatalog, DeviceInstance};
use fw::error::{FwError, Result};
use fw::logging;
use fw::output::{InstanceRow, MouseRow, Output, OutputMode, ToggleReport, VersionInfo};
use fw::select::parse_selection;
use fw::store::{self, BoxedStore, StorePath};
use fw::wheel::WheelController;

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> &'static str {
        option_env!("VERGEN_GIT_DIRTY").unwrap_or("false")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
    }
    if cli.no_color || !io::stderr().is_terminal() {
        console::set_colors_enabled_stderr(false);
    }

    logging::init_logging(cli.use_json(), cli.verbose, cli.quiet);

    let output = OutputMode::from_cli(&cli).into_output();

    if let Err(e) = run(&cli, output.as_ref()) {
        output.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &dyn Output) -> Result<()> {
    match &cli.command {
        None => cmd_interactive(cli, out),
        Some(Commands::List(args)) => cmd_list(cli, out, args),
        Some(Commands::Toggle(args)) => cmd_toggle(cli, out, args),
        Some(Commands::Version) => cmd_version(out),
        Some(Commands::Completions(args)) => cmd_completions(args),
    }
}

// === Store Session ===

/// An open store plus the catalog root, shared by one command.
struct Session {
    store: BoxedStore,
    root: StorePath,
}

impl Session {
    fn open(cli: &Cli) -> Result<Self> {
        let settings = Settings::discover(cli.config.as_deref())?;
        let config = RuntimeConfig::resolve(&settings, cli.root.as_deref(), cli.store.as_deref());
        debug!(root = %config.root, source = ?config.source, "Opening store");
        Ok(Self {
            store: store::open(&config.source)?,
            root: config.root,
        })
    }

    fn catalog(&self) -> DeviceCatalog<'_> {
        DeviceCatalog::new(self.store.as_ref(), self.root.clone())
    }

    fn controller(&self) -> WheelController<'_> {
        WheelController::new(self.store.as_ref(), self.root.clone())
    }

    fn load_mice(&self) -> Result<Vec<DeviceInstance>> {
        let mice = self.catalog().load_mice()?;
        info!(count = mice.len(), "Mice loaded");
        Ok(mice)
    }
}

// === Command Implementations ===

fn cmd_list(cli: &Cli, out: &dyn Output, args: &ListArgs) -> Result<()> {
    let session = Session::open(cli)?;

    if args.all {
        let rows: Vec<InstanceRow> = session
            .catalog()
            .load_all()?
            .iter()
            .map(InstanceRow::from)
            .collect();
        out.instance_list(&rows);
    } else {
        let mice = session.load_mice()?;
        out.mouse_table(&MouseRow::collect(&session.controller(), &mice));
    }
    Ok(())
}

fn cmd_toggle(cli: &Cli, out: &dyn Output, args: &ToggleArgs) -> Result<()> {
    let session = Session::open(cli)?;
    let mice = session.load_mice()?;
    if mice.is_empty() {
        return Err(FwError::NoMiceFound);
    }

    let index = parse_selection(&args.index, mice.len())?;
    toggle_selected(&session, out, &mice, index, args.dry_run)
}

fn cmd_interactive(cli: &Cli, out: &dyn Output) -> Result<()> {
    let session = Session::open(cli)?;
    let mice = session.load_mice()?;

    if mice.is_empty() {
        return Err(FwError::NoMiceFound);
    }
    out.mouse_table(&MouseRow::collect(&session.controller(), &mice));

    out.prompt("Which device you want to flip?\nPlease enter the index: ");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    debug!(line = line.trim_end(), "Selection read");

    let index = parse_selection(&line, mice.len())?;
    toggle_selected(&session, out, &mice, index, false)
}

fn toggle_selected(
    session: &Session,
    out: &dyn Output,
    mice: &[DeviceInstance],
    index: usize,
    dry_run: bool,
) -> Result<()> {
    let mouse = &mice[index];
    let controller = session.controller();

    let transition = if dry_run {
        controller.plan_toggle(mouse)?
    } else {
        controller.apply_toggle(mouse)?
    };

    out.toggle_result(&ToggleReport::new(index, mouse, transition, dry_run));
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_version(out: &dyn Output) -> Result<()> {
    out.version_info(&VersionInfo {
        version: build_info::VERSION,
        git_sha: build_info::git_sha(),
        git_dirty: build_info::git_dirty() == "true",
        build_timestamp: build_info::build_timestamp(),
        rustc_version: build_info::rustc_semver(),
        target: build_info::target(),
    });
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(args: &CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "fw", &mut io::stdout());
    Ok(())
}
