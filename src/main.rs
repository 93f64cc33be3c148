use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use liftspec::Config;
use liftspec::config::PROJECTS_DIR_ENV;
use liftspec::core::{StepId, wizard::stale_sections};

#[derive(Parser)]
#[command(name = "liftspec")]
#[command(about = "Enter structured engineering specifications for lift installations")]
struct Cli {
    /// Directory holding the project files
    #[arg(long, value_name = "DIR", env = PROJECTS_DIR_ENV, global = true)]
    projects_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the desktop wizard (default)
    Gui,
    /// List projects, most recently modified first
    List,
    /// Print the sections saved in a project
    Show {
        /// Project name or path to a project file
        #[arg(value_name = "PROJECT")]
        project: PathBuf,
    },
    /// Report sections that no longer match the lift or stop counts
    Check {
        /// Project name or path to a project file
        #[arg(value_name = "PROJECT")]
        project: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "liftspec=debug" } else { "liftspec=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let config = Config::resolve(args.projects_dir)?;
    let store = config.store();

    match args.command.unwrap_or(Command::Gui) {
        Command::Gui => run_gui(config),
        Command::List => {
            let projects = store.list_recent()?;
            if projects.is_empty() {
                println!("No projects in {:?}", store.root());
            }
            for project in &projects {
                println!(
                    "{:<32} created {:<19}  modified {}",
                    project.name,
                    project.created_label(),
                    project.modified_label()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Show { project } => {
            let state = store.open(&project)?;
            println!("Project: {}", state.file_name().unwrap_or("(unnamed)"));
            for step in StepId::ALL {
                match step {
                    StepId::Floors => match state.floors() {
                        Some(lifts) => {
                            println!("{step}: {} lift(s)", lifts.len());
                            for lift in lifts {
                                println!("    {}: {} floor(s)", lift.lift, lift.floors.len());
                            }
                        }
                        None => println!("{step}: not saved"),
                    },
                    _ => match state.records(step) {
                        Some(records) => println!("{step}: {} record(s)", records.len()),
                        None => println!("{step}: not saved"),
                    },
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { project } => {
            let state = store.open(&project)?;
            let stale = stale_sections(&state);
            if stale.is_empty() {
                println!("All saved sections match the current lift and stop counts.");
                return Ok(ExitCode::SUCCESS);
            }
            for section in &stale {
                println!(
                    "{}: {} saved, {} expected",
                    section.step.section_name(),
                    section.saved,
                    section.expected
                );
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(feature = "gui")]
fn run_gui(config: Config) -> anyhow::Result<ExitCode> {
    liftspec::gui::run(config)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "gui"))]
fn run_gui(_config: Config) -> anyhow::Result<ExitCode> {
    anyhow::bail!("this build has no GUI; enable the `gui` feature or use `list`, `show` or `check`")
}
