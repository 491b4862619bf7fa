use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use argh::FromArgs;
use colored::Colorize;

use fomse::{
    clean_up, display_name, BackupAction, Cleanup, Error, Layout, Orchestrator, Prompt,
    Selection, Settings, SystemRunner, UnpackOutcome,
};

#[derive(Debug, FromArgs)]
/// Back up, unpack and pack Fields of Mistria saves with VaultC.
///
/// A bare save name such as `farm1.sav` is looked up in the game's saves
/// directory. The executable defaults to `vault_exe` from fomse.toml.
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(Debug, FromArgs)]
#[argh(subcommand)]
enum Command {
    Unpack(UnpackArgs),
    Pack(PackArgs),
    Clean(CleanArgs),
}

#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "unpack")]
/// back up a save, then unpack it into a directory
struct UnpackArgs {
    /// save file to unpack
    #[argh(positional)]
    save: PathBuf,
    /// directory to unpack into
    #[argh(positional)]
    dir: PathBuf,
    /// path to the VaultC executable
    #[argh(option)]
    exe: Option<PathBuf>,
    /// overwrite an existing backup without asking
    #[argh(switch, short = 'y')]
    yes: bool,
    /// do not open the directory afterwards
    #[argh(switch)]
    no_open: bool,
}

#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "pack")]
/// pack a directory into a save, then empty the directory
struct PackArgs {
    /// directory holding the unpacked save
    #[argh(positional)]
    dir: PathBuf,
    /// save file to write
    #[argh(positional)]
    save: PathBuf,
    /// path to the VaultC executable
    #[argh(option)]
    exe: Option<PathBuf>,
}

#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "clean")]
/// delete the files directly inside a directory
struct CleanArgs {
    /// directory to empty
    #[argh(positional)]
    dir: PathBuf,
}

struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm_overwrite(&mut self, backup: &Path) -> bool {
        eprint!(
            "{} The file {} already exists in the backup directory. Do you want to overwrite it? [y/N] ",
            "?".yellow().bold(),
            display_name(backup).bold()
        );
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn main() -> ExitCode {
    fomse::init_logging();
    let args: Args = argh::from_env();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::MissingSelection(requirement)) => {
            eprintln!("{} {}", requirement.title().red().bold(), requirement.message());
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("{} {err}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn load_layout() -> Result<(Settings, Layout), Error> {
    let settings = Settings::load()?;
    let layout = Layout::detect(&settings)?;
    Ok((settings, layout))
}

fn print_cleanup(cleanup: &Cleanup) {
    println!(
        "{}",
        format!(
            "Removed {} file(s) from {}",
            cleanup.removed.len(),
            cleanup.dir.display()
        )
        .dimmed()
    );
    for failure in &cleanup.failed {
        eprintln!(
            "{} could not delete {}: {}",
            "Warning:".yellow().bold(),
            failure.path.display(),
            failure.source
        );
    }
}

fn run(args: Args) -> Result<(), Error> {
    match args.command {
        Command::Unpack(args) => {
            let (settings, layout) = load_layout()?;
            let selection = Selection {
                save_file: Some(args.save),
                work_dir: Some(args.dir),
                executable: args.exe.or(settings.vault_exe),
            };
            let mut orchestrator = Orchestrator::new(layout, SystemRunner)
                .with_open_after_unpack(settings.open_after_unpack && !args.no_open);
            let mut always_yes = |_: &Path| true;
            let mut stdin_prompt = StdinPrompt;
            let prompt: &mut dyn Prompt = if args.yes {
                &mut always_yes
            } else {
                &mut stdin_prompt
            };

            match orchestrator.unpack(&selection, prompt)? {
                UnpackOutcome::Unpacked {
                    backup,
                    target_dir,
                    tool,
                } => {
                    let verb = match backup.action {
                        BackupAction::Overwritten => "Replaced backup",
                        BackupAction::FirstBackup | BackupAction::Copied => "Backed up to",
                    };
                    println!("{verb} {}", backup.path.display().to_string().green());
                    if tool.succeeded() {
                        println!("Unpacked into {}", target_dir.display().to_string().green());
                    } else {
                        eprintln!("{} VaultC {tool}", "Warning:".yellow().bold());
                    }
                }
                UnpackOutcome::Declined { backup } => {
                    println!(
                        "{} {}",
                        "Kept existing backup, nothing unpacked:".dimmed(),
                        backup.display()
                    );
                }
            }
        }
        Command::Pack(args) => {
            let (settings, layout) = load_layout()?;
            let selection = Selection {
                save_file: Some(args.save),
                work_dir: Some(args.dir),
                executable: args.exe.or(settings.vault_exe),
            };
            let mut orchestrator = Orchestrator::new(layout, SystemRunner);
            let outcome = orchestrator.pack(&selection)?;

            if outcome.tool.succeeded() {
                println!("Wrote {}!", outcome.save_file.display().to_string().green());
            } else {
                eprintln!("{} VaultC {}", "Warning:".yellow().bold(), outcome.tool);
            }
            match &outcome.cleanup {
                Ok(cleanup) => print_cleanup(cleanup),
                Err(err) => eprintln!("{} cleanup skipped: {err}", "Warning:".yellow().bold()),
            }
        }
        Command::Clean(args) => {
            let selection = Selection {
                work_dir: Some(args.dir),
                ..Selection::default()
            };
            let cleanup = clean_up(&selection)?;
            print_cleanup(&cleanup);
        }
    }

    Ok(())
}
