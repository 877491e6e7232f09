use clap::{Parser, Subcommand};
use colored::Colorize;
use gitlet::areas::repository::Repository;
use gitlet::artifacts::checkout::target::CheckoutTarget;
use gitlet::artifacts::core::PagerWriter;
use gitlet::config::{Config, GITLET_DIR, LOG_ENV};
use gitlet::errors::GitletError;
use is_terminal::IsTerminal;
use minus::Pager;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Every command name, checked before clap sees the arguments so that the
/// uninitialized-repository check runs ahead of operand validation
const COMMANDS: phf::Set<&'static str> = phf::phf_set! {
    "init",
    "add",
    "commit",
    "rm",
    "log",
    "global-log",
    "find",
    "branch",
    "rm-branch",
    "checkout",
};

#[derive(Parser)]
#[command(
    name = "gitlet",
    version,
    about = "A minimal local version-control system",
    long_about = "gitlet tracks snapshots of a working directory in a content-addressed store \
    under .gitlet, with a staging area, branches and checkout.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

COMMANDS:
{subcommands}

OPTIONS:
    {options}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a repository in the current directory",
        long_about = "This command creates .gitlet with the initial commit and a master branch pointing at it."
    )]
    Init,
    #[command(name = "add", about = "Stage a file's current content for the next commit")]
    Add {
        #[arg(index = 1)]
        path: String,
    },
    #[command(name = "commit", about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal and delete it if HEAD tracks it"
    )]
    Rm {
        #[arg(index = 1)]
        path: String,
    },
    #[command(name = "log", about = "Show the history of HEAD")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of the commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "branch", about = "Create a branch at HEAD")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout <branch> switches branches, checkout -- <file> restores a file \
        from HEAD and checkout <commit-id> -- <file> restores it from the given commit."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name, or commit id when a file is given")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        path: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Checks that have to happen before argument parsing
fn precheck(args: &[String], root: &Path) -> Result<(), GitletError> {
    let Some(command) = args.get(1) else {
        return Err(GitletError::NoCommand);
    };

    // leave --help and --version to clap
    if command.starts_with('-') {
        return Ok(());
    }

    if !COMMANDS.contains(command.as_str()) {
        return Err(GitletError::UnknownCommand(command.clone()));
    }

    if command != "init" && !root.join(GITLET_DIR).is_dir() {
        return Err(GitletError::NotInitialized);
    }

    Ok(())
}

fn pager_for(command: &Commands, config: &Config) -> Option<Pager> {
    let pages = matches!(command, Commands::Log | Commands::GlobalLog);

    (pages && config.paging() && std::io::stdout().is_terminal()).then(Pager::new)
}

async fn run(repository: &mut Repository, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init => repository.init().await,
        Commands::Add { path } => repository.add(&path).await,
        Commands::Commit { message } => repository.commit(message.as_deref().unwrap_or("")).await,
        Commands::Rm { path } => repository.rm(&path).await,
        Commands::Log => repository.log().await,
        Commands::GlobalLog => repository.global_log().await,
        Commands::Find { message } => repository.find(&message).await,
        Commands::Branch { name } => repository.branch(&name).await,
        Commands::RmBranch { name } => repository.rm_branch(&name).await,
        Commands::Checkout { target, path } => {
            repository
                .checkout(CheckoutTarget::from_operands(target, path)?)
                .await
        }
    }
}

/// User mistakes are a single line on stdout and a clean exit; anything else
/// is a fatal error on stderr
fn report(error: anyhow::Error) -> ExitCode {
    match error.downcast_ref::<GitletError>() {
        Some(gitlet_error) if !gitlet_error.is_fatal() => {
            println!("{gitlet_error}");
            ExitCode::SUCCESS
        }
        _ => {
            tracing::debug!(?error, "command failed");
            eprintln!("{} {:#}", "fatal:".red().bold(), error);
            ExitCode::FAILURE
        }
    }
}

/// `checkout <target> --` names no file, so it is neither a branch switch nor
/// a file restore
fn has_dangling_separator(command: &Commands, args: &[String]) -> bool {
    matches!(command, Commands::Checkout { path: None, .. })
        && args.iter().any(|arg| arg == "--")
}

async fn execute(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;

    let lossy_args = raw_args
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    precheck(&lossy_args, &root)?;

    let args = raw_args
        .into_iter()
        .map(OsString::into_string)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|arg| {
            tracing::debug!(?arg, "argument is not valid UTF-8");
            GitletError::IncorrectOperands
        })?;

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(error) if !error.use_stderr() => {
            // --help and --version
            error.print()?;
            return Ok(());
        }
        Err(error) => {
            tracing::debug!(%error, "rejected operands");
            return Err(GitletError::IncorrectOperands.into());
        }
    };

    if has_dangling_separator(&cli.command, &args) {
        return Err(GitletError::IncorrectOperands.into());
    }

    let config = Config::from_env(&root)?;
    let pager = pager_for(&cli.command, &config);
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let mut repository = Repository::new(config, writer);
    run(&mut repository, cli.command).await?;
    repository.writer().flush()?;

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    colored::control::set_override(std::io::stderr().is_terminal());

    match execute(std::env::args_os().collect()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(error),
    }
}
