use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use grove::artifacts::objects::commit::Signature;
use grove::artifacts::objects::object::Object;
use grove::commands::porcelain::log::DEFAULT_LOG_LIMIT;
use grove::{AddOutcome, BranchOutcome, CommitOutcome, LogOutcome, Repository};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "grove",
    version = "0.1.0",
    about = "A minimal content-addressed version control system",
    long_about = "grove stores file snapshots as content-addressed blobs, trees and commits \
    below a .grove directory, with plain-file branches and a symbolic HEAD.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Repository root (defaults to the current directory)"
    )]
    dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository")]
    Init,
    #[command(
        name = "add",
        about = "Stage files or directories",
        long_about = "Store the content of each file as a blob and record it in the index. \
        Directories are staged recursively. Paths are relative to the repository root."
    )]
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Record the staged snapshot on the current branch"
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(
            long,
            help = "Author identity, e.g. \"Jane Doe <jane@example.com>\"; \
            defaults to GROVE_AUTHOR_NAME/GROVE_AUTHOR_EMAIL"
        )]
        author: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch branches, rebuilding the working directory"
    )]
    Checkout {
        #[arg(
            short = 'b',
            long = "create-branch",
            help = "Create the branch from the current commit first"
        )]
        create: bool,
        branch: String,
    },
    #[command(name = "branch", about = "List, create or delete branches")]
    Branch {
        #[arg(short, long, requires = "name", help = "Delete the named branch")]
        delete: bool,
        name: Option<String>,
    },
    #[command(name = "log", about = "Show the current branch's mainline history")]
    Log {
        #[arg(
            short = 'n',
            long = "max-count",
            visible_alias = "number",
            default_value_t = DEFAULT_LOG_LIMIT,
            help = "Number of commits to show"
        )]
        limit: usize,
    },
    #[command(
        name = "hash-object",
        about = "Compute a file's blob id and optionally store it"
    )]
    HashObject {
        #[arg(short, long, help = "Write the blob to the object store")]
        write: bool,
        file: PathBuf,
    },
    #[command(name = "cat-file", about = "Print the content of a stored object")]
    CatFile {
        #[arg(short = 'p', help = "The object id to print")]
        oid: String,
    },
    #[command(
        name = "write-tree",
        about = "Store the tree for the current index and print its id"
    )]
    WriteTree,
    #[command(name = "ls-tree", about = "List the entries of a tree or commit")]
    LsTree { oid: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let root = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let repository = Repository::new(&root)
        .with_context(|| format!("Failed to open repository at {}", root.display()))?;

    match cli.command {
        Commands::Init => {
            repository.init()?;
            println!(
                "Initialized empty repository in {}",
                repository.meta_path().display()
            );
        }
        Commands::Add { paths } => {
            for outcome in repository.add(paths.as_slice())? {
                match outcome {
                    AddOutcome::File { path } => println!("{path} added"),
                    AddOutcome::Directory { path, count: 0 } => {
                        println!("Directory {} is already up to date", display_dir(&path))
                    }
                    AddOutcome::Directory { path, count } => {
                        println!("Added {count} files from directory {}", display_dir(&path))
                    }
                }
            }
        }
        Commands::Commit { message, author } => {
            let author = Signature::resolve_identity(author.as_deref());
            match repository.commit(&message, &author)? {
                CommitOutcome::Created { oid, branch, root } => {
                    let root = if root { "(root-commit) " } else { "" };
                    println!("[{branch} {root}{}] {}", oid.to_short_oid(), first_line(&message));
                }
                CommitOutcome::NothingToCommit => println!("Nothing to commit, index is empty"),
                CommitOutcome::WorkingTreeClean => {
                    println!("Nothing to commit, working tree clean")
                }
            }
        }
        Commands::Checkout { create, branch } => {
            let outcome = repository.checkout(&branch, create)?;
            if outcome.created {
                println!("Switched to a new branch '{}'", outcome.branch);
            } else {
                println!("Switched to branch '{}'", outcome.branch);
            }
        }
        Commands::Branch { delete, name } => match repository.branch(name.as_deref(), delete)? {
            BranchOutcome::Created { branch, oid } => {
                println!("Created branch {branch} at {}", oid.to_short_oid())
            }
            BranchOutcome::Deleted { branch, oid } => match oid {
                Some(oid) => println!("Deleted branch {branch} (was {})", oid.to_short_oid()),
                None => println!("Deleted branch {branch}"),
            },
            BranchOutcome::Listed(listing) => {
                for branch in &listing.branches {
                    if listing.is_current(branch) {
                        println!("* {}", branch.to_string().green());
                    } else {
                        println!("  {branch}");
                    }
                }
            }
        },
        Commands::Log { limit } => match repository.log(limit)? {
            LogOutcome::NoCommits => println!("No commits yet"),
            LogOutcome::Entries(entries) => {
                for entry in entries {
                    println!("{} {}", "commit".yellow(), entry.oid.to_string().yellow());
                    println!("Author: {}", entry.author);
                    println!("Date:   {}", entry.timestamp);
                    println!();
                    for line in entry.message.lines() {
                        println!("    {line}");
                    }
                    println!();
                }
            }
        },
        Commands::HashObject { write, file } => {
            println!("{}", repository.hash_object(&file, write)?);
        }
        Commands::CatFile { oid } => match repository.cat_file(&oid)? {
            Object::Blob(blob) => {
                use std::io::Write;
                std::io::stdout().write_all(blob.content())?;
            }
            Object::Tree(tree) => {
                for entry in tree.entries() {
                    println!(
                        "{} {} {}\t{}",
                        entry.mode,
                        entry.mode.object_type(),
                        entry.oid,
                        entry.name
                    );
                }
            }
            Object::Commit(commit) => {
                print!("{}", String::from_utf8_lossy(&Object::Commit(commit).content()));
            }
        },
        Commands::WriteTree => {
            println!("{}", repository.write_tree()?);
        }
        Commands::LsTree { oid } => {
            for entry in repository.ls_tree(&oid)? {
                println!(
                    "{} {} {}\t{}",
                    entry.mode,
                    entry.mode.object_type(),
                    entry.oid,
                    entry.name
                );
            }
        }
    }

    Ok(())
}

fn display_dir(path: &str) -> &str {
    if path.is_empty() { "." } else { path }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}
