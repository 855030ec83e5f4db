use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use gitint_dag::{HistoryWalker, LogEntry, TreeWalker};
use gitint_refs::{list_branches, render_branch_list, FsRefStore, RefStore};
use gitint_store::{LooseObjectStore, Object, ObjectStore};
use gitint_types::ObjectHash;
use serde_json::json;
use tracing::{debug, warn};

use crate::cli::{Cli, Command, LogArgs, OutputFormat};
use crate::config::CliConfig;
use crate::prompt;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::resolve(&cli)?;
    if !config.color {
        colored::control::set_override(false);
    }
    let mut out = io::stdout().lock();
    match cli.command {
        Some(command) => Session::open(&config.git_dir, config.format).execute(&command, &mut out),
        None => prompt::run_prompt(&config, io::stdin().lock(), &mut out, &mut io::stderr()),
    }
}

/// Stores for one repository plus the output format.
pub struct Session {
    objects: LooseObjectStore,
    refs: FsRefStore,
    format: OutputFormat,
}

impl Session {
    pub fn open(git_dir: &Path, format: OutputFormat) -> Self {
        if !git_dir.join("objects").is_dir() {
            warn!(path = %git_dir.display(), "no objects directory; is this a repository?");
        }
        debug!(path = %git_dir.display(), "opened repository");
        Self {
            objects: LooseObjectStore::open(PathBuf::from(git_dir)),
            refs: FsRefStore::open(PathBuf::from(git_dir)),
            format,
        }
    }

    /// Run one command, naming it and its argument in any error.
    pub fn execute(&self, command: &Command, out: &mut dyn Write) -> anyhow::Result<()> {
        match command {
            Command::ListBranches => self.cmd_list_branches(out).context("list-branches"),
            Command::CatFile { hash } => self
                .cmd_cat_file(hash, out)
                .with_context(|| format!("cat-file {hash}")),
            Command::Log(args) => self
                .cmd_log(args, out)
                .with_context(|| format!("log {}", args.branch)),
            Command::CommitTree { hash } => self
                .cmd_commit_tree(hash, out)
                .with_context(|| format!("commit-tree {hash}")),
        }
    }

    fn cmd_list_branches(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        let branches = list_branches(&self.refs)?;
        match self.format {
            OutputFormat::Text => writeln!(out, "{}", render_branch_list(&branches))?,
            OutputFormat::Json => write_json(out, &branches)?,
        }
        Ok(())
    }

    fn cmd_cat_file(&self, hash: &str, out: &mut dyn Write) -> anyhow::Result<()> {
        let hash = parse_hash(hash)?;
        let object = self.objects.read_object(&hash)?;
        if self.format == OutputFormat::Json {
            let body = match &object {
                Object::Blob(blob) => json!({ "content": blob.text() }),
                Object::Tree(tree) => json!({ "entries": tree.entries }),
                Object::Commit(commit) => json!({
                    "commit": commit,
                    "author": commit.author_line(),
                    "committer": commit.committer_line(),
                }),
            };
            return write_json(out, &json!({ "hash": hash, "kind": object.kind(), "object": body }));
        }

        writeln!(out, "*{}*", object.kind().as_str().to_uppercase())?;
        match object {
            Object::Blob(blob) => writeln!(out, "{}", blob.text())?,
            Object::Tree(tree) => writeln!(out, "{}", tree.catalog())?,
            Object::Commit(commit) => writeln!(out, "{commit}")?,
        }
        Ok(())
    }

    fn cmd_log(&self, args: &LogArgs, out: &mut dyn Write) -> anyhow::Result<()> {
        let branch = self.refs.read_branch(&args.branch)?;
        let limit = args.max_count.unwrap_or(usize::MAX);
        let walker = HistoryWalker::new(&self.objects, branch.tip).take(limit);
        match self.format {
            OutputFormat::Text => {
                for entry in walker {
                    writeln!(out, "{}", entry?.render())?;
                }
            }
            OutputFormat::Json => {
                let entries: Vec<LogEntry> = walker.collect::<Result<_, _>>()?;
                write_json(out, &entries)?;
            }
        }
        Ok(())
    }

    fn cmd_commit_tree(&self, hash: &str, out: &mut dyn Write) -> anyhow::Result<()> {
        let hash = parse_hash(hash)?;
        let commit = self.objects.read_commit(&hash)?;
        let walker = TreeWalker::new(&self.objects, commit.tree)?;
        match self.format {
            OutputFormat::Text => {
                for path in walker {
                    writeln!(out, "{}", path?)?;
                }
            }
            OutputFormat::Json => {
                let paths: Vec<String> = walker.collect::<Result<_, _>>()?;
                write_json(out, &paths)?;
            }
        }
        Ok(())
    }
}

fn parse_hash(input: &str) -> anyhow::Result<ObjectHash> {
    ObjectHash::from_hex(input.trim()).with_context(|| format!("invalid object hash {input:?}"))
}

fn write_json<T: serde::Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
