//! Interactive session: ask for a repository, then run commands until `exit`.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use tracing::debug;

use crate::cli::{Command, LogArgs};
use crate::commands::Session;
use crate::config::CliConfig;

pub fn run_prompt(
    config: &CliConfig,
    mut input: impl BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> anyhow::Result<()> {
    let Some(answer) = ask(&mut input, out, "Enter .git directory location:")? else {
        return Ok(());
    };
    let git_dir = if answer.is_empty() {
        config.git_dir.clone()
    } else {
        PathBuf::from(answer)
    };
    let session = Session::open(&git_dir, config.format);

    loop {
        let Some(line) = ask(&mut input, out, "Enter command:")? else {
            break;
        };
        let command = match line.as_str() {
            "" => continue,
            "exit" | "quit" => break,
            "list-branches" => Command::ListBranches,
            "cat-file" => match ask(&mut input, out, "Enter git object hash:")? {
                Some(hash) => Command::CatFile { hash },
                None => break,
            },
            "log" => match ask(&mut input, out, "Enter branch name:")? {
                Some(branch) => Command::Log(LogArgs {
                    branch,
                    max_count: None,
                }),
                None => break,
            },
            "commit-tree" => match ask(&mut input, out, "Enter commit-hash:")? {
                Some(hash) => Command::CommitTree { hash },
                None => break,
            },
            other => {
                writeln!(err, "{} unknown command {other:?}", "error:".red())?;
                continue;
            }
        };

        debug!(command = command.name(), "prompt command");
        if let Err(e) = session.execute(&command, out) {
            writeln!(err, "{} {e:#}", "error:".red())?;
        }
    }
    Ok(())
}

/// Print `question` and read one trimmed answer; `None` at end of input.
fn ask(input: &mut impl BufRead, out: &mut dyn Write, question: &str) -> anyhow::Result<Option<String>> {
    writeln!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::Fixture;

    fn session(config: &CliConfig, script: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_prompt(config, script.as_bytes(), &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn runs_commands_until_exit() {
        let fixture = Fixture::sample();
        let script = format!(
            "{}\nlist-branches\ncat-file\n{}\nexit\nlist-branches\n",
            fixture.path().display(),
            Fixture::BLOB_A
        );
        let (out, err) = session(&CliConfig::default(), &script);

        assert!(out.starts_with("Enter .git directory location:\nEnter command:\n"));
        assert!(out.contains("  dev\n* main\n"));
        assert!(out.contains("Enter git object hash:\n*BLOB*\nalpha\n"));
        assert_eq!(out.matches("* main").count(), 1);
        assert!(err.is_empty());
    }

    #[test]
    fn empty_location_uses_configured_dir() {
        let fixture = Fixture::sample();
        let config = CliConfig {
            git_dir: fixture.path().to_path_buf(),
            ..CliConfig::default()
        };
        let (out, _) = session(&config, "\ncommit-tree\n");
        assert!(out.contains("Enter commit-hash:\n"));
        // End of input while waiting for the hash ends the session quietly.
        assert!(!out.contains("a.txt"));

        let script = format!("\ncommit-tree\n{}\n", Fixture::C2);
        let (out, _) = session(&config, &script);
        assert!(out.contains("a.txt\nsub/b.txt\n"));
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let fixture = Fixture::sample();
        let script = format!(
            "{}\nfrobnicate\nlog\nnope\nlog\nmain\nquit\n",
            fixture.path().display()
        );
        let (out, err) = session(&CliConfig::default(), &script);

        assert!(err.contains("unknown command \"frobnicate\""));
        assert!(err.contains("log nope"));
        assert!(out.contains(&format!("Commit: {}\n", Fixture::MERGE)));
    }

    #[test]
    fn end_of_input_before_location() {
        let (out, err) = session(&CliConfig::default(), "");
        assert_eq!(out, "Enter .git directory location:\n");
        assert!(err.is_empty());
    }
}
