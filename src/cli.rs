use crate::capability::acquire;
use crate::config::settings;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Trace every native call (same as POSIXCAP_VERBOSE=1)
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print file status as JSON
    Stat {
        /// Do not follow a trailing symlink
        #[arg(long)]
        no_follow: bool,
        path: PathBuf,
    },
    /// Change permission bits, including setuid/setgid/sticky
    Chmod {
        /// Do not follow a trailing symlink (BSD/macOS only)
        #[arg(long)]
        no_follow: bool,
        /// Octal mode, e.g. 2755 or 0o2755
        #[arg(value_parser = parse_octal_mode)]
        mode: u32,
        path: PathBuf,
    },
    /// Change owner and/or group
    Chown {
        #[arg(long)]
        no_follow: bool,
        #[arg(long)]
        uid: Option<u32>,
        #[arg(long)]
        gid: Option<u32>,
        path: PathBuf,
    },
    /// Print a symlink's target
    Readlink { path: PathBuf },
    /// Print the current umask, or install a new one and print the old
    Umask {
        #[arg(value_parser = parse_octal_mode)]
        mode: Option<u32>,
    },
    /// Print process ids
    Ids,
    /// Print the selected binding
    Platform,
}

#[derive(Serialize)]
struct Ids {
    pid: u32,
    uid: u32,
    euid: u32,
    gid: u32,
    egid: u32,
}

#[derive(Serialize)]
struct PlatformReport {
    platform: crate::config::types::PlatformFamily,
    native: bool,
    verbose: bool,
}

/// Parse an octal mode string. Accepts an optional `0o` prefix.
pub fn parse_octal_mode(value: &str) -> std::result::Result<u32, String> {
    let digits = value.strip_prefix("0o").unwrap_or(value);
    let mode = u32::from_str_radix(digits, 8)
        .map_err(|e| format!("invalid octal mode {:?}: {}", value, e))?;
    if mode > 0o7777 {
        return Err(format!("mode {:o} exceeds 7777", mode));
    }
    Ok(mode)
}

pub fn run() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.verbose {
        settings::set_verbose(true);
    }

    let posix = acquire();

    match cli.command {
        Commands::Stat { no_follow, path } => {
            let stat = if no_follow {
                posix.lstat(&path)?
            } else {
                posix.stat(&path)?
            };
            println!("{}", serde_json::to_string_pretty(&stat)?);
        }
        Commands::Chmod {
            no_follow,
            mode,
            path,
        } => {
            if no_follow {
                posix.lchmod(&path, mode)?;
            } else {
                posix.chmod(&path, mode)?;
            }
            log::info!("Set mode {:o} on {}", mode, path.display());
        }
        Commands::Chown {
            no_follow,
            uid,
            gid,
            path,
        } => {
            if uid.is_none() && gid.is_none() {
                anyhow::bail!("chown needs --uid and/or --gid");
            }
            if no_follow {
                posix.lchown(&path, uid, gid)?;
            } else {
                posix.chown(&path, uid, gid)?;
            }
        }
        Commands::Readlink { path } => {
            let target = posix
                .readlink(&path)
                .with_context(|| format!("reading link {}", path.display()))?;
            println!("{}", target.display());
        }
        Commands::Umask { mode } => match mode {
            Some(mode) => {
                let previous = posix.umask(mode)?;
                println!("{:04o}", previous);
            }
            None => {
                // umask(2) cannot be read without writing it
                let current = posix.umask(0o022)?;
                posix.umask(current)?;
                println!("{:04o}", current);
            }
        },
        Commands::Ids => {
            let ids = Ids {
                pid: posix.getpid()?,
                uid: posix.getuid()?,
                euid: posix.geteuid()?,
                gid: posix.getgid()?,
                egid: posix.getegid()?,
            };
            println!("{}", serde_json::to_string_pretty(&ids)?);
        }
        Commands::Platform => {
            let report = PlatformReport {
                platform: posix.platform(),
                native: posix.is_native(),
                verbose: settings::is_verbose(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_octal_modes() {
        assert_eq!(parse_octal_mode("2777"), Ok(0o2777));
        assert_eq!(parse_octal_mode("0o755"), Ok(0o755));
        assert_eq!(parse_octal_mode("0644"), Ok(0o644));
    }

    #[test]
    fn rejects_bad_modes() {
        assert!(parse_octal_mode("9").is_err());
        assert!(parse_octal_mode("17777").is_err());
        assert!(parse_octal_mode("").is_err());
    }

    #[test]
    fn chmod_subcommand_parses_mode() {
        let cli = Cli::try_parse_from(["posixcap", "chmod", "2777", "/tmp/x"]).unwrap();
        match cli.command {
            Commands::Chmod { mode, no_follow, .. } => {
                assert_eq!(mode, 0o2777);
                assert!(!no_follow);
            }
            _ => panic!("expected chmod"),
        }
    }

    #[test]
    fn verbose_flag_is_global() {
        let cli = Cli::try_parse_from(["posixcap", "ids", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
