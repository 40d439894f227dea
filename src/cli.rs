//! CLI definitions for EasyApply.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// EasyApply CLI.
#[derive(Parser)]
#[command(name = "easyapply")]
#[command(about = "Automated Easy Apply job application runner")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: config/default.toml, then ~/.easyapply/config.toml)
    #[arg(short, long, global = true, env = "EASYAPPLY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Launch the browser, sign in and run one campaign (default)
    Run {
        /// Skip the login step and rely on the persisted browser profile
        #[arg(long)]
        skip_login: bool,

        /// Stop after this many attempted applications
        #[arg(long)]
        max_applications: Option<u32>,

        /// Run Chrome without a window
        #[arg(long)]
        headless: bool,
    },

    /// Sign in with the configured account, then close the browser
    Login,

    /// Validate the configuration and print errors and warnings
    Validate,

    /// Print the job identifier parsed from a posting link
    JobId {
        /// Posting link, e.g. /jobs/view/3847562910/
        href: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["easyapply"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "easyapply",
            "run",
            "--skip-login",
            "--max-applications",
            "5",
            "-c",
            "my.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        match cli.command {
            Some(Commands::Run {
                skip_login,
                max_applications,
                headless,
            }) => {
                assert!(skip_login);
                assert_eq!(max_applications, Some(5));
                assert!(!headless);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_job_id_takes_href() {
        let cli = Cli::try_parse_from(["easyapply", "job-id", "/jobs/view/42/"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::JobId { ref href }) if href == "/jobs/view/42/"));
    }

    #[test]
    fn test_job_id_requires_href() {
        assert!(Cli::try_parse_from(["easyapply", "job-id"]).is_err());
    }
}
