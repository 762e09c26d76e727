//! Command-line arguments

use clap::Parser;

const AFTER_HELP: &str = "\
Examples:
  ss3                  Ask for a bucket name on start
  ss3 my-bucket        Open my-bucket immediately

Region and profile come from AWS_REGION / AWS_PROFILE, the [aws] table of
the config file, or the AWS shared config. Type :region or :profile at the
bucket prompt to switch them while running.

Set RUST_LOG=debug for diagnostic output on stderr.";

/// ss3 - browse S3 buckets from the terminal
///
/// Walk the folders of a bucket page by page and download files to the
/// current directory.
#[derive(Parser, Debug)]
#[command(name = "ss3")]
#[command(about, long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Open this S3 bucket immediately
    pub bucket: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["ss3"]).unwrap();
        assert!(cli.bucket.is_none());
    }

    #[test]
    fn test_bucket_argument() {
        let cli = Cli::try_parse_from(["ss3", "my-bucket"]).unwrap();
        assert_eq!(cli.bucket.as_deref(), Some("my-bucket"));
    }

    #[test]
    fn test_help_flags() {
        for flag in ["-h", "--help"] {
            let err = Cli::try_parse_from(["ss3", flag]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        }
    }

    #[test]
    fn test_rejects_extra_arguments() {
        assert!(Cli::try_parse_from(["ss3", "one", "two"]).is_err());
        assert!(Cli::try_parse_from(["ss3", "--version"]).is_err());
    }

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
