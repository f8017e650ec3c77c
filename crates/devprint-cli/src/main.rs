mod cmd_fingerprint;
mod cmd_hash;

use clap::{Parser, Subcommand};
use cmd_fingerprint::RunArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "devprint", version, about = "Stable device identifiers from host signals")]
struct Cli {
    /// Log collector activity to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fingerprint a host profile and print the full result as JSON
    Fingerprint {
        #[command(flatten)]
        run: RunArgs,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print only the device identifier for a host profile
    DeviceId {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Digest a string (SHA-256 unless --fast)
    Hash {
        /// Text to digest
        text: String,
        /// Use the non-cryptographic collector hash
        #[arg(long)]
        fast: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Fingerprint { run, pretty } => cmd_fingerprint::fingerprint(&run, pretty),
        Command::DeviceId { run } => cmd_fingerprint::device_id(&run),
        Command::Hash { text, fast } => cmd_hash::execute(&text, fast),
    }
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` applies
/// unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
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
    fn parses_flags_and_options() {
        let cli = Cli::try_parse_from([
            "devprint",
            "-v",
            "fingerprint",
            "--profile",
            "host.yaml",
            "--no-audio",
            "--timeout",
            "250",
            "--pretty",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.cmd {
            Command::Fingerprint { run, pretty } => {
                assert!(pretty);
                assert!(run.no_audio);
                assert!(!run.no_canvas);
                assert_eq!(run.timeout, Some(250.0));
                assert_eq!(run.profile.to_str(), Some("host.yaml"));
            }
            _ => panic!("expected fingerprint"),
        }
    }

    #[test]
    fn profile_is_required() {
        assert!(Cli::try_parse_from(["devprint", "device-id"]).is_err());
    }

    #[test]
    fn hash_subcommand() {
        let cli = Cli::try_parse_from(["devprint", "hash", "abc", "--fast"]).unwrap();
        assert!(matches!(cli.cmd, Command::Hash { ref text, fast: true } if text == "abc"));
    }
}
