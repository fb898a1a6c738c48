use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modgate")]
#[command(
    author,
    version,
    about = "Policy-driven content-submission gatekeeper"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the moderation HTTP service
    Serve {
        /// Listen port
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Policy file path; a missing file runs with policies disabled
        #[arg(long, default_value = "./policies.yaml")]
        policy: PathBuf,

        /// Fail startup on any undeserializable policy instead of dropping it
        #[arg(long)]
        strict: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Evaluate a single submission against a policy file and exit
    Check {
        /// Policy file path
        #[arg(long, default_value = "./policies.yaml")]
        policy: PathBuf,

        /// Submitter identity
        #[arg(short, long)]
        user: String,

        /// The text to evaluate
        text: String,

        /// Fail on any undeserializable policy instead of dropping it
        #[arg(long)]
        strict: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
