//! `git-lfs-authenticate`, run by sshd as a forced command:
//!
//! ```text
//! git-lfs-authenticate <owner/repo> upload
//! ```
//!
//! where the path is the part after the host name in the `ssh://host` URL.
//! On success exactly one JSON document is written to stdout; everything
//! else (logs, usage, errors) goes to stderr.

use anyhow::Context;
use clap::{CommandFactory, Parser, ValueEnum, error::ErrorKind};
use lfs_auth_core::config::{CONFIG_ENV, DEFAULT_CONFIG_PATH};
use lfs_auth_core::{AuthDescriptor, IssuerConfig, SystemUser};
use lfs_auth_token::IssuanceError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "git-lfs-authenticate",
    version,
    about = "Issue a short-lived Git LFS upload token for this SSH session"
)]
struct Cli {
    /// INI file holding the [git-lfs-authenticate] section
    #[arg(long, env = CONFIG_ENV, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Repository path, of the form owner/repo
    path: String,

    /// Operation requested by git-lfs
    #[arg(value_enum)]
    operation: OperationArg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OperationArg {
    Upload,
}

impl OperationArg {
    fn as_str(self) -> &'static str {
        match self {
            OperationArg::Upload => "upload",
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let user = current_user().context("unable to resolve the invoking user")?;

    match run(&cli, &user).await {
        Ok(descriptor) => {
            println!("{}", descriptor.to_json()?);
            Ok(())
        }
        Err(IssuanceError::Validation(e)) => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
        Err(e) => Err(e.into()),
    }
}

async fn run(cli: &Cli, user: &SystemUser) -> Result<AuthDescriptor, IssuanceError> {
    let config = IssuerConfig::load(&cli.config)?;
    lfs_auth_token::issue(Some(&cli.path), cli.operation.as_str(), user, &config).await
}

fn current_user() -> anyhow::Result<SystemUser> {
    let uid = nix::unistd::Uid::current();
    let user = nix::unistd::User::from_uid(uid)?
        .with_context(|| format!("no passwd entry for uid {uid}"))?;
    tracing::debug!(user = %user.name, %uid, "resolved invoking user");
    Ok(SystemUser::new(user.name))
}
