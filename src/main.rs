use anyhow::{Context, Result};
use clap::Parser;

use shipit::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowResult};
use shipit::config::{self, Config};
use shipit::git::Git2Repository;
use shipit::publish::{GitHubPublisher, RepoSlug};
use shipit::{telemetry, ui, ShipitError};

#[derive(clap::Parser)]
#[command(
    name = "shipit",
    about = "Tag, push and publish a release from conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Remote to read release tags from and push to")]
    remote: Option<String>,

    #[arg(long, help = "Preview the release without tagging or publishing")]
    dry_run: bool,

    #[arg(long, help = "Show debug diagnostics")]
    verbose: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("shipit {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    telemetry::init_tracing(args.verbose);

    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    if let Some(remote) = args.remote {
        config.remote = remote;
    }

    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let repo = match Git2Repository::open(cwd, config.remote.clone()) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = ReleaseWorkflowArgs {
        dry_run: args.dry_run,
    };
    let result = run_release_workflow(
        &repo,
        || build_publisher(&config, &repo),
        &config,
        &workflow_args,
    );

    match result {
        Ok(WorkflowResult::Released { tag, url, .. }) => {
            println!("\n{} released: {}\n", tag, url);
        }
        Ok(WorkflowResult::NoChanges) => {
            ui::display_status("Nothing to release");
        }
        Ok(WorkflowResult::DryRun { version, .. }) => {
            ui::display_success(&format!("Dry run complete; {} would be released", version));
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}

/// GitHub publisher for the configured or remote-derived repository
fn build_publisher(config: &Config, repo: &Git2Repository) -> shipit::Result<GitHubPublisher> {
    let slug = match (&config.github.owner, &config.github.repo) {
        (Some(owner), Some(name)) => RepoSlug {
            owner: owner.clone(),
            repo: name.clone(),
        },
        (owner, name) => {
            let url = repo.remote_url()?.ok_or_else(|| {
                ShipitError::config(format!("Remote '{}' has no URL", repo.remote_name()))
            })?;
            let parsed = RepoSlug::from_remote_url(&url).ok_or_else(|| {
                ShipitError::config(format!(
                    "Cannot determine GitHub owner/repo from '{}'; set [github] owner and repo",
                    url
                ))
            })?;
            RepoSlug {
                owner: owner.clone().unwrap_or(parsed.owner),
                repo: name.clone().unwrap_or(parsed.repo),
            }
        }
    };

    let token = config.github_token()?;
    GitHubPublisher::new(slug, token, config.github.api_url.clone())
}
