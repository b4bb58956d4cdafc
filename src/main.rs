use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use publish_post::cli::{run_publish_workflow, PublishWorkflowArgs};
use publish_post::config;
use publish_post::git::GitCli;
use publish_post::{logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "publish",
    version,
    about = "Move a draft into the posts directory with today's date and publish it with git"
)]
struct Args {
    #[arg(help = "Path to the draft to publish")]
    draft: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Stop at the first git step that fails")]
    stop_on_failure: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init();

    let base_dir = std::env::current_dir().context("Cannot determine current directory")?;

    let config = match config::load_config(args.config.as_deref(), &base_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let stop_on_failure = args.stop_on_failure || config.behavior.stop_on_failure;
    let workflow_args = PublishWorkflowArgs {
        draft: args.draft,
        today: Local::now().date_naive(),
        base_dir,
        stop_on_failure,
        dry_run: args.dry_run,
    };

    let vcs = GitCli::new(config.git.program.clone());
    let result = match run_publish_workflow(&workflow_args, &config, &vcs) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if result.dry_run {
        return Ok(());
    }

    ui::display_outcome(&result.report, &result.request.post_file_name());

    if !result.outcome().is_success() && stop_on_failure {
        std::process::exit(1);
    }

    Ok(())
}
