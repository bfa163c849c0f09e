mod core;
mod release;
mod ui;

use clap::Parser;
use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::version::prompt_release_version;
use crate::release::gitea::GiteaClient;
use crate::release::{ReleasePipeline, resolve_token};
use crate::ui::log;
use std::io;

/// Bump the version, tag, cross-build and publish a Gitea release
///
/// Prompts for the release version (vX.Y.Z) on standard input.
#[derive(Parser)]
#[command(name = "releaser")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Gitea API token (falls back to the token environment variable)
  token: Option<String>,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn run(cli: Cli) -> ReleaseResult<()> {
  let root = std::env::current_dir()?;
  let config = ReleaseConfig::load(&root)?;

  let version = prompt_release_version(&mut io::stdin().lock(), &mut io::stdout())?;

  // Resolved before any step touches the repository
  let token = resolve_token(cli.token, std::env::var(&config.gitea.token_env).ok()).ok_or_else(|| {
    ReleaseError::MissingToken {
      env_var: config.gitea.token_env.clone(),
    }
  })?;
  let gitea = GiteaClient::new(&config.gitea.api_url, token)?;

  let mut pipeline = ReleasePipeline::new(&root, &config, gitea);
  pipeline.run(&version).inspect_err(|_| {
    log::warning(format!("release aborted, last completed stage: {}", pipeline.stage()));
  })
}

fn handle_error(err: ReleaseError) -> ! {
  log::print_error(&err);
  std::process::exit(1);
}
