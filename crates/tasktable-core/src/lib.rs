pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod datetime;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tasktable_shared::TaskStore;
use tasktable_shared::ids::TimestampIds;
use tracing::{
  debug,
  info
};

/// Runs one CLI invocation. Returns
/// `false` when the command was
/// rejected (invalid form, blank title).
#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<bool> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting tasktable CLI"
  );

  let mut cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .rc_overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  )?;
  debug!(?cfg, "resolved config");

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let storage =
    datastore::FileStorage::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open storage at {}",
        data_dir.display()
      )
    })?;
  let mut store = TaskStore::open(
    storage,
    Box::new(TimestampIds::default())
  );

  let today = datetime::Today::resolve(
    cfg.timezone.as_deref()
  )
  .date();
  let renderer =
    render::Renderer::new(&cfg);
  let command = cli.command.unwrap_or(
    cli::Command::List {
      filter: None
    }
  );

  let outcome = commands::dispatch(
    &mut store,
    &cfg,
    &renderer,
    command,
    today
  )?;

  info!(?outcome, "done");
  Ok(outcome != commands::Outcome::Rejected)
}
