use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow,
  bail
};
use serde::Deserialize;
use tasktable_shared::FilterMode;
use tracing::{
  debug,
  info
};

const CONFIG_ENV_VAR: &str =
  "TASKTABLE_CONFIG";
const APP_DIR: &str = "tasktable";

#[derive(
  Debug, Clone, Default, Deserialize,
)]
#[serde(deny_unknown_fields)]
struct FileConfig {
  data_dir:       Option<PathBuf>,
  default_filter: Option<String>,
  color:          Option<bool>,
  timezone:       Option<String>
}

#[derive(Debug, Clone)]
pub struct Config {
  pub data_dir:       Option<PathBuf>,
  pub default_filter: FilterMode,
  pub color:          bool,
  pub timezone:       Option<String>,
  pub loaded_file:    Option<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    Self {
      data_dir:       None,
      default_filter: FilterMode::All,
      color:          true,
      timezone:       None,
      loaded_file:    None
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    config_override
  ))]
  pub fn load(
    config_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    match resolve_config_path(
      config_override
    )? {
      | Some(path) => {
        info!(config = %path.display(), "loading config");
        cfg.load_file(&path)?;
      }
      | None => {
        debug!(
          "no config file; using \
           defaults"
        );
      }
    }

    Ok(cfg)
  }

  pub fn from_toml(
    text: &str
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();
    cfg.merge(
      toml::from_str::<FileConfig>(text)
        .context(
          "failed to parse config"
        )?
    );
    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      match key.as_str() {
        | "data_dir" => {
          self.data_dir =
            Some(PathBuf::from(v));
        }
        | "default_filter" => {
          self.default_filter =
            FilterMode::parse(&v);
        }
        | "color" => {
          self.color = parse_bool(&v)
            .ok_or_else(|| {
              anyhow!(
                "invalid color \
                 setting: {v}"
              )
            })?;
        }
        | "timezone" => {
          self.timezone = Some(v);
        }
        | other => {
          bail!(
            "unknown config key: \
             {other}"
          )
        }
      }
    }
    Ok(())
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;
    let file = toml::from_str::<
      FileConfig
    >(&text)
    .with_context(|| {
      format!(
        "failed to parse {}",
        path.display()
      )
    })?;

    self.merge(file);
    self.loaded_file = Some(path);
    Ok(())
  }

  fn merge(
    &mut self,
    file: FileConfig
  ) {
    if let Some(dir) = file.data_dir {
      self.data_dir = Some(dir);
    }
    if let Some(filter) =
      file.default_filter
    {
      self.default_filter =
        FilterMode::parse(&filter);
    }
    if let Some(color) = file.color {
      self.color = color;
    }
    if file.timezone.is_some() {
      self.timezone = file.timezone;
    }
  }
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = if let Some(path) =
    override_dir
  {
    path.to_path_buf()
  } else if let Some(cfg_value) =
    cfg.data_dir.as_deref()
  {
    expand_tilde(cfg_value)
  } else {
    default_data_dir()?
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_config_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(raw) =
    std::env::var(CONFIG_ENV_VAR)
  {
    let trimmed = raw.trim();
    if trimmed == "/dev/null" {
      return Ok(None);
    }
    if !trimmed.is_empty() {
      return Ok(Some(PathBuf::from(
        trimmed
      )));
    }
  }

  let Some(config_dir) =
    dirs::config_dir()
  else {
    return Ok(None);
  };
  let candidate = config_dir
    .join(APP_DIR)
    .join("config.toml");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn default_data_dir()
-> anyhow::Result<PathBuf> {
  let base = dirs::data_dir()
    .ok_or_else(|| {
      anyhow!(
        "cannot determine data \
         directory"
      )
    })?;
  Ok(base.join(APP_DIR))
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> Option<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Some(true),
    | "0" | "n" | "no" | "off"
    | "false" => Some(false),
    | _ => None
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use tasktable_shared::FilterMode;

  use super::{
    Config,
    resolve_data_dir
  };

  #[test]
  fn toml_fields_override_defaults() {
    let cfg = Config::from_toml(
      r#"
        data_dir = "/tmp/tasktable"
        default_filter = "completed"
        color = false
        timezone = "Europe/Moscow"
      "#
    )
    .expect("parse");
    assert_eq!(
      cfg.data_dir,
      Some(PathBuf::from(
        "/tmp/tasktable"
      ))
    );
    assert_eq!(
      cfg.default_filter,
      FilterMode::Completed
    );
    assert!(!cfg.color);
    assert_eq!(
      cfg.timezone.as_deref(),
      Some("Europe/Moscow")
    );
  }

  #[test]
  fn unknown_file_keys_are_errors() {
    assert!(
      Config::from_toml(
        "colour = true"
      )
      .is_err()
    );
  }

  #[test]
  fn overrides_apply_after_file() {
    let mut cfg = Config::from_toml(
      "color = true"
    )
    .expect("parse");
    cfg
      .apply_overrides([
        (
          "rc.color".to_string(),
          "off".to_string()
        ),
        (
          "default_filter".to_string(),
          "active".to_string()
        ),
      ])
      .expect("overrides");
    assert!(!cfg.color);
    assert_eq!(
      cfg.default_filter,
      FilterMode::Active
    );

    assert!(
      cfg
        .apply_overrides([(
          "color".to_string(),
          "maybe".to_string()
        )])
        .is_err()
    );
  }

  #[test]
  fn data_dir_override_is_created() {
    let temp = tempfile::tempdir()
      .expect("tempdir");
    let target =
      temp.path().join("nested/data");
    let dir = resolve_data_dir(
      &Config::default(),
      Some(&target)
    )
    .expect("resolve");
    assert_eq!(dir, target);
    assert!(dir.is_dir());
  }
}
