use anyhow::anyhow;
use tasktable_shared::storage::StorageBackend;

/// `window.localStorage`, looked up on
/// every access.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageBackend;

fn local_storage()
-> anyhow::Result<web_sys::Storage> {
  web_sys::window()
    .ok_or_else(|| {
      anyhow!("no window object")
    })?
    .local_storage()
    .map_err(|error| {
      anyhow!(
        "local storage unavailable: \
         {error:?}"
      )
    })?
    .ok_or_else(|| {
      anyhow!(
        "local storage is disabled"
      )
    })
}

impl StorageBackend
  for LocalStorageBackend
{
  fn read(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    local_storage()?
      .get_item(key)
      .map_err(|error| {
        anyhow!(
          "failed reading {key}: \
           {error:?}"
        )
      })
  }

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    local_storage()?
      .set_item(key, value)
      .map_err(|error| {
        anyhow!(
          "failed writing {key}: \
           {error:?}"
        )
      })
  }
}
