/// Rendered height of one task row.
pub const ROW_HEIGHT_PX: u32 = 45;

/// Height of the delete-button column
/// that sits beside the table body. An
/// empty view still renders its
/// placeholder row.
#[must_use]
pub fn delete_column_height(
  visible_rows: usize
) -> u32 {
  u32::try_from(visible_rows.max(1))
    .unwrap_or(u32::MAX)
    .saturating_mul(ROW_HEIGHT_PX)
}

#[cfg(test)]
mod tests {
  use super::{
    ROW_HEIGHT_PX,
    delete_column_height
  };

  #[test]
  fn height_follows_row_count() {
    assert_eq!(
      delete_column_height(1),
      ROW_HEIGHT_PX
    );
    assert_eq!(
      delete_column_height(3),
      135
    );
  }

  #[test]
  fn empty_view_keeps_placeholder_row() {
    assert_eq!(
      delete_column_height(0),
      ROW_HEIGHT_PX
    );
  }
}
