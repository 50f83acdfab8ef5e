use chrono::NaiveDate;

use crate::task::TaskStatus;

const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Reads the calendar date out of a
/// deadline. Anything after the date
/// part (a time, a zone) is ignored.
#[must_use]
pub fn parse_deadline(
  raw: &str
) -> Option<NaiveDate> {
  let trimmed = raw.trim();
  let date_part = trimmed
    .get(..10)
    .unwrap_or(trimmed);
  NaiveDate::parse_from_str(
    date_part,
    DEADLINE_FORMAT
  )
  .ok()
}

#[must_use]
pub fn is_deadline_expired(
  deadline: &str,
  status: TaskStatus,
  today: NaiveDate
) -> bool {
  if deadline.trim().is_empty()
    || status != TaskStatus::Active
  {
    return false;
  }

  parse_deadline(deadline)
    .map(|date| date < today)
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::{
    is_deadline_expired,
    parse_deadline
  };
  use crate::task::TaskStatus;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn past_active_deadline_is_expired() {
    assert!(is_deadline_expired(
      "2020-01-01",
      TaskStatus::Active,
      date(2020, 1, 2)
    ));
    assert!(is_deadline_expired(
      "2020-01-01",
      TaskStatus::Active,
      date(2026, 10, 16)
    ));
  }

  #[test]
  fn same_day_is_not_expired() {
    assert!(!is_deadline_expired(
      "2026-10-16",
      TaskStatus::Active,
      date(2026, 10, 16)
    ));
  }

  #[test]
  fn finished_tasks_never_expire() {
    for today in [
      date(2019, 1, 1),
      date(2020, 1, 2),
      date(2030, 6, 1)
    ] {
      assert!(!is_deadline_expired(
        "2020-01-01",
        TaskStatus::Completed,
        today
      ));
      assert!(!is_deadline_expired(
        "2020-01-01",
        TaskStatus::Cancelled,
        today
      ));
    }
  }

  #[test]
  fn empty_or_garbage_deadline_is_not_expired()
  {
    let today = date(2026, 10, 16);
    assert!(!is_deadline_expired(
      "",
      TaskStatus::Active,
      today
    ));
    assert!(!is_deadline_expired(
      "someday",
      TaskStatus::Active,
      today
    ));
  }

  #[test]
  fn time_of_day_is_ignored() {
    assert_eq!(
      parse_deadline(
        "2025-02-18T23:59:00Z"
      ),
      Some(date(2025, 2, 18))
    );
  }
}
