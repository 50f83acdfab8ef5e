use chrono::{
  DateTime,
  Local,
  NaiveDate,
  Utc
};
use chrono_tz::Tz;

const TIMEZONE_ENV_VAR: &str =
  "TASKTABLE_TIMEZONE";

/// Zone used to decide what "today" is
/// for deadline expiry.
#[derive(Debug, Clone, Copy)]
pub enum Today {
  Local,
  Zone(Tz)
}

impl Today {
  /// `$TASKTABLE_TIMEZONE` wins over the
  /// configured zone; an invalid name
  /// falls through to the next source.
  pub fn resolve(
    configured: Option<&str>
  ) -> Self {
    if let Ok(raw) =
      std::env::var(TIMEZONE_ENV_VAR)
      && let Some(tz) = parse_timezone(
        &raw,
        TIMEZONE_ENV_VAR
      )
    {
      return Today::Zone(tz);
    }

    if let Some(raw) = configured
      && let Some(tz) =
        parse_timezone(raw, "config")
    {
      return Today::Zone(tz);
    }

    Today::Local
  }

  #[must_use]
  pub fn date_at(
    self,
    now: DateTime<Utc>
  ) -> NaiveDate {
    match self {
      | Today::Local => {
        now
          .with_timezone(&Local)
          .date_naive()
      }
      | Today::Zone(tz) => {
        now
          .with_timezone(&tz)
          .date_naive()
      }
    }
  }

  #[must_use]
  pub fn date(self) -> NaiveDate {
    self.date_at(Utc::now())
  }
}

fn parse_timezone(
  raw: &str,
  source: &str
) -> Option<Tz> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    tracing::warn!(
      source,
      "timezone source was empty"
    );
    return None;
  }

  match trimmed.parse::<Tz>() {
    | Ok(tz) => {
      tracing::debug!(
        source,
        timezone = %trimmed,
        "using timezone"
      );
      Some(tz)
    }
    | Err(err) => {
      tracing::warn!(
        source,
        timezone = %trimmed,
        error = %err,
        "ignoring invalid timezone"
      );
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    NaiveDate,
    TimeZone,
    Utc
  };

  use super::{
    Today,
    parse_timezone
  };

  #[test]
  fn zone_decides_calendar_day() {
    let now = Utc
      .with_ymd_and_hms(
        2026, 2, 16, 22, 30, 0
      )
      .single()
      .expect("valid now");

    let moscow = Today::Zone(
      parse_timezone(
        "Europe/Moscow",
        "test"
      )
      .expect("known zone")
    );
    let mexico = Today::Zone(
      parse_timezone(
        "America/Mexico_City",
        "test"
      )
      .expect("known zone")
    );

    assert_eq!(
      moscow.date_at(now),
      NaiveDate::from_ymd_opt(
        2026, 2, 17
      )
      .expect("date")
    );
    assert_eq!(
      mexico.date_at(now),
      NaiveDate::from_ymd_opt(
        2026, 2, 16
      )
      .expect("date")
    );
  }

  #[test]
  fn bad_zone_names_are_ignored() {
    assert!(
      parse_timezone("Mars/Olympus", "test")
        .is_none()
    );
    assert!(
      parse_timezone("  ", "test")
        .is_none()
    );
  }
}
