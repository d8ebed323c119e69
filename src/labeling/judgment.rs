use crate::config::{WindowDirection, WindowSpec, WindowUnit};
use crate::error::{BondLabelError, Result};
use crate::types::Label;
use chrono::{Days, Months, NaiveDate};

/// End of a forward window. Month arithmetic clamps to the last day of
/// the target month (2021-01-31 + 1 month = 2021-02-28).
fn window_end(publish: NaiveDate, window: &WindowSpec) -> Result<NaiveDate> {
    let end = match window.unit {
        WindowUnit::Days => publish.checked_add_days(Days::new(u64::from(window.magnitude))),
        WindowUnit::Weeks => publish.checked_add_days(Days::new(u64::from(window.magnitude) * 7)),
        WindowUnit::Months => publish.checked_add_months(Months::new(window.magnitude)),
    };

    end.ok_or_else(|| {
        BondLabelError::Computation(format!(
            "window '{}' overflows the calendar from {}",
            window.name, publish
        ))
    })
}

/// Judge one window for one (publish date, default date) pair.
///
/// Forward: -1 only when the entity newly defaults within (publish, end].
/// A default at or before the publish date is an already-known fact, not
/// a forward-looking event, so it stays +1. Both comparisons are
/// inclusive: a default exactly on the publish date counts as already
/// defaulted, and a default exactly on the window end still counts as
/// inside the window.
///
/// Backward: -1 when any default exists at or before the publish date;
/// the window's stated duration is not consulted.
///
/// Absence of a default record is evidence of no known default, encoded
/// as +1; there is no third "unknown" state.
pub fn judge(
    publish: NaiveDate,
    default_date: Option<NaiveDate>,
    window: &WindowSpec,
) -> Result<Label> {
    let label = match window.direction {
        WindowDirection::Forward => {
            let end = window_end(publish, window)?;
            match default_date {
                None => Label::NonDefault,
                Some(date) if date <= publish => Label::NonDefault,
                Some(date) if date <= end => Label::Default,
                Some(_) => Label::NonDefault,
            }
        }
        WindowDirection::Backward => match default_date {
            None => Label::NonDefault,
            Some(date) if date <= publish => Label::Default,
            Some(_) => Label::NonDefault,
        },
    };

    Ok(label)
}
