use chrono::{Datelike, NaiveDate};

/// Fraction of `year` during which the measure is operational.
///
/// Without a due date the current calendar year counts as half active. With one,
/// the due year is active from the due month onwards, so a January date gives a full
/// year and a December date one twelfth.
pub fn go_live_factor(due_date: Option<NaiveDate>, current_year: i32, year: i32) -> f64 {
    match due_date {
        None => {
            if year == current_year {
                0.5
            } else if year > current_year {
                1.0
            } else {
                0.0
            }
        }
        Some(date) => {
            let due_year = date.year();
            if year < due_year {
                0.0
            } else if year == due_year {
                (12.0 - f64::from(date.month0())) / 12.0
            } else {
                1.0
            }
        }
    }
}
