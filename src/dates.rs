use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// All Fridays between `start` and `end`, inclusive, in calendar order.
pub fn fridays_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut fridays = Vec::new();
    let mut current = start;
    while current <= end {
        if current.weekday() == Weekday::Fri {
            fridays.push(current);
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    fridays
}

/// All Fridays in the next `n` weeks counted from `from` (today when `None`).
pub fn fridays_in_next_weeks(n: u64, from: Option<NaiveDate>) -> Vec<NaiveDate> {
    let from = from.unwrap_or_else(|| Local::now().date_naive());
    let end = from + Days::new(n * 7);
    fridays_in_range(from, end)
}

/// Sunday and/or Monday following a Friday, Sunday first.
/// Does not check that the input actually is a Friday.
pub fn return_dates_for(
    friday: NaiveDate,
    include_sunday: bool,
    include_monday: bool,
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    if include_sunday {
        dates.push(friday + Days::new(2));
    }
    if include_monday {
        dates.push(friday + Days::new(3));
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fridays_in_march_2026() {
        let fridays = fridays_in_range(date(2026, 3, 1), date(2026, 3, 31));
        assert_eq!(fridays.len(), 4);
        assert!(fridays.iter().all(|d| d.weekday() == Weekday::Fri));
        assert_eq!(fridays[0], date(2026, 3, 6));
        assert_eq!(fridays[3], date(2026, 3, 27));
    }

    #[test]
    fn empty_range_without_friday() {
        let monday = date(2026, 3, 2);
        assert!(fridays_in_range(monday, monday).is_empty());
    }

    #[test]
    fn single_day_range_on_a_friday() {
        let friday = date(2026, 3, 6);
        assert_eq!(fridays_in_range(friday, friday), vec![friday]);
    }

    #[test]
    fn fridays_next_four_weeks() {
        let fridays = fridays_in_next_weeks(4, Some(date(2026, 3, 2)));
        assert_eq!(fridays.len(), 4);
        assert!(fridays.iter().all(|d| d.weekday() == Weekday::Fri));
    }

    #[test]
    fn return_dates_sunday_and_monday() {
        let returns = return_dates_for(date(2026, 3, 6), true, true);
        assert_eq!(returns, vec![date(2026, 3, 8), date(2026, 3, 9)]);
    }

    #[test]
    fn return_dates_sunday_only() {
        let returns = return_dates_for(date(2026, 3, 6), true, false);
        assert!(returns.contains(&date(2026, 3, 8)));
        assert!(!returns.contains(&date(2026, 3, 9)));
    }
}
