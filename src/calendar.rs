use chrono::{Days, Months, NaiveDate};

use crate::config::CompositePeriod;

/// Date arithmetic for one composite period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeCalendar {
    period: CompositePeriod,
}

impl CompositeCalendar {
    pub fn new(period: CompositePeriod) -> Self {
        Self { period }
    }

    pub fn period(&self) -> CompositePeriod {
        self.period
    }

    /// Date string embedded in archive and NEODAAS file names.
    pub fn date_token(&self, date: NaiveDate) -> String {
        match self.period {
            CompositePeriod::Monthly => date.format("%Y%m").to_string(),
            _ => date.format("%Y%m%d").to_string(),
        }
    }

    /// Next cursor date, or `None` past the end of the calendar.
    ///
    /// 5-day and 8-day composites still step one day at a time: their file
    /// dates only line up with the period when the walk starts in phase with
    /// the archive, and stepping a whole period would silently skip files.
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self.period {
            CompositePeriod::Monthly => date.checked_add_months(Months::new(1)),
            _ => date.checked_add_days(Days::new(1)),
        }
    }

    /// Dates from `start` (inclusive) to `end` (exclusive).
    pub fn walk(&self, start: NaiveDate, end: NaiveDate) -> DateWalk {
        DateWalk {
            calendar: *self,
            cursor: Some(start),
            end,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DateWalk {
    calendar: CompositeCalendar,
    cursor: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DateWalk {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current_date = self.cursor.filter(|date| *date < self.end)?;
        self.cursor = self.calendar.advance(current_date);
        Some(current_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("Invalid date")
    }

    #[test]
    fn test_date_token() {
        let monthly = CompositeCalendar::new(CompositePeriod::Monthly);
        let daily = CompositeCalendar::new(CompositePeriod::Daily);

        assert_eq!(monthly.date_token(ymd(2019, 6, 15)), "201906");
        assert_eq!(daily.date_token(ymd(2019, 6, 5)), "20190605");
    }

    #[test]
    fn test_advance_monthly_clamps_day() {
        let calendar = CompositeCalendar::new(CompositePeriod::Monthly);

        // February 31st is invalid, should fall back to the 28th
        assert_eq!(calendar.advance(ymd(2019, 1, 31)), Some(ymd(2019, 2, 28)));
        assert_eq!(calendar.advance(ymd(2020, 1, 31)), Some(ymd(2020, 2, 29)));
        assert_eq!(calendar.advance(ymd(2019, 12, 15)), Some(ymd(2020, 1, 15)));
    }

    #[test]
    fn test_advance_multi_day_composites_step_daily() {
        for period in [
            CompositePeriod::Daily,
            CompositePeriod::FiveDay,
            CompositePeriod::EightDay,
        ] {
            let calendar = CompositeCalendar::new(period);
            assert_eq!(calendar.advance(ymd(2019, 2, 28)), Some(ymd(2019, 3, 1)));
        }
    }

    #[test]
    fn test_walk_excludes_end_date() {
        let calendar = CompositeCalendar::new(CompositePeriod::EightDay);
        let dates: Vec<NaiveDate> = calendar.walk(ymd(2019, 12, 30), ymd(2020, 1, 2)).collect();

        assert_eq!(
            dates,
            vec![ymd(2019, 12, 30), ymd(2019, 12, 31), ymd(2020, 1, 1)]
        );
    }

    #[test]
    fn test_walk_monthly() {
        let calendar = CompositeCalendar::new(CompositePeriod::Monthly);
        let tokens: Vec<String> = calendar
            .walk(ymd(2019, 1, 31), ymd(2019, 5, 1))
            .map(|date| calendar.date_token(date))
            .collect();

        assert_eq!(tokens, vec!["201901", "201902", "201903", "201904"]);
    }

    #[test]
    fn test_walk_empty_range() {
        let calendar = CompositeCalendar::new(CompositePeriod::Daily);
        assert_eq!(calendar.walk(ymd(2019, 1, 1), ymd(2019, 1, 1)).count(), 0);
        assert_eq!(calendar.walk(ymd(2019, 1, 2), ymd(2019, 1, 1)).count(), 0);
    }

    #[test]
    fn test_walk_stops_at_calendar_end() {
        let calendar = CompositeCalendar::new(CompositePeriod::Daily);
        let dates: Vec<NaiveDate> = calendar.walk(NaiveDate::MAX, NaiveDate::MAX).collect();
        assert!(dates.is_empty());

        let last_day = NaiveDate::MAX.pred_opt().unwrap();
        assert_eq!(calendar.walk(last_day, NaiveDate::MAX).count(), 1);
    }
}
