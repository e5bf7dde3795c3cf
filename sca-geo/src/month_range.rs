use crate::error::InvalidDateRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar year and month pair, ordered lexicographically on (year, month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> YearMonth {
        YearMonth { year, month }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first calendar day of this month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// The last calendar day of this month, respecting variable month lengths
    /// and leap Februaries.
    pub fn last_day(&self) -> NaiveDate {
        self.succ().first_day().pred_opt().unwrap()
    }

    /// The following month.
    pub fn succ(&self) -> YearMonth {
        if self.month == 12 {
            YearMonth::new(self.year + 1, 1)
        } else {
            YearMonth::new(self.year, self.month + 1)
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = InvalidDateRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparseable = || InvalidDateRange::Unparseable(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(unparseable)?;
        let year = year.trim().parse::<i32>().map_err(|_| unparseable())?;
        let month = month.trim().parse::<u32>().map_err(|_| unparseable())?;
        Ok(YearMonth::new(year, month))
    }
}

/// A validated, inclusive month window selected by the user.
///
/// Construction is the only validation point: months must be 1-12 and the end
/// month must not precede the start month. A degenerate single-month range is
/// allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthRange {
    start: YearMonth,
    end: YearMonth,
}

impl MonthRange {
    pub fn new(start: YearMonth, end: YearMonth) -> Result<MonthRange, InvalidDateRange> {
        for ym in [start, end] {
            if !(1..=12).contains(&ym.month()) {
                return Err(InvalidDateRange::MonthOutOfRange(ym.month()));
            }
        }
        if end < start {
            return Err(InvalidDateRange::EndBeforeStart { start, end });
        }
        Ok(MonthRange { start, end })
    }

    pub fn start(&self) -> YearMonth {
        self.start
    }

    pub fn end(&self) -> YearMonth {
        self.end
    }

    /// The concrete date window sent to the analysis service: day 1 of the
    /// start month through the last calendar day of the end month.
    pub fn request_window(&self) -> (NaiveDate, NaiveDate) {
        (self.start.first_day(), self.end.last_day())
    }

    /// Iterate the months of the range, start through end inclusive.
    pub fn months(&self) -> MonthRangeIter {
        MonthRangeIter {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl fmt::Display for MonthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Iterator over the months of a `MonthRange`, inclusive at both ends.
#[derive(Clone, Debug)]
pub struct MonthRangeIter {
    next: Option<YearMonth>,
    end: YearMonth,
}

impl Iterator for MonthRangeIter {
    type Item = YearMonth;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current < self.end {
            Some(current.succ())
        } else {
            None
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::{MonthRange, YearMonth};
    use crate::error::InvalidDateRange;
    use chrono::NaiveDate;

    #[test]
    fn test_end_before_start_rejected() {
        let result = MonthRange::new(YearMonth::new(2020, 6), YearMonth::new(2019, 1));
        assert_eq!(
            result,
            Err(InvalidDateRange::EndBeforeStart {
                start: YearMonth::new(2020, 6),
                end: YearMonth::new(2019, 1),
            })
        );
    }

    #[test]
    fn test_single_month_range_allowed() {
        let range = MonthRange::new(YearMonth::new(2019, 1), YearMonth::new(2019, 1)).unwrap();
        assert_eq!(range.start(), range.end());
    }

    #[test]
    fn test_month_out_of_range_rejected() {
        let result = MonthRange::new(YearMonth::new(2020, 0), YearMonth::new(2020, 3));
        assert_eq!(result, Err(InvalidDateRange::MonthOutOfRange(0)));
        let result = MonthRange::new(YearMonth::new(2020, 1), YearMonth::new(2020, 13));
        assert_eq!(result, Err(InvalidDateRange::MonthOutOfRange(13)));
    }

    #[test]
    fn test_same_year_month_ordering() {
        assert!(YearMonth::new(2020, 2) < YearMonth::new(2020, 11));
        assert!(YearMonth::new(2019, 12) < YearMonth::new(2020, 1));
    }

    #[test]
    fn test_request_window_31_day_month() {
        let range = MonthRange::new(YearMonth::new(2020, 1), YearMonth::new(2020, 1)).unwrap();
        let (start, end) = range.request_window();
        assert_eq!(start, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2020, 1, 31).unwrap());
    }

    #[test]
    fn test_request_window_leap_february() {
        let range = MonthRange::new(YearMonth::new(2020, 2), YearMonth::new(2020, 2)).unwrap();
        let (_, end) = range.request_window();
        assert_eq!(end, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());

        let range = MonthRange::new(YearMonth::new(2019, 2), YearMonth::new(2019, 2)).unwrap();
        let (_, end) = range.request_window();
        assert_eq!(end, NaiveDate::from_ymd_opt(2019, 2, 28).unwrap());
    }

    #[test]
    fn test_request_window_spanning_year() {
        let range = MonthRange::new(YearMonth::new(2020, 11), YearMonth::new(2021, 4)).unwrap();
        let (start, end) = range.request_window();
        assert_eq!(start, NaiveDate::from_ymd_opt(2020, 11, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2021, 4, 30).unwrap());
    }

    #[test]
    fn test_month_iteration() {
        let range = MonthRange::new(YearMonth::new(2020, 11), YearMonth::new(2021, 2)).unwrap();
        let months: Vec<YearMonth> = range.months().collect();
        assert_eq!(
            months,
            vec![
                YearMonth::new(2020, 11),
                YearMonth::new(2020, 12),
                YearMonth::new(2021, 1),
                YearMonth::new(2021, 2),
            ]
        );
    }

    #[test]
    fn test_month_iteration_single() {
        let range = MonthRange::new(YearMonth::new(2022, 3), YearMonth::new(2022, 3)).unwrap();
        let months: Vec<YearMonth> = range.months().collect();
        assert_eq!(months, vec![YearMonth::new(2022, 3)]);
    }

    #[test]
    fn test_year_month_parsing() {
        let ym: YearMonth = "2020-06".parse().unwrap();
        assert_eq!(ym, YearMonth::new(2020, 6));
        assert!("2020".parse::<YearMonth>().is_err());
        assert!("june 2020".parse::<YearMonth>().is_err());
    }
}
