use crate::models::{CalendarCell, CalendarResponse, Subscription};
use chrono::{Datelike, Local, Months, NaiveDate};
use std::collections::HashMap;

/// Weekday header row, fixed order starting Sunday.
pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The month currently shown by the calendar, independent of the real
/// current date. Wraps the first day of that month so month arithmetic is
/// plain date arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayedMonth(NaiveDate);

impl DisplayedMonth {
    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 1-based month number, as in the `YYYY-MM-DD` labels.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Shifts the displayed month by `direction` months. December/January
    /// rollover falls out of date construction; navigation is unbounded.
    pub fn shifted(self, direction: i32) -> Self {
        let moved = if direction >= 0 {
            self.0.checked_add_months(Months::new(direction as u32))
        } else {
            self.0.checked_sub_months(Months::new(direction.unsigned_abs()))
        };
        Self(moved.unwrap_or(self.0))
    }

    fn first(&self) -> NaiveDate {
        self.0
    }
}

/// Weekday of day 1 of the month, 0 = Sunday .. 6 = Saturday.
pub fn first_weekday(month: DisplayedMonth) -> u32 {
    month.first().weekday().num_days_from_sunday()
}

/// Number of days in the month, taken from the day before the first of the
/// following month so leap years come out right.
pub fn days_in_month(month: DisplayedMonth) -> u32 {
    month
        .shifted(1)
        .first()
        .pred_opt()
        .map(|date| date.day())
        .unwrap_or(31)
}

/// Groups subscriptions by their `next_payment` string, exactly as stored.
/// No parsing or normalization: a malformed date simply never matches a
/// grid cell. Snapshot order is preserved within each day's list.
pub fn payments_by_date(subscriptions: &[Subscription]) -> HashMap<String, Vec<Subscription>> {
    let mut index: HashMap<String, Vec<Subscription>> = HashMap::new();
    for sub in subscriptions {
        index.entry(sub.next_payment.clone()).or_default().push(sub.clone());
    }
    index
}

/// Builds the flat cell sequence for one month: `first_weekday` leading
/// placeholders, then one cell per day. No trailing padding. Pure in its
/// inputs, so rebuilding with the same snapshot yields an identical grid.
pub fn build_grid(
    subscriptions: &[Subscription],
    month: DisplayedMonth,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let leading = first_weekday(month);
    let total_days = days_in_month(month);
    let index = payments_by_date(subscriptions);

    let mut cells = Vec::with_capacity((leading + total_days) as usize);
    for _ in 0..leading {
        cells.push(CalendarCell::placeholder());
    }

    for day in 1..=total_days {
        let date = format!("{:04}-{:02}-{:02}", month.year(), month.month(), day);
        let payments = index.get(&date).cloned().unwrap_or_default();
        cells.push(CalendarCell {
            day: Some(day),
            is_today: NaiveDate::from_ymd_opt(month.year(), month.month(), day) == Some(today),
            has_payment: !payments.is_empty(),
            payment_count: payments.len(),
            payments,
            date: Some(date),
        });
    }

    cells
}

pub fn build_month(subscriptions: &[Subscription], month: DisplayedMonth) -> CalendarResponse {
    build_month_at(Local::now().date_naive(), subscriptions, month)
}

pub fn build_month_at(
    today: NaiveDate,
    subscriptions: &[Subscription],
    month: DisplayedMonth,
) -> CalendarResponse {
    CalendarResponse {
        year: month.year(),
        month: month.month(),
        label: format!("{} {}", month_name(month.month()), month.year()),
        weekdays: WEEKDAYS,
        cells: build_grid(subscriptions, month, today),
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}
