use crate::models::{ChartSlice, Subscription, SummaryResponse, UpcomingPayment};
use chrono::{Local, NaiveDate};

pub fn build_summary(subscriptions: &[Subscription]) -> SummaryResponse {
    build_summary_at(Local::now().date_naive(), subscriptions)
}

pub fn build_summary_at(today: NaiveDate, subscriptions: &[Subscription]) -> SummaryResponse {
    SummaryResponse {
        monthly_total: subscriptions.iter().map(|sub| sub.price).sum(),
        subscription_count: subscriptions.len(),
        upcoming: upcoming_payment(today, subscriptions),
        chart: chart_slices(subscriptions),
    }
}

/// Spend per category for the pie chart, categories in first-appearance
/// order of the snapshot.
pub fn chart_slices(subscriptions: &[Subscription]) -> Vec<ChartSlice> {
    let mut slices: Vec<ChartSlice> = Vec::new();
    for sub in subscriptions {
        match slices.iter_mut().find(|slice| slice.name == sub.category) {
            Some(slice) => slice.value += sub.price,
            None => slices.push(ChartSlice {
                name: sub.category.clone(),
                value: sub.price,
            }),
        }
    }
    slices
}

/// The subscription with the soonest due date on or after `today`. Ties go
/// to the earlier snapshot position; unparseable dates are skipped.
pub fn upcoming_payment(today: NaiveDate, subscriptions: &[Subscription]) -> Option<UpcomingPayment> {
    let mut best: Option<(NaiveDate, &Subscription)> = None;
    for sub in subscriptions {
        let Ok(due) = NaiveDate::parse_from_str(&sub.next_payment, "%Y-%m-%d") else {
            continue;
        };
        if due < today {
            continue;
        }
        match best {
            Some((best_due, _)) if best_due <= due => {}
            _ => best = Some((due, sub)),
        }
    }

    best.map(|(due, sub)| UpcomingPayment {
        name: sub.name.clone(),
        price: sub.price,
        currency: sub.currency.clone(),
        next_payment: sub.next_payment.clone(),
        days_until: (due - today).num_days(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(id: u64, name: &str, price: f64, category: &str, due: &str) -> Subscription {
        Subscription {
            id,
            name: name.to_string(),
            price,
            currency: "PLN".to_string(),
            category: category.to_string(),
            next_payment: due.to_string(),
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn chart_groups_by_category_in_first_seen_order() {
        let subs = vec![
            subscription(1, "Netflix", 43.0, "Entertainment", "2025-11-15"),
            subscription(2, "Spotify", 19.99, "Music", "2025-11-20"),
            subscription(3, "HBO Max", 29.99, "Entertainment", "2025-11-01"),
        ];
        let slices = chart_slices(&subs);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].name, "Entertainment");
        assert!((slices[0].value - 72.99).abs() < 1e-9);
        assert_eq!(slices[1].name, "Music");
    }

    #[test]
    fn summary_totals_all_prices() {
        let subs = vec![
            subscription(1, "Netflix", 43.0, "Entertainment", "2025-11-15"),
            subscription(2, "Gym", 120.0, "Health", "2025-11-05"),
        ];
        let summary = build_summary_at(date(2025, 11, 1), &subs);
        assert!((summary.monthly_total - 163.0).abs() < 1e-9);
        assert_eq!(summary.subscription_count, 2);
    }

    #[test]
    fn upcoming_picks_soonest_due_on_or_after_today() {
        let subs = vec![
            subscription(1, "Netflix", 43.0, "Entertainment", "2025-11-15"),
            subscription(2, "Gym", 120.0, "Health", "2025-11-05"),
            subscription(3, "Old", 9.0, "Other", "2025-10-01"),
        ];
        let upcoming = upcoming_payment(date(2025, 11, 2), &subs).unwrap();
        assert_eq!(upcoming.name, "Gym");
        assert_eq!(upcoming.days_until, 3);
    }

    #[test]
    fn upcoming_prefers_earlier_snapshot_position_on_ties() {
        let subs = vec![
            subscription(1, "Netflix", 43.0, "Entertainment", "2025-11-05"),
            subscription(2, "Gym", 120.0, "Health", "2025-11-05"),
        ];
        let upcoming = upcoming_payment(date(2025, 11, 1), &subs).unwrap();
        assert_eq!(upcoming.name, "Netflix");
    }

    #[test]
    fn upcoming_skips_malformed_dates_and_past_dues() {
        let subs = vec![
            subscription(1, "Broken", 5.0, "Other", "someday"),
            subscription(2, "Old", 9.0, "Other", "2020-01-01"),
        ];
        assert!(upcoming_payment(date(2025, 11, 1), &subs).is_none());
    }
}
