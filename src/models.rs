use serde::{Deserialize, Serialize};

/// One tracked recurring payment. `next_payment` stays the raw `YYYY-MM-DD`
/// string the form submitted; the calendar matches it by string equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub category: String,
    pub next_payment: String,
}

/// Raw form input for a new subscription. `price` is kept as the text the
/// user typed and parsed server-side.
#[derive(Debug, Default, Deserialize)]
pub struct NewSubscriptionRequest {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub next_payment: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub direction: i32,
}

/// One position in the month grid: a leading placeholder (`day` is `None`)
/// or a concrete day of the displayed month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    pub day: Option<u32>,
    pub date: Option<String>,
    pub is_today: bool,
    pub has_payment: bool,
    pub payment_count: usize,
    pub payments: Vec<Subscription>,
}

impl CalendarCell {
    pub fn placeholder() -> Self {
        Self {
            day: None,
            date: None,
            is_today: false,
            has_payment: false,
            payment_count: 0,
            payments: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<CalendarCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct UpcomingPayment {
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub next_payment: String,
    pub days_until: i64,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub monthly_total: f64,
    pub subscription_count: usize,
    pub upcoming: Option<UpcomingPayment>,
    pub chart: Vec<ChartSlice>,
}
