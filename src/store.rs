use crate::models::{NewSubscriptionRequest, Subscription};
use chrono::{Local, Utc};

pub const DEFAULT_CURRENCY: &str = "PLN";

/// In-memory ordered collection of subscriptions. Insertion order is
/// preserved for the list view; ids are the only deletion key. The store
/// lives for the process lifetime and resets to the seed set on restart.
#[derive(Debug, Default)]
pub struct SubscriptionStore {
    items: Vec<Subscription>,
    last_id: u64,
}

impl SubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed() -> Self {
        let mut store = Self::new();
        for (name, price, category, next_payment) in [
            ("Netflix", 43.00, "Entertainment", "2025-11-15"),
            ("Spotify", 19.99, "Music", "2025-11-20"),
            ("Adobe CC", 140.00, "Work", "2025-11-28"),
            ("Gym", 120.00, "Health", "2025-11-05"),
        ] {
            store.push(
                name.to_string(),
                price,
                category.to_string(),
                next_payment.to_string(),
            );
        }
        store
    }

    /// Validates and appends a new subscription. The error string is the
    /// inline message the form shows; the store is left unchanged on error.
    pub fn add(&mut self, input: &NewSubscriptionRequest) -> Result<Subscription, &'static str> {
        let name = input.name.trim();
        if name.is_empty() || input.price.trim().is_empty() {
            return Err("Please fill in a name and a price.");
        }

        let price: f64 = input
            .price
            .trim()
            .parse()
            .map_err(|_| "Price must be a number.")?;
        if !(price > 0.0) {
            return Err("Price must be greater than 0.");
        }

        let next_payment = match input.next_payment.trim() {
            "" => today_string(),
            date => date.to_string(),
        };
        let category = match input.category.trim() {
            "" => "Other".to_string(),
            category => category.to_string(),
        };

        Ok(self.push(name.to_string(), price, category, next_payment))
    }

    /// Removes the subscription with the given id; unknown ids are a no-op.
    pub fn remove(&mut self, id: u64) {
        self.items.retain(|sub| sub.id != id);
    }

    /// The current collection by value, in insertion order.
    pub fn snapshot(&self) -> Vec<Subscription> {
        self.items.clone()
    }

    fn push(
        &mut self,
        name: String,
        price: f64,
        category: String,
        next_payment: String,
    ) -> Subscription {
        let sub = Subscription {
            id: self.next_id(),
            name,
            price,
            currency: DEFAULT_CURRENCY.to_string(),
            category,
            next_payment,
        };
        self.items.push(sub.clone());
        sub
    }

    // Timestamp-derived ids, bumped past the previous one so adds within
    // the same millisecond stay unique.
    fn next_id(&mut self) -> u64 {
        let millis = Utc::now().timestamp_millis().max(0) as u64;
        self.last_id = millis.max(self.last_id + 1);
        self.last_id
    }
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
