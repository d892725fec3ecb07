use crate::calendar::DisplayedMonth;
use crate::store::SubscriptionStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<SubscriptionStore>>,
    pub displayed_month: Arc<Mutex<DisplayedMonth>>,
}

impl AppState {
    pub fn new(store: SubscriptionStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            displayed_month: Arc::new(Mutex::new(DisplayedMonth::current())),
        }
    }
}
