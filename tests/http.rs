use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Subscription {
    id: u64,
    name: String,
    price: f64,
    currency: String,
    category: String,
    next_payment: String,
}

#[derive(Debug, Deserialize)]
struct Summary {
    monthly_total: f64,
    subscription_count: usize,
}

#[derive(Debug, Deserialize)]
struct CalendarCell {
    day: Option<u32>,
    is_today: bool,
    has_payment: bool,
    payment_count: usize,
    payments: Vec<Subscription>,
}

#[derive(Debug, Deserialize)]
struct Calendar {
    year: i32,
    month: u32,
    label: String,
    weekdays: Vec<String>,
    cells: Vec<CalendarCell>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/summary")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_subtrack"))
        .env("PORT", port.to_string())
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn list_subscriptions(client: &Client, base_url: &str) -> Vec<Subscription> {
    client
        .get(format!("{base_url}/api/subscriptions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_add_subscription_appears_in_list_and_summary() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before: Summary = client
        .get(format!("{}/api/summary", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let added: Subscription = client
        .post(format!("{}/api/subscriptions", server.base_url))
        .json(&serde_json::json!({
            "name": "HBO Max",
            "price": "29.99",
            "category": "Entertainment",
            "next_payment": "2025-11-07"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(added.name, "HBO Max");
    assert_eq!(added.currency, "PLN");
    assert_eq!(added.category, "Entertainment");
    assert_eq!(added.next_payment, "2025-11-07");
    assert!((added.price - 29.99).abs() < 1e-9);

    let subs = list_subscriptions(&client, &server.base_url).await;
    assert!(subs.iter().any(|sub| sub.id == added.id));

    let after: Summary = client
        .get(format!("{}/api/summary", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.subscription_count, before.subscription_count + 1);
    assert!(after.monthly_total > before.monthly_total);
}

#[tokio::test]
async fn http_rejects_invalid_subscriptions() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = list_subscriptions(&client, &server.base_url).await.len();

    for payload in [
        serde_json::json!({ "name": "", "price": "10" }),
        serde_json::json!({ "name": "Broken", "price": "abc" }),
        serde_json::json!({ "name": "Broken", "price": "0" }),
        serde_json::json!({ "name": "Broken", "price": "-3" }),
    ] {
        let response = client
            .post(format!("{}/api/subscriptions", server.base_url))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    let after = list_subscriptions(&client, &server.base_url).await.len();
    assert_eq!(after, before);
}

#[tokio::test]
async fn http_delete_removes_subscription_and_tolerates_unknown_ids() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let added: Subscription = client
        .post(format!("{}/api/subscriptions", server.base_url))
        .json(&serde_json::json!({
            "name": "Short lived",
            "price": "5.00",
            "category": "Other",
            "next_payment": "2025-12-01"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let remaining: Vec<Subscription> = client
        .post(format!("{}/api/subscriptions/delete", server.base_url))
        .json(&serde_json::json!({ "id": added.id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(remaining.iter().all(|sub| sub.id != added.id));

    // deleting a nonexistent id is a successful no-op
    let response = client
        .post(format!("{}/api/subscriptions/delete", server.base_url))
        .json(&serde_json::json!({ "id": added.id }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let after: Vec<Subscription> = response.json().await.unwrap();
    assert_eq!(after.len(), remaining.len());
}

#[tokio::test]
async fn http_calendar_shape_and_navigation_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let start: Calendar = client
        .get(format!("{}/api/calendar", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        start.weekdays,
        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
    );
    assert!(!start.label.is_empty());
    assert!((28..=37).contains(&start.cells.len()));

    let day_cells = start.cells.iter().filter(|cell| cell.day.is_some()).count();
    assert!((28..=31).contains(&day_cells));
    for cell in &start.cells {
        assert_eq!(cell.has_payment, !cell.payments.is_empty());
        assert_eq!(cell.payment_count, cell.payments.len());
        if cell.day.is_none() {
            assert!(!cell.is_today && !cell.has_payment);
        }
    }

    let next: Calendar = client
        .post(format!("{}/api/calendar/navigate", server.base_url))
        .json(&serde_json::json!({ "direction": 1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_ne!((next.year, next.month), (start.year, start.month));

    let back: Calendar = client
        .post(format!("{}/api/calendar/navigate", server.base_url))
        .json(&serde_json::json!({ "direction": -1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!((back.year, back.month), (start.year, start.month));
    assert_eq!(back.label, start.label);

    let bad = client
        .post(format!("{}/api/calendar/navigate", server.base_url))
        .json(&serde_json::json!({ "direction": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), 400);
}

#[tokio::test]
async fn http_index_serves_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("SubTrack"));
    assert!(body.contains("calendar-grid"));
}
