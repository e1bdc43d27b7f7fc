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
struct SlotView {
    slot: u8,
    active: bool,
    taken: bool,
}

#[derive(Debug, Deserialize)]
struct DayView {
    date: String,
    complete: bool,
    slots: Vec<SlotView>,
}

#[derive(Debug, Deserialize)]
struct WeekResponse {
    start_date: String,
    end_date: String,
    days: Vec<DayView>,
    can_undo: bool,
}

#[derive(Debug, Deserialize)]
struct MonthlyCounts {
    taken: u32,
    open: u32,
    rate_percent: u32,
}

#[derive(Debug, Deserialize)]
struct Streaks {
    current: u32,
    best: u32,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    month: MonthlyCounts,
    streaks: Streaks,
}

#[derive(Debug, Deserialize)]
struct ToggleResponse {
    key: String,
    taken: bool,
    can_undo: bool,
}

#[derive(Debug, Deserialize)]
struct UndoResponse {
    undone: bool,
    can_undo: bool,
}

#[derive(Debug, Deserialize)]
struct PatternResponse {
    slots: [bool; 4],
    active_count: usize,
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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "pill_tracker_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/week")).send().await {
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
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_pill_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
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

async fn fetch_week(client: &Client, base_url: &str, start: Option<&str>) -> WeekResponse {
    let url = match start {
        Some(start) => format!("{base_url}/api/week?start={start}"),
        None => format!("{base_url}/api/week"),
    };
    client
        .get(url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn post_toggle(client: &Client, base_url: &str, date: &str, slot: u8) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/toggle"))
        .json(&serde_json::json!({ "date": date, "slot": slot }))
        .send()
        .await
        .unwrap()
}

async fn post_undo(client: &Client, base_url: &str) -> UndoResponse {
    client
        .post(format!("{base_url}/api/undo"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

fn slot_taken(week: &WeekResponse, date: &str, slot: u8) -> bool {
    week.days
        .iter()
        .find(|day| day.date == date)
        .expect("day in week")
        .slots
        .iter()
        .find(|s| s.slot == slot)
        .expect("slot in day")
        .taken
}

// fixed Monday well in the past so month-to-date stats are unaffected
const WEEK: &str = "2020-01-06";

#[tokio::test]
async fn http_toggle_marks_and_unmarks_a_dose() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let first: ToggleResponse = post_toggle(&client, &server.base_url, WEEK, 0)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(first.key, format!("{WEEK}-0"));
    assert!(first.taken);
    assert!(first.can_undo);

    let week = fetch_week(&client, &server.base_url, Some(WEEK)).await;
    assert_eq!(week.start_date, WEEK);
    assert_eq!(week.end_date, "2020-01-12");
    assert!(slot_taken(&week, WEEK, 0));
    assert!(week.days[0].complete);

    // double toggle restores the prior state
    let second: ToggleResponse = post_toggle(&client, &server.base_url, WEEK, 0)
        .await
        .json()
        .await
        .unwrap();
    assert!(!second.taken);

    let week = fetch_week(&client, &server.base_url, Some(WEEK)).await;
    assert!(!slot_taken(&week, WEEK, 0));
    assert!(!week.days[0].complete);
}

#[tokio::test]
async fn http_toggle_rejects_bad_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = post_toggle(&client, &server.base_url, "not-a-date", 0).await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // slot 1 is inactive in the default pattern
    let response = post_toggle(&client, &server.base_url, WEEK, 1).await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_undo_reverses_the_last_toggle() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_week(&client, &server.base_url, Some(WEEK)).await;
    let was_taken = slot_taken(&before, "2020-01-07", 0);

    let toggled: ToggleResponse = post_toggle(&client, &server.base_url, "2020-01-07", 0)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(toggled.taken, !was_taken);

    let undo = post_undo(&client, &server.base_url).await;
    assert!(undo.undone);

    let after = fetch_week(&client, &server.base_url, Some(WEEK)).await;
    assert_eq!(slot_taken(&after, "2020-01-07", 0), was_taken);
}

#[tokio::test]
async fn http_undo_reports_empty_stack() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    // drain whatever history earlier tests left behind
    loop {
        let undo = post_undo(&client, &server.base_url).await;
        if !undo.undone {
            assert!(!undo.can_undo);
            break;
        }
    }

    let undo = post_undo(&client, &server.base_url).await;
    assert!(!undo.undone);
    assert!(!undo.can_undo);

    let week = fetch_week(&client, &server.base_url, Some(WEEK)).await;
    assert!(!week.can_undo);
}

#[tokio::test]
async fn http_pattern_update_changes_active_slots() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    // drain history left by other tests so the undo check below can only
    // be satisfied by the pattern change itself
    loop {
        if !post_undo(&client, &server.base_url).await.undone {
            break;
        }
    }

    let updated: PatternResponse = client
        .post(format!("{}/api/pattern", server.base_url))
        .json(&serde_json::json!({ "slots": [true, true, false, false] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.active_count, 2);
    assert_eq!(updated.slots, [true, true, false, false]);

    let week = fetch_week(&client, &server.base_url, Some(WEEK)).await;
    let monday = &week.days[0];
    assert!(monday.slots[0].active && monday.slots[1].active);
    assert!(!monday.slots[2].active && !monday.slots[3].active);

    // pattern changes are not undoable
    let undo = post_undo(&client, &server.base_url).await;
    assert!(!undo.undone);

    // restore the default pattern for the other tests
    let restored: PatternResponse = client
        .post(format!("{}/api/pattern", server.base_url))
        .json(&serde_json::json!({ "slots": [true, false, false, false] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(restored.active_count, 1);
}

#[tokio::test]
async fn http_stats_stay_within_bounds() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let stats: StatsResponse = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(stats.month.rate_percent <= 100);
    if stats.month.taken == 0 && stats.month.open == 0 {
        assert_eq!(stats.month.rate_percent, 0);
    }
    assert!(stats.streaks.best >= stats.streaks.current);
}
