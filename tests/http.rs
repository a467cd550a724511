use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct CreatedItem {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ToggleResponse {
    item_id: u64,
    date: String,
    completed: bool,
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
    path.push(format!("progress_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/stats")).send().await {
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
    let child = Command::new(env!("CARGO_BIN_EXE_progress_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("TRACKER_YEAR", "2026")
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

async fn get_json(client: &Client, url: String) -> Value {
    client.get(url).send().await.unwrap().json().await.unwrap()
}

#[tokio::test]
async fn http_tracked_item_feeds_stats() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_json(&client, format!("{}/api/stats", server.base_url)).await;

    let response = client
        .post(format!("{}/api/items", server.base_url))
        .json(&json!({ "name": "Morning run", "category": "Fitness" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let item: CreatedItem = response.json().await.unwrap();
    assert_eq!(item.name, "Morning run");

    let toggled: ToggleResponse = client
        .post(format!("{}/api/progress/toggle", server.base_url))
        .json(&json!({ "item_id": item.id, "date": "2026-01-05" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(toggled.item_id, item.id);
    assert_eq!(toggled.date, "2026-01-05");
    assert!(toggled.completed);

    let after = get_json(&client, format!("{}/api/stats", server.base_url)).await;
    assert_eq!(
        after["overview"]["total_goals"].as_u64().unwrap(),
        before["overview"]["total_goals"].as_u64().unwrap() + 1
    );
    assert_eq!(
        after["categories"]["Fitness"]["achieved"].as_u64().unwrap(),
        before["categories"]["Fitness"]["achieved"].as_u64().unwrap() + 1
    );
    assert_eq!(after["level"]["level"], 1);
    assert_eq!(after["level"]["tier_name"], "Novice");

    let tracker = get_json(&client, format!("{}/api/tracker?month=1", server.base_url)).await;
    assert_eq!(tracker["year"], 2026);
    assert_eq!(tracker["dates"].as_array().unwrap().len(), 31);
    let row = tracker["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["id"].as_u64() == Some(item.id))
        .expect("missing row");
    assert_eq!(row["category"], "Fitness");
    assert_eq!(row["checked"][4], true);

    let response = client
        .delete(format!("{}/api/items/{}", server.base_url, item.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .post(format!("{}/api/progress/toggle", server.base_url))
        .json(&json!({ "item_id": item.id, "date": "2026-01-06" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_export_import_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/items", server.base_url))
        .json(&json!({ "name": "Sketch", "category": "Creativity" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("progress-tracker-backup-"));
    let backup: Value = response.json().await.unwrap();
    assert!(backup["exportDate"].is_string());

    let response = client
        .post(format!("{}/api/import", server.base_url))
        .body(r#"{"items": []}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/import", server.base_url))
        .body(backup.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let again: Value = get_json(&client, format!("{}/api/export", server.base_url)).await;
    assert_eq!(again["items"], backup["items"]);
    assert_eq!(again["categories"], backup["categories"]);
}

#[tokio::test]
async fn http_goals_and_books() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let board = get_json(&client, format!("{}/api/goals", server.base_url)).await;
    assert_eq!(board["gridSize"], 3);

    let response = client
        .put(format!("{}/api/goals/size", server.base_url))
        .json(&json!({ "size": 4 }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let board: Value = response.json().await.unwrap();
    assert_eq!(board["goals"].as_array().unwrap().len(), 16);

    let response = client
        .put(format!("{}/api/goals/15", server.base_url))
        .json(&json!({ "text": "Run a marathon" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/api/goals/size", server.base_url))
        .json(&json!({ "size": 9 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/books", server.base_url))
        .json(&json!({
            "title": "The Left Hand of Darkness",
            "score": 5,
            "startDate": "2026-01-01",
            "endDate": "2026-01-15"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .post(format!("{}/api/books", server.base_url))
        .json(&json!({ "title": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let books = get_json(&client, format!("{}/api/books?sort=score&min_score=5", server.base_url)).await;
    let book = books
        .as_array()
        .unwrap()
        .iter()
        .find(|book| book["title"] == "The Left Hand of Darkness")
        .expect("missing book");
    assert_eq!(book["readingDays"], 14);
}

#[tokio::test]
async fn http_index_and_levels() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let html = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Progress Tracker 2026"));

    let levels = get_json(&client, format!("{}/api/levels", server.base_url)).await;
    let levels = levels.as_array().unwrap();
    assert_eq!(levels.len(), 50);
    assert_eq!(levels[0]["xp_required"], 3000.0);
    assert_eq!(levels[49]["tier"], "Ascendant");
}
