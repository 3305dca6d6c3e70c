//! Mock Solana JSON-RPC server for testing
//!
//! Serves the read-only methods `SolanaRpcClient` calls over plain HTTP on a
//! random local port and records every request body it receives:
//! - getBalance returns `{ context, value: <balance> }`
//! - getAccountInfo returns an executable account for configured keys, else `value: null`
//! - getHealth returns "ok", getVersion returns `{ "solana-core": "1.18.26" }`
//!
//! getVersion always succeeds, so a client probing the node version first
//! still reaches the configured failure on the call under test.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value as JsonValue};

use crate::domain::Pubkey;

/// 36 zero bytes, the size of an upgradeable program account
const PROGRAM_ACCOUNT_DATA: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Mock RPC server for testing
pub struct MockRpcServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<JsonValue>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for mock responses
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Balance returned by getBalance, in lamports
    pub balance: u64,
    /// Answer every call except getVersion with this JSON-RPC error object
    pub rpc_error: Option<(i64, String)>,
    /// Answer every call except getVersion with this HTTP status and a non-JSON body
    pub http_status: Option<u16>,
    /// Accounts that exist and are executable
    pub executable_accounts: Vec<Pubkey>,
}

impl MockRpcServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking so the accept loop can observe shutdown
        listener.set_nonblocking(true)?;

        let running_clone = Arc::clone(&running);
        let requests_clone = Arc::clone(&requests);
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = Arc::clone(&requests_clone);
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Request bodies received so far, in arrival order
    pub fn requests(&self) -> Vec<JsonValue> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockRpcServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, log: &Mutex<Vec<JsonValue>>) {
    let _ = stream.set_nonblocking(false);
    let Some(body) = read_body(&mut stream) else {
        send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
        return;
    };

    let request: JsonValue = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(_) => {
            send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid JSON"}"#);
            return;
        }
    };
    if let Ok(mut requests) = log.lock() {
        requests.push(request.clone());
    }

    let failing = request["method"] != "getVersion";
    if let Some(status) = config.http_status.filter(|_| failing) {
        send_response(&mut stream, status, "Service Unavailable", "upstream unavailable");
        return;
    }

    let id = request["id"].clone();
    let error = config.rpc_error.as_ref().filter(|_| failing);
    let reply = match error {
        Some((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        }),
        None => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result_for(&request, config)
        }),
    };

    send_response(&mut stream, 200, "OK", &reply.to_string());
}

fn result_for(request: &JsonValue, config: &MockConfig) -> JsonValue {
    let context = json!({ "slot": 42 });
    match request["method"].as_str().unwrap_or("") {
        "getBalance" => json!({ "context": context, "value": config.balance }),
        "getAccountInfo" => {
            let key = request["params"][0].as_str().unwrap_or("");
            let exists = config
                .executable_accounts
                .iter()
                .any(|k| k.to_string() == key);
            if exists {
                json!({
                    "context": context,
                    "value": {
                        "data": [PROGRAM_ACCOUNT_DATA, "base64"],
                        "executable": true,
                        "lamports": 1_141_440u64,
                        "owner": "BPFLoaderUpgradeab1e11111111111111111111111",
                        "rentEpoch": u64::MAX,
                        "space": 36
                    }
                })
            } else {
                json!({ "context": context, "value": null })
            }
        }
        "getHealth" => json!("ok"),
        "getVersion" => json!({ "solana-core": "1.18.26", "feature-set": 3_469_865_029u64 }),
        _ => JsonValue::Null,
    }
}

/// Read headers and a Content-Length body from the stream
fn read_body(stream: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buffer = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&data[..header_end]).to_lowercase();
    let content_length: usize = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    let end = (header_end + content_length).min(data.len());
    Some(String::from_utf8_lossy(&data[header_end..end]).into_owned())
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
