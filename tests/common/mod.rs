// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! In-process stand-in for the AmpliFi web UI

#![allow(dead_code)]

use axum::{
    Form, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PASSWORD: &str = "secret";
pub const CSRF_TOKEN: &str = "csrf-0123";
pub const INFO_TOKEN: &str = "a1b2c3d4e5f6";

pub fn scenario_payload(tx: u64, rx: u64) -> String {
    format!(
        r#"[
            {{"version":"4.0"}},
            {{"ap0":{{"2.4GHz":{{
                "Home":{{"dev1":{{"Description":"phone","TxBytes":{tx},"RxBytes":{rx},"SignalQuality":87,"HappinessScore":96}}}},
                "Internal network":{{"sat":{{"Description":"mesh-point","TxBytes":5}}}}
            }}}}}},
            {{}},
            {{}},
            {{"switch":{{"eth-0":{{"tx_bitrate":1000,"rx_bitrate":2000}}}}}}
        ]"#
    )
}

pub struct FakeRouter {
    pub login_page: Mutex<String>,
    pub full_info: Mutex<String>,
    pub full_info_status: Mutex<StatusCode>,
    pub info_page_redirects: AtomicBool,
    pub login_page_hits: AtomicUsize,
    pub login_posts: AtomicUsize,
    pub info_page_hits: AtomicUsize,
    pub full_info_hits: AtomicUsize,
}

impl FakeRouter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            login_page: Mutex::new(format!(
                "<html><form method='post'><input type='hidden' name='token' value='{CSRF_TOKEN}'>\
                 <input type='password' name='password'></form></html>"
            )),
            full_info: Mutex::new(scenario_payload(100, 50)),
            full_info_status: Mutex::new(StatusCode::OK),
            info_page_redirects: AtomicBool::new(false),
            login_page_hits: AtomicUsize::new(0),
            login_posts: AtomicUsize::new(0),
            info_page_hits: AtomicUsize::new(0),
            full_info_hits: AtomicUsize::new(0),
        })
    }

    pub fn set_login_page(&self, page: &str) {
        *self.login_page.lock().unwrap() = page.to_string();
    }

    pub fn set_full_info(&self, body: String) {
        *self.full_info.lock().unwrap() = body;
    }

    pub fn set_full_info_status(&self, status: StatusCode) {
        *self.full_info_status.lock().unwrap() = status;
    }

    /// Makes `/info.php` bounce to the login page, as after a session expiry
    pub fn set_info_page_redirects(&self, redirects: bool) {
        self.info_page_redirects.store(redirects, Ordering::SeqCst);
    }

    pub fn hits(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

async fn login_page(State(router): State<Arc<FakeRouter>>) -> String {
    router.login_page_hits.fetch_add(1, Ordering::SeqCst);
    router.login_page.lock().unwrap().clone()
}

async fn login_submit(
    State(router): State<Arc<FakeRouter>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    router.login_posts.fetch_add(1, Ordering::SeqCst);
    let token_ok = form.get("token").map(String::as_str) == Some(CSRF_TOKEN);
    let password_ok = form.get("password").map(String::as_str) == Some(PASSWORD);
    if !(token_ok && password_ok) {
        return (StatusCode::FORBIDDEN, "invalid credentials").into_response();
    }
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, "/info.php"),
            (header::SET_COOKIE, "webui-session=s3ss10n; Path=/"),
        ],
    )
        .into_response()
}

async fn info_page(State(router): State<Arc<FakeRouter>>) -> Response {
    router.info_page_hits.fetch_add(1, Ordering::SeqCst);
    if router.info_page_redirects.load(Ordering::SeqCst) {
        return (StatusCode::FOUND, [(header::LOCATION, "/login.php")]).into_response();
    }
    format!("<html><script>\nvar token='{INFO_TOKEN}';\nvar refresh = 5;\n</script></html>")
        .into_response()
}

async fn full_info(
    State(router): State<Arc<FakeRouter>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    router.full_info_hits.fetch_add(1, Ordering::SeqCst);
    if form.get("token").map(String::as_str) != Some(INFO_TOKEN)
        || form.get("do").map(String::as_str) != Some("full")
    {
        return (StatusCode::FORBIDDEN, "bad info token").into_response();
    }
    let status = *router.full_info_status.lock().unwrap();
    let body = router.full_info.lock().unwrap().clone();
    (status, body).into_response()
}

/// Serves the fake router on an ephemeral port and returns its base URL
pub async fn spawn(router: Arc<FakeRouter>) -> reqwest::Url {
    let app = Router::new()
        .route("/login.php", get(login_page).post(login_submit))
        .route("/info.php", get(info_page))
        .route("/info-async.php", post(full_info))
        .with_state(router);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    reqwest::Url::parse(&format!("http://{addr}")).unwrap()
}

pub fn password(value: &str) -> secrecy::SecretString {
    secrecy::SecretString::new(value.to_string().into())
}
