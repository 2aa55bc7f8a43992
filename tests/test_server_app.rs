// Common test server application shared between tests and standalone binary

use axum::{Router, response::Html, routing::get};
use std::time::Duration;

pub async fn create_app() -> Router {
    Router::new()
        // Static pages
        .route("/", get(home_page))
        .route("/tall", get(tall_page))
        // Network testing
        .route("/late-asset", get(late_asset_page))
        .route("/api/delayed", get(delayed_response))
}

// Page handlers

async fn home_page() -> Html<&'static str> {
    Html(
        r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Test Home</title>
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <style>
            body { margin: 0; font-family: sans-serif; }
            header { background: #204060; color: white; padding: 16px; }
            .cards { display: flex; flex-wrap: wrap; gap: 8px; padding: 8px; }
            .card { flex: 1 1 300px; height: 120px; background: #e0e8f0; }
        </style>
    </head>
    <body>
        <header><h1>Welcome to Test Server</h1></header>
        <div class="cards">
            <div class="card"></div>
            <div class="card"></div>
            <div class="card"></div>
        </div>
    </body>
    </html>
    "#,
    )
}

/// Page far taller than any viewport, for full-page captures
async fn tall_page() -> Html<&'static str> {
    Html(
        r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Tall Page</title>
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <style>body { margin: 0; } #block { height: 3000px; background: linear-gradient(#fff, #000); }</style>
    </head>
    <body><div id="block"></div></body>
    </html>
    "#,
    )
}

/// Page with one fetch that finishes shortly after load
async fn late_asset_page() -> Html<&'static str> {
    Html(
        r#"
    <!DOCTYPE html>
    <html>
    <head><title>Late Asset</title></head>
    <body>
        <div id="status">loading</div>
        <script>
            fetch('/api/delayed')
                .then(r => r.text())
                .then(t => { document.getElementById('status').textContent = t; });
        </script>
    </body>
    </html>
    "#,
    )
}

async fn delayed_response() -> &'static str {
    tokio::time::sleep(Duration::from_millis(300)).await;
    "loaded"
}
