//! Development server with live reload and the page's API endpoints

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use indexmap::IndexMap;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Component, Path as FsPath, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, RwLock};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::ProjectKey;
use crate::context::Portfolio;
use crate::helpers::decode_path;
use crate::modal::ProjectModal;
use crate::templates::TemplateRenderer;
use crate::ui::{ContactForm, RelayClient};
use crate::Folio;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    folio: Folio,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
    renderer: TemplateRenderer,
    relay: RelayClient,
    /// Projects of the most recent successful build
    portfolio: RwLock<Option<Portfolio>>,
}

/// Start the development server
pub async fn start(
    folio: &Folio,
    portfolio: Option<Portfolio>,
    ip: &str,
    port: u16,
    watch: bool,
    open: bool,
) -> Result<()> {
    // Create broadcast channel for live reload notifications
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        folio: folio.clone(),
        reload_tx,
        live_reload: watch,
        renderer: TemplateRenderer::new()?,
        relay: RelayClient::new(&folio.config.form_relay),
        portfolio: RwLock::new(portfolio),
    });

    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        tokio::spawn(async move {
            if let Err(e) = watch_and_reload(state).await {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/__livereload", get(livereload_handler))
        .route("/api/projects/:index", get(project_modal_handler))
        .route("/api/contact", post(contact_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Watch for file changes, rebuild and trigger reload
async fn watch_and_reload(state: Arc<ServerState>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<DebounceEventResult>();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |res: DebounceEventResult| {
            let _ = tx.send(res);
        },
    )?;

    let source_dir = &state.folio.source_dir;
    if source_dir.exists() {
        debouncer
            .watcher()
            .watch(source_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", source_dir);
    }

    let config_path = state.folio.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    while let Some(result) = rx.recv().await {
        match result {
            Ok(events) => {
                // Filter out irrelevant events (like .git, .DS_Store, etc.)
                let relevant_events: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path_str = e.path.to_string_lossy();
                        !path_str.contains(".git")
                            && !path_str.contains(".DS_Store")
                            && !path_str.ends_with('~')
                    })
                    .collect();

                if relevant_events.is_empty() {
                    continue;
                }

                println!();
                for event in &relevant_events {
                    println!("📝 File changed: {}", event.path.display());
                }

                println!("\n🔄 Regenerating...");
                match state.folio.generate().await {
                    Ok(build) => {
                        if let Some(e) = &build.error {
                            println!("❌ Error loading portfolio data: {}", e);
                        } else {
                            println!("✅ Regenerated successfully!");
                        }
                        *state.portfolio.write().await = build.portfolio;
                        // Notify all connected clients to reload
                        let _ = state.reload_tx.send(());
                    }
                    Err(e) => {
                        println!("❌ Generation failed: {}", e);
                    }
                }
            }
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
            }
        }
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct ModalQuery {
    id: Option<String>,
}

/// Render the modal for one project; 204 when there is nothing to show
async fn project_modal_handler(
    State(state): State<Arc<ServerState>>,
    Path(index): Path<i64>,
    Query(query): Query<ModalQuery>,
) -> Response {
    let mut modal = ProjectModal::new(state.portfolio.read().await.clone());

    let opened = match (query.id, usize::try_from(index)) {
        (Some(id), Ok(index)) => modal.open_key(&ProjectKey { index, id }),
        _ => modal.open(index),
    };
    if !opened {
        return StatusCode::NO_CONTENT.into_response();
    }

    match state.renderer.render_modal(modal.view()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render modal: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Render error").into_response()
        }
    }
}

/// Relay a contact form submission and report the outcome
async fn contact_handler(
    State(state): State<Arc<ServerState>>,
    Form(fields): Form<IndexMap<String, String>>,
) -> Response {
    let mut form = ContactForm::new(fields);
    let note = form.submit(&state.relay).await;

    let status = if note.is_error() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Json(note)).into_response()
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            // Wait for reload signal
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            // Handle incoming messages (ping/pong)
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Fallback handler that serves files and injects live reload script
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let public_dir = &state.folio.public_dir;
    let Some(file_path) = public_file(public_dir, request.uri().path()) else {
        tracing::warn!("Rejected request outside the public directory: {}", request.uri());
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        // Serve static file using tower-http
        let mut service = ServeDir::new(public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Map a request path onto a file under the public directory
///
/// Returns `None` when the decoded path would leave the directory.
fn public_file(public_dir: &FsPath, request_path: &str) -> Option<PathBuf> {
    let decoded = decode_path(request_path);
    let relative = FsPath::new(decoded.trim_start_matches('/'));

    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return None;
    }

    if relative.as_os_str().is_empty() {
        Some(public_dir.join("index.html"))
    } else {
        Some(public_dir.join(relative))
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        // If no </body> tag, append to end
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
