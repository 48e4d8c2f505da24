use anyhow::Context;
use gradepointd::config::Config;
use gradepointd::ipc;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("load configuration")?;

    // stdout carries responses only.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        max_line_bytes = config.max_line_bytes,
        max_courses = config.max_courses,
        "gradepointd ready"
    );

    let max_line_bytes = config.max_line_bytes;
    let mut state = ipc::AppState::new(config);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    loop {
        let line = match ipc::read_line(&mut input, max_line_bytes) {
            Ok(Some(v)) => v,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed");
                break;
            }
        };

        let resp = match line {
            ipc::Line::Text(text) if text.trim().is_empty() => continue,
            ipc::Line::Text(text) => match serde_json::from_str::<ipc::Request>(&text) {
                Ok(req) => ipc::handle_request(&mut state, req),
                Err(e) => {
                    // Can't reply with an id.
                    tracing::warn!(error = %e, "bad json");
                    ipc::err_without_id("bad_json", e.to_string())
                }
            },
            ipc::Line::NotUtf8(reason) => {
                tracing::warn!(%reason, "request line is not utf-8");
                ipc::err_without_id("bad_json", format!("request is not valid UTF-8: {reason}"))
            }
            ipc::Line::TooLarge => {
                tracing::warn!(max_line_bytes, "request line too large");
                ipc::err_without_id(
                    "request_too_large",
                    format!("request exceeds {max_line_bytes} bytes"),
                )
            }
        };

        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
    Ok(())
}
