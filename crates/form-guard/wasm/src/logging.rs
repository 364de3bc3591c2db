//! `tracing` output for the browser console
//!
//! Formats events with `tracing-subscriber` and forwards each line to the
//! console method matching its level, so `error!` shows up as a console
//! error and `debug!` can be filtered in devtools. The level filter sits
//! behind a reload handle so a later mount can raise or lower it.

use std::io;

use once_cell::unsync::OnceCell;
use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, Registry};

thread_local! {
    static LEVEL_HANDLE: OnceCell<reload::Handle<LevelFilter, Registry>> = const { OnceCell::new() };
}

/// Buffers one formatted event and emits it on drop
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buffer);
        emit(self.level, line.trim_end());
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        Level::INFO => web_sys::console::info_1(&value),
        _ => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: Level, line: &str) {
    eprintln!("[{}] {}", level, line);
}

/// Hands out a `ConsoleWriter` per event
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Installs the console subscriber, or moves an installed one to `max_level`
pub fn init(max_level: Level) {
    let filter = LevelFilter::from_level(max_level);

    LEVEL_HANDLE.with(|cell| {
        if let Some(handle) = cell.get() {
            match handle.reload(filter) {
                Ok(()) => tracing::debug!(%max_level, "console log level changed"),
                Err(err) => emit(Level::ERROR, &format!("Could not change log level: {}", err)),
            }
            return;
        }

        let (filter_layer, handle) = reload::Layer::new(filter);
        let installed = tracing_subscriber::registry()
            .with(filter_layer)
            .with(
                fmt::layer()
                    .with_writer(ConsoleMakeWriter)
                    .with_ansi(false)
                    .without_time()
                    .with_target(false),
            )
            .try_init();

        if installed.is_ok() {
            let _ = cell.set(handle);
            tracing::debug!(%max_level, "console logging ready");
        }
    });
}
