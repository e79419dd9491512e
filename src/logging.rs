//! Routes `tracing` output to the browser console.
//!
//! The fmt layer formats each event into a [`ConsoleWriter`], which flushes
//! the finished line to `console.error`/`warn`/`info`/`debug` according to
//! the event level when it is dropped.

#[cfg(target_arch = "wasm32")]
use std::io;

#[cfg(target_arch = "wasm32")]
use tracing::{level_filters::LevelFilter, Level, Metadata};
#[cfg(target_arch = "wasm32")]
use tracing_subscriber::fmt::MakeWriter;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// Buffer for a single formatted event.
#[cfg(target_arch = "wasm32")]
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

#[cfg(target_arch = "wasm32")]
impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }
        let message = JsValue::from_str(line);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&message),
            Level::WARN => web_sys::console::warn_1(&message),
            Level::INFO => web_sys::console::info_1(&message),
            _ => web_sys::console::debug_1(&message),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

#[cfg(target_arch = "wasm32")]
impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// Install the console subscriber and panic hook. Safe to call repeatedly;
/// only the first call takes effect.
#[cfg(target_arch = "wasm32")]
pub fn init_console_logging(level: LevelFilter) {
    console_error_panic_hook::set_once();
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(level)
        .try_init();
    if installed.is_ok() {
        tracing::debug!(%level, "console logging ready");
    }
}
