//! `log` backend writing to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn parse_level(level: Option<&str>) -> Result<LevelFilter, JsError> {
    match level {
        None => Ok(LevelFilter::Warn),
        Some(s) => s
            .parse::<LevelFilter>()
            .map_err(|_| JsError::new(&format!("unknown log level '{s}'"))),
    }
}

/// Route `log` output to the console. `level` is one of
/// `off|error|warn|info|debug|trace` (default `warn`). Calling it again only
/// changes the level.
#[wasm_bindgen(js_name = init_logging)]
pub fn init_logging(level: Option<String>) -> Result<(), JsError> {
    let filter = parse_level(level.as_deref())?;
    // A second install fails; the level still updates below.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
    Ok(())
}
