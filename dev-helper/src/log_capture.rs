use std::{cell::RefCell, sync::Once};

use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
  static CAPTURED: RefCell<Option<Vec<(Level, String)>>> = const { RefCell::new(None) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
  fn enabled(&self, _: &Metadata) -> bool { CAPTURED.with_borrow(Option::is_some) }

  fn log(&self, record: &Record) {
    CAPTURED.with_borrow_mut(|captured| {
      if let Some(records) = captured {
        records.push((record.level(), record.args().to_string()));
      }
    });
  }

  fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// The log records emitted on one thread while a closure ran.
#[derive(Debug, Default, Clone)]
pub struct CapturedLogs {
  records: Vec<(Level, String)>,
}

impl CapturedLogs {
  pub fn count(&self, level: Level) -> usize {
    self.records.iter().filter(|(l, _)| *l == level).count()
  }

  pub fn errors(&self) -> usize { self.count(Level::Error) }

  pub fn warnings(&self) -> usize { self.count(Level::Warn) }

  /// Whether any warning or error mentions `needle`.
  pub fn contains(&self, needle: &str) -> bool {
    self
      .records
      .iter()
      .any(|(l, msg)| *l <= Level::Warn && msg.contains(needle))
  }

  pub fn iter(&self) -> impl Iterator<Item = (Level, &str)> {
    self.records.iter().map(|(l, msg)| (*l, msg.as_str()))
  }
}

/// Run `f` and return its result with everything it logged on the current
/// thread.
///
/// The first call installs a process wide logger, so tests running in
/// parallel only see their own records. If another logger was installed
/// before, nothing is captured.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
  INSTALL.call_once(|| {
    if log::set_logger(&LOGGER).is_ok() {
      log::set_max_level(LevelFilter::Trace);
    }
  });

  let outer = CAPTURED.with_borrow_mut(|c| c.replace(vec![]));
  let result = f();
  let records = CAPTURED.with_borrow_mut(|c| std::mem::replace(c, outer));
  (result, CapturedLogs { records: records.unwrap_or_default() })
}
