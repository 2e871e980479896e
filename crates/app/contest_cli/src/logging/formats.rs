use std::io::Write;

use flexi_logger::DeferredNow;
use log::{Level, Record};

/// `LEVEL message` at info and above; debug and trace add a timestamp and the
/// target: `HH:MM:SS.mmm LEVEL target: message`.
pub fn cli_format(w: &mut dyn Write, now: &mut DeferredNow, record: &Record) -> std::io::Result<()> {
    match record.level() {
        Level::Debug | Level::Trace => write!(
            w,
            "{} {:<5} {}: {}",
            now.format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        ),
        level => write!(w, "{:<5} {}", level, record.args()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(level: Level) -> String {
        let mut out = Vec::new();
        let mut now = DeferredNow::new();
        let record = Record::builder()
            .level(level)
            .target("contest_core::session")
            .args(format_args!("hello"))
            .build();
        cli_format(&mut out, &mut now, &record).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn info_omits_target_and_time() {
        assert_eq!(render(Level::Info), "INFO  hello");
        assert_eq!(render(Level::Error), "ERROR hello");
    }

    #[test]
    fn debug_adds_time_and_target() {
        let line = render(Level::Debug);
        let (time, rest) = line.split_once(' ').unwrap();
        assert_eq!(time.len(), "00:00:00.000".len());
        assert_eq!(rest, "DEBUG contest_core::session: hello");
    }
}
