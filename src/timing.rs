//! Wall-clock timing of long-running entry points.
use std::time::{Duration, Instant};

use tracing::info;

/// Logs the time elapsed since `start` when dropped, on every exit path of
/// the enclosing scope.
#[derive(Debug)]
pub struct Stopwatch {
    label: &'static str,
    started: Instant,
}

impl Stopwatch {
    pub fn start(label: &'static str) -> Self {
        Stopwatch {
            label,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        info!(
            target: "string_wave::timing",
            "execution time of {}: {:.6} s",
            self.label,
            self.elapsed().as_secs_f64()
        );
    }
}

/// Runs `f` under a `Stopwatch`.
pub fn timed<T, F: FnOnce() -> T>(label: &'static str, f: F) -> T {
    let _watch = Stopwatch::start(label);
    f()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn logged<T>(f: impl FnOnce() -> T) -> (T, String) {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let r = tracing::subscriber::with_default(subscriber, f);
        (r, out.text())
    }

    #[test]
    fn timed_returns_result() {
        let r: Result<u32, &str> = timed("ok", || Ok(3));
        assert_eq!(r, Ok(3));
        let r: Result<u32, &str> = timed("err", || Err("boom"));
        assert_eq!(r, Err("boom"));
    }

    #[test]
    fn logs_on_error_path() {
        let (r, log) = logged(|| timed("failing", || Err::<u32, &str>("boom")));
        assert_eq!(r, Err("boom"));
        assert!(log.contains("execution time of failing:"), "{}", log);
        assert!(log.contains("string_wave::timing"), "{}", log);

        let (r, log) = logged(|| timed("passing", || Ok::<u32, &str>(1)));
        assert_eq!(r, Ok(1));
        assert!(log.contains("execution time of passing:"), "{}", log);
    }

    #[test]
    fn elapsed_grows() {
        let w = Stopwatch::start("sleep");
        std::thread::sleep(Duration::from_millis(5));
        assert!(w.elapsed() >= Duration::from_millis(5));
    }
}
