//! Timed trial execution
//!
//! A trial calls one closure repeatedly: warmup, batch-size calibration, then
//! sampling until the time budget is spent. Panics raised by the closure are
//! captured into the outcome instead of unwinding through the suite.

use crate::benchmark::config::TrialOptions;
use crate::benchmark::result::{ErrorInfo, TrialOutcome};
use crate::benchmark::stats;
use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Largest batch calibration will grow to
const MAX_BATCH: u64 = 1 << 32;

/// Executes one named trial
pub trait TrialRunner {
    fn run_trial(&self, name: &str, body: &mut dyn FnMut()) -> TrialOutcome;
}

impl<T: TrialRunner + ?Sized> TrialRunner for &T {
    fn run_trial(&self, name: &str, body: &mut dyn FnMut()) -> TrialOutcome {
        (**self).run_trial(name, body)
    }
}

/// Ops/sec sampler
#[derive(Debug, Clone, Default)]
pub struct SampledTrialRunner {
    pub options: TrialOptions,
}

impl SampledTrialRunner {
    pub fn new(options: TrialOptions) -> Self {
        Self { options }
    }

    fn measure(&self, name: &str, body: &mut dyn FnMut()) -> Vec<f64> {
        let opts = &self.options;

        for _ in 0..opts.warmup_iterations {
            body();
        }

        let mut batch: u64 = 1;
        loop {
            let elapsed = time_batch(body, batch);
            if elapsed >= opts.min_sample_time || batch >= MAX_BATCH {
                break;
            }
            batch = batch.saturating_mul(2);
        }
        debug!("{}: calibrated batch size {}", name, batch);

        let started = Instant::now();
        let mut samples = Vec::with_capacity(opts.min_samples);
        while samples.len() < opts.max_samples {
            let elapsed = time_batch(body, batch);
            samples.push(elapsed.as_secs_f64() / batch as f64);
            if samples.len() >= opts.min_samples && started.elapsed() >= opts.max_time {
                break;
            }
        }
        trace!("{}: {} samples in {:?}", name, samples.len(), started.elapsed());
        samples
    }
}

impl TrialRunner for SampledTrialRunner {
    fn run_trial(&self, name: &str, body: &mut dyn FnMut()) -> TrialOutcome {
        match catch_trial_panic(|| self.measure(name, body)) {
            Ok(samples) => TrialOutcome::Measured(stats::summarize(&samples)),
            Err(error) => TrialOutcome::Failed(error),
        }
    }
}

fn time_batch(body: &mut dyn FnMut(), batch: u64) -> Duration {
    let start = Instant::now();
    for _ in 0..batch {
        body();
    }
    start.elapsed()
}

// ═════════════════════════════════════════════════════════════════════
// Panic capture
// ═════════════════════════════════════════════════════════════════════

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
    static CAPTURED: RefCell<Option<ErrorInfo>> = const { RefCell::new(None) };
}

static HOOK: Once = Once::new();

/// Install (once per process) a hook that records panics raised inside a
/// trial and forwards every other panic to the previous hook.
fn install_panic_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !CAPTURING.with(Cell::get) {
                previous(info);
                return;
            }
            let message = panic_message(info.payload());
            let location = info
                .location()
                .map(|l| format!("    at {}:{}:{}\n", l.file(), l.line(), l.column()))
                .unwrap_or_default();
            let stack = format!(
                "panicked: {}\n{}{}",
                message,
                location,
                Backtrace::force_capture()
            );
            CAPTURED.with(|c| {
                *c.borrow_mut() = Some(ErrorInfo {
                    message,
                    stack: Some(stack),
                })
            });
        }));
    });
}

/// Run `f`, turning a panic into an [`ErrorInfo`]
pub fn catch_trial_panic<T>(f: impl FnOnce() -> T) -> Result<T, ErrorInfo> {
    install_panic_hook();
    CAPTURING.with(|c| c.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CAPTURING.with(|c| c.set(false));

    result.map_err(|payload| {
        CAPTURED
            .with(|c| c.borrow_mut().take())
            .unwrap_or_else(|| ErrorInfo::new(panic_message(payload.as_ref())))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;

    fn quick() -> SampledTrialRunner {
        SampledTrialRunner::new(
            TrialOptions::default()
                .warmup_iterations(1)
                .min_samples(3)
                .max_samples(5)
                .min_sample_time(Duration::ZERO)
                .max_time(Duration::ZERO),
        )
    }

    #[test]
    fn test_measures_successful_body() {
        let mut calls = 0u64;
        let outcome = quick().run_trial("sum", &mut || {
            calls += 1;
            black_box((0..100u64).sum::<u64>());
        });
        let TrialOutcome::Measured(m) = outcome else {
            panic!("expected a measurement");
        };
        assert_eq!(m.size, 3);
        assert!(m.hz > 0.0);
        assert!(m.rme >= 0.0);
        // warmup + calibration + samples
        assert_eq!(calls, 1 + 1 + 3);
    }

    #[test]
    fn test_sampling_stops_at_max_samples() {
        let runner = SampledTrialRunner::new(
            TrialOptions::default()
                .warmup_iterations(0)
                .min_samples(2)
                .max_samples(4)
                .min_sample_time(Duration::ZERO)
                .max_time(Duration::from_secs(3600)),
        );
        let outcome = runner.run_trial("noop", &mut || {});
        assert!(matches!(outcome, TrialOutcome::Measured(m) if m.size == 4));
    }

    #[test]
    fn test_panic_is_captured() {
        let outcome = quick().run_trial("boom", &mut || panic!("fixture exploded"));
        let TrialOutcome::Failed(error) = outcome else {
            panic!("expected a failure");
        };
        assert_eq!(error.message, "fixture exploded");
        let stack = error.stack.expect("stack captured");
        assert!(stack.starts_with("panicked: fixture exploded"));
        assert!(stack.contains("trial.rs"));
    }

    #[test]
    fn test_formatted_panic_message() {
        let result: Result<(), _> = catch_trial_panic(|| panic!("bad index {}", 7));
        assert_eq!(result.unwrap_err().message, "bad index 7");
    }

    #[test]
    fn test_capture_flag_resets_after_trial() {
        let _ = catch_trial_panic(|| panic!("first"));
        assert!(!CAPTURING.with(Cell::get));
        assert_eq!(catch_trial_panic(|| 5).unwrap(), 5);
    }
}
