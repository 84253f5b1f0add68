//! The `Measurement` class: wall-clock timing from scripts.
//!
//! ```text
//! m = Measurement()
//! while (i < 10) render(i); m.sample(); i = i + 1 end
//! println('{} samples, {}s average', m.count, m.average)
//! ```
//!
//! All durations are in seconds.

use std::fmt;
use std::time::{Duration, Instant};

use scenescript_core::{NativeClass, NativeError, ObjectRef, RegistrationError};
use scenescript_registry::{ClassBuilder, FunctionRegistry, MetaClass};

/// Stopwatch collecting lap samples.
#[derive(Debug)]
pub struct Measurement {
    started: Instant,
    last: Instant,
    count: u32,
    total: Duration,
}

impl Measurement {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last: now,
            count: 0,
            total: Duration::ZERO,
        }
    }

    /// Record the time since the previous sample (or since start).
    pub fn sample(&mut self) -> Duration {
        let now = Instant::now();
        let lap = now - self.last;
        self.last = now;
        self.count += 1;
        self.total += lap;
        lap
    }

    /// Time since creation or the last reset.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean sample duration, zero before the first sample.
    pub fn average(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total / self.count
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeClass for Measurement {
    const CLASS_NAME: &'static str = "Measurement";
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Measurement({} sample(s), {}s average)",
            self.count,
            self.average().as_secs_f64()
        )
    }
}

fn construct() -> Result<ObjectRef<Measurement>, NativeError> {
    Ok(ObjectRef::wrap(Measurement::new()))
}

fn sample(measurement: ObjectRef<Measurement>) -> Result<f64, NativeError> {
    Ok(measurement.get_mut()?.sample().as_secs_f64())
}

fn reset(measurement: ObjectRef<Measurement>) -> Result<(), NativeError> {
    measurement.get_mut()?.reset();
    Ok(())
}

/// Registers `Measurement`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeasurementClass;

impl MetaClass for MeasurementClass {
    fn name(&self) -> &str {
        Measurement::CLASS_NAME
    }

    fn init(&self, registry: &mut FunctionRegistry) -> Result<(), RegistrationError> {
        ClassBuilder::<Measurement>::new(registry)
            .constructor(construct)?
            .method("sample", sample)?
            .method("reset", reset)?
            .getter("elapsed", |m: &Measurement| m.elapsed().as_secs_f64())?
            .getter("count", |m: &Measurement| f64::from(m.count()))?
            .getter("average", |m: &Measurement| m.average().as_secs_f64())?;
        Ok(())
    }
}
