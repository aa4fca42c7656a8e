// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

/// Measurement settings for one bench target.
///
/// Each target starts from a preset sized for its workload. `ROUTE_BENCH_QUICK=1` shrinks any
/// preset for smoke runs, and the individual `ROUTE_BENCH_*` variables override single values
/// after that. Flamegraphs are only sampled under `--profile-time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchSettings {
    pub sample_size: usize,
    pub warm_up: Duration,
    pub measurement: Duration,
    pub profile_hz: i32,
}

impl BenchSettings {
    /// Single searches and cache hits finish in microseconds.
    pub const SEARCH: Self = Self {
        sample_size: 100,
        warm_up: Duration::from_secs(1),
        measurement: Duration::from_secs(4),
        profile_hz: 500,
    };

    /// Cold redraws route a whole layout per iteration.
    pub const REDRAW: Self = Self {
        sample_size: 30,
        warm_up: Duration::from_secs(2),
        measurement: Duration::from_secs(8),
        profile_hz: 100,
    };

    const QUICK: Self = Self {
        sample_size: 10,
        warm_up: Duration::from_millis(200),
        measurement: Duration::from_secs(1),
        profile_hz: 100,
    };

    pub fn with_env(self) -> Self {
        let base = if env_flag("ROUTE_BENCH_QUICK") {
            Self {
                profile_hz: self.profile_hz,
                ..Self::QUICK
            }
        } else {
            self
        };

        let warm_up_ms = env_clamped("ROUTE_BENCH_WARMUP_MS", millis(base.warm_up), 100..=60_000);
        let measurement_ms = env_clamped(
            "ROUTE_BENCH_MEASUREMENT_MS",
            millis(base.measurement),
            500..=300_000,
        );
        Self {
            sample_size: env_clamped("ROUTE_BENCH_SAMPLE_SIZE", base.sample_size, 10..=500),
            warm_up: Duration::from_millis(warm_up_ms),
            measurement: Duration::from_millis(measurement_ms),
            profile_hz: env_clamped("ROUTE_BENCH_PROFILE_HZ", base.profile_hz, 1..=1000),
        }
    }

    pub fn criterion(self) -> Criterion {
        Criterion::default()
            .sample_size(self.sample_size)
            .warm_up_time(self.warm_up)
            .measurement_time(self.measurement)
            .with_profiler(PProfProfiler::new(self.profile_hz, Output::Flamegraph(None)))
    }
}

fn env_value<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.trim().parse().ok()
}

fn env_clamped<T>(name: &str, default: T, range: RangeInclusive<T>) -> T
where
    T: FromStr + Ord + Copy,
{
    match env_value::<T>(name) {
        Some(value) => value.clamp(*range.start(), *range.end()),
        None => default,
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn env_flag(name: &str) -> bool {
    matches!(env_value::<String>(name).as_deref(), Some("1" | "true" | "yes"))
}
