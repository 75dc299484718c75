//! Benchmarks for controller register sequences.
//!
//! The delay is a no-op so the numbers show lock and port-access overhead
//! only; on hardware `start` and `ping` add the 10ms tick pulse.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use haliburton_watchdog::prelude::*;

/// Flat register file without an access log, so long runs stay bounded.
#[derive(Debug)]
struct RegisterArray {
    words: [u32; 0x600],
}

impl RegisterArray {
    fn slot(&mut self, port: u16) -> Option<&mut u32> {
        self.words.get_mut(usize::from(port))
    }
}

impl PortIo for RegisterArray {
    fn inb(&mut self, port: u16) -> u8 {
        self.slot(port).map_or(0, |w| w.to_le_bytes()[0])
    }

    fn outb(&mut self, port: u16, value: u8) {
        if let Some(w) = self.slot(port) {
            *w = u32::from(value);
        }
    }

    fn inl(&mut self, port: u16) -> u32 {
        self.slot(port).map_or(0, |w| *w)
    }

    fn outl(&mut self, port: u16, value: u32) {
        if let Some(w) = self.slot(port) {
            *w = value;
        }
    }
}

fn controller() -> WatchdogController<RegisterArray, NoopDelay> {
    WatchdogController::new(
        &WatchdogConfig::default(),
        RegisterArray {
            words: [0; 0x600],
        },
        NoopDelay,
    )
}

fn bench_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("operations");

    let ctl = controller();

    group.bench_function("ping", |b| {
        b.iter(|| black_box(ctl.ping()));
    });

    group.bench_function("start", |b| {
        b.iter(|| black_box(ctl.start()));
    });

    group.bench_function("stop", |b| {
        b.iter(|| black_box(ctl.stop()));
    });

    group.bench_function("set_timeout_valid", |b| {
        b.iter(|| black_box(ctl.set_timeout(black_box(2))));
    });

    group.bench_function("set_timeout_ignored", |b| {
        b.iter(|| black_box(ctl.set_timeout(black_box(7))));
    });

    group.finish();
}

fn bench_device(c: &mut Criterion) {
    let mut group = c.benchmark_group("device");

    group.bench_function("keepalive_active", |b| {
        let device = WatchdogDevice::new(controller(), false);
        if device.start().is_err() {
            return;
        }
        b.iter(|| black_box(device.keepalive()));
    });

    group.bench_function("timeout_class", |b| {
        let ctl = controller();
        b.iter(|| black_box(ctl.timeout_class()));
    });

    group.finish();
}

criterion_group!(benches, bench_operations, bench_device);

criterion_main!(benches);
