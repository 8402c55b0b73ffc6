//! Criterion benchmarks for reward sampling and block sequencing.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;

use slotlab::prelude::*;

/// Always picks left, always continues.
struct AutoPresenter {
    want_choice: bool,
}

impl Presenter for AutoPresenter {
    fn show_text(&mut self, _text: &str) -> Result<(), SurfaceError> {
        self.want_choice = false;
        Ok(())
    }

    fn show_image(&mut self, _asset: &Path) -> Result<(), SurfaceError> {
        self.want_choice = true;
        Ok(())
    }

    fn next_key(&mut self) -> Result<String, SurfaceError> {
        Ok(if self.want_choice { "left" } else { "space" }.to_string())
    }
}

fn bench_sample_reward(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_reward");
    for (condition, choice) in [
        (Condition::Gain, Choice::Left),
        (Condition::Loss, Choice::Right),
    ] {
        let mut sampler = RewardSampler::from_seed(42);
        group.bench_function(format!("{condition}_{choice}"), |b| {
            b.iter(|| black_box(sampler.sample_reward(black_box(condition), black_box(choice))))
        });
    }
    group.finish();
}

fn bench_full_session(c: &mut Criterion) {
    let dir = std::env::temp_dir().join("slotlab-bench");
    let participant = Participant::from_answers(&[
        "bench".to_string(),
        "0".to_string(),
        "other".to_string(),
    ])
    .expect("three answers");

    c.bench_function("session_200_trials", |b| {
        b.iter(|| {
            let cfg = SessionConfig::default().with_seed(7).with_output_dir(&dir);
            let mut runner = SessionRunner::new(cfg, AutoPresenter { want_choice: false })
                .expect("default config is valid");
            let report = runner
                .run_with(participant.clone(), SessionTimestamp::from_string("bench"))
                .expect("session completes");
            black_box(report.log.len())
        })
    });

    let _ = std::fs::remove_dir_all(&dir);
}

criterion_group!(benches, bench_sample_reward, bench_full_session);
criterion_main!(benches);
