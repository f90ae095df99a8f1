use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use transcript_studio::models::{EditorState, Message, Role};
use transcript_studio::{DEFAULT_HISTORY_BOUND, HistoryLog};

/// Build a snapshot with N message pairs
fn generate_state(num_pairs: usize) -> EditorState {
    let mut state = EditorState::default();
    for i in 0..num_pairs {
        let cid = format!("conv{:06x}", i);
        state.messages.push(Message::with_conversation_id(
            Role::User,
            format!("User turn {}", i),
            cid.clone(),
        ));
        state.messages.push(Message::with_conversation_id(
            Role::Assistant,
            format!("Assistant reply {}", i),
            cid,
        ));
    }
    state
}

fn bench_history_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_push");

    for size in [10, 100, 1_000].iter() {
        let state = generate_state(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            let mut log = HistoryLog::new();
            b.iter(|| log.push(black_box(&state)));
        });
    }

    group.finish();
}

fn bench_undo_redo_cycle(c: &mut Criterion) {
    let state = generate_state(100);
    let mut log = HistoryLog::new();
    for _ in 0..DEFAULT_HISTORY_BOUND {
        log.push(&state);
    }

    c.bench_function("undo_redo_cycle", |b| {
        b.iter(|| {
            black_box(log.undo());
            black_box(log.redo());
        });
    });
}

criterion_group!(benches, bench_history_push, bench_undo_redo_cycle);
criterion_main!(benches);
