use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use transcript_studio::models::{Message, Role};
use transcript_studio::{DropAnchor, TranscriptModel};

/// Build a transcript of N conversation pairs plus anchors for all but the
/// last conversation, mimicking a drag of the final pair.
fn generate_transcript(num_pairs: usize) -> (TranscriptModel, Vec<DropAnchor>, String) {
    let mut messages = Vec::with_capacity(num_pairs * 2);
    let mut anchors = Vec::with_capacity(num_pairs - 1);

    for i in 0..num_pairs {
        let cid = format!("conv{:06x}", i);
        messages.push(Message::with_conversation_id(
            Role::User,
            format!("User turn {}", i),
            cid.clone(),
        ));
        messages.push(Message::with_conversation_id(
            Role::Assistant,
            format!("Assistant reply {}", i),
            cid.clone(),
        ));
        if i + 1 < num_pairs {
            anchors.push(DropAnchor::new(cid, i as f64 * 40.0, 36.0));
        }
    }

    let moved = format!("conv{:06x}", num_pairs - 1);
    (TranscriptModel::from_messages(messages), anchors, moved)
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder_by_drag_target");

    for size in [10, 100, 1_000].iter() {
        let (transcript, anchors, moved) = generate_transcript(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut model = transcript.clone();
                // Drop in the middle of the list.
                model.reorder_by_drag_target(
                    black_box(&moved),
                    (*size as f64 / 2.0) * 40.0,
                    &anchors,
                );
                model
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reorder);
criterion_main!(benches);
