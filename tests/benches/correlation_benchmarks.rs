//! # JetBridge Correlation Benchmarks
//!
//! | Path | Operation | Target |
//! |------|-----------|--------|
//! | Frame | build request payload + frame | < 1µs |
//! | Inbound | parse + resolve one reply | < 5µs |
//! | Table | register/resolve under load | < 5µs per pair |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jetbridge_client::{ClientDataEvent, InboundHandler, PendingRequestTable};
use jetbridge_types::{encode_request, ChannelConfig, Frame, FrameId, IdAllocator, Opcode};

fn bench_frame_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    group.bench_function("encode_request", |b| {
        b.iter(|| {
            let payload =
                encode_request(Opcode::GetNamedVariable, black_box("(L:A32NX_FLAPS)")).unwrap();
            black_box(Frame::new(&payload).unwrap())
        })
    });

    let frame = Frame::new(&[1u8; 64]).unwrap();
    group.bench_function("to_bytes_from_bytes", |b| {
        b.iter(|| black_box(Frame::from_bytes(&frame.to_bytes()).unwrap()))
    });

    group.finish();
}

fn bench_inbound_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("inbound");
    let channel = ChannelConfig::default();
    let allocator = IdAllocator::new();

    for backlog in [0usize, 100, 10_000] {
        let table = PendingRequestTable::new();
        let handler = InboundHandler::new(table.clone(), &channel);
        let _held: Vec<_> = (0..backlog)
            .map(|_| table.register(allocator.allocate()).unwrap())
            .collect();

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("resolve", backlog), &backlog, |b, _| {
            b.iter(|| {
                let id = allocator.allocate();
                let _slot = table.register(id).unwrap();
                let wire = Frame::with_id(id, &[]).unwrap().to_bytes();
                black_box(handler.on_frame_received(ClientDataEvent::new(
                    channel.downlink_request,
                    channel.packet_definition,
                    &wire,
                )))
            })
        });
    }

    group.bench_function("unmatched", |b| {
        let table = PendingRequestTable::new();
        let handler = InboundHandler::new(table, &channel);
        let wire = Frame::with_id(FrameId::from_raw(-1), &[]).unwrap().to_bytes();
        b.iter(|| {
            black_box(handler.on_frame_received(ClientDataEvent::new(
                channel.downlink_request,
                channel.packet_definition,
                &wire,
            )))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_frame_construction, bench_inbound_resolution);
criterion_main!(benches);
