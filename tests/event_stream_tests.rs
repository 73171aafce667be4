mod common;

use common::TraceFixture;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use tracegraph_store::events::{Event, EventKind, StreamMessage, StreamSummary};
use tracegraph_store::store::TraceStore;

fn drain(store: &TraceStore, capacity: usize) -> (Vec<Event>, StreamSummary) {
    let mut events = Vec::new();
    for message in store.stream_events(capacity).unwrap() {
        match message {
            StreamMessage::Event(event) => events.push(event),
            StreamMessage::Finished(summary) => return (events, summary),
            StreamMessage::Failed(reason) => panic!("stream failed: {}", reason),
        }
    }
    panic!("stream ended without a summary");
}

fn ev(kind: EventKind, id: u64, address: u64, size: u64, logical_time: u64) -> Event {
    Event {
        kind,
        id,
        address,
        size,
        logical_time,
    }
}

#[test]
fn test_sample_stream_order() {
    let fixture = TraceFixture::sample();
    let store = TraceStore::open(&fixture.path).unwrap();

    let (events, summary) = drain(&store, 2);

    assert_eq!(
        events,
        vec![
            ev(EventKind::MemWrite, 1, 0x7ffc_0000, 8, 0),
            ev(EventKind::Instruction, 1, 0x401000, 1, 0),
            ev(EventKind::Instruction, 2, 0x401001, 3, 1),
            ev(EventKind::MemRead, 2, 0x601010, 4, 2),
            ev(EventKind::Instruction, 3, 0x401004, 3, 2),
            ev(EventKind::MemRead, 3, 0x7ffc_0008, 8, 3),
            ev(EventKind::Instruction, 4, 0x401010, 1, 3),
        ]
    );
    assert_eq!(summary.instructions, 4);
    assert_eq!(summary.memory_accesses, 3);
    assert!(!summary.cancelled);
}

#[test]
fn test_empty_trace_stream() {
    let fixture = TraceFixture::empty();
    let store = TraceStore::open(&fixture.path).unwrap();

    let (events, summary) = drain(&store, 1);
    assert!(events.is_empty());
    assert_eq!(summary.total_events(), 0);
}

#[test]
fn test_logical_time_properties() {
    let fixture = TraceFixture::long(200);
    let store = TraceStore::open(&fixture.path).unwrap();

    let (events, summary) = drain(&store, 16);
    assert_eq!(summary.instructions, 200);
    assert_eq!(summary.memory_accesses, 200);
    assert_eq!(events.len() as u64, summary.total_events());

    // Non-decreasing time, instruction times are exactly 0..n
    assert!(events
        .windows(2)
        .all(|pair| pair[0].logical_time <= pair[1].logical_time));
    let instruction_times: Vec<u64> = events
        .iter()
        .filter(|e| e.kind == EventKind::Instruction)
        .map(|e| e.logical_time)
        .collect();
    assert_eq!(instruction_times, (0..200).collect::<Vec<_>>());

    // Each access shares its instruction's time and comes first
    let mut instruction_at: HashMap<u64, usize> = HashMap::new();
    for (position, event) in events.iter().enumerate() {
        if event.kind == EventKind::Instruction {
            instruction_at.insert(event.id, position);
        }
    }
    for (position, event) in events.iter().enumerate() {
        if event.kind.is_memory() {
            // In the long fixture access n belongs to instruction n
            let owner = instruction_at[&event.id];
            assert!(position < owner);
            assert_eq!(events[owner].logical_time, event.logical_time);
        }
    }
}

#[test]
fn test_cancel_stops_early() {
    let fixture = TraceFixture::long(5000);
    let store = TraceStore::open(&fixture.path).unwrap();

    let mut stream = store.stream_events(4).unwrap();
    let mut received = 0u64;
    let summary = loop {
        match stream.blocking_recv().expect("stream closed without summary") {
            StreamMessage::Event(_) => {
                received += 1;
                if received == 10 {
                    stream.cancel();
                }
            }
            StreamMessage::Finished(summary) => break summary,
            StreamMessage::Failed(reason) => panic!("stream failed: {}", reason),
        }
    };

    assert!(summary.cancelled);
    assert!(summary.instructions < 5000);
    assert_eq!(summary.total_events(), received);
}

#[test]
fn test_drop_mid_stream_joins_worker() {
    let fixture = TraceFixture::long(5000);
    let store = TraceStore::open(&fixture.path).unwrap();

    let mut stream = store.stream_events(1).unwrap();
    for _ in 0..3 {
        assert!(matches!(
            stream.blocking_recv(),
            Some(StreamMessage::Event(_))
        ));
    }

    // Worker is blocked on a full channel; drop must not hang
    drop(stream);

    // Store is still usable afterwards
    assert_eq!(store.statistics().unwrap().instruction_count, 5000);
}

#[test]
fn test_concurrent_describe_during_stream() {
    let fixture = TraceFixture::long(500);
    let store = TraceStore::open(&fixture.path).unwrap();
    let symbols = store.load_symbols().unwrap();

    let mut described = 0;
    for message in store.stream_events(8).unwrap() {
        match message {
            StreamMessage::Event(event) => {
                if event.logical_time % 100 == 0 {
                    let text = store.describe_event(&symbols, event.kind, event.id).unwrap();
                    assert!(!text.is_empty());
                    described += 1;
                }
            }
            StreamMessage::Finished(_) => break,
            StreamMessage::Failed(reason) => panic!("stream failed: {}", reason),
        }
    }

    // Five instruction times, each with one access and one instruction
    assert_eq!(described, 10);
}

#[tokio::test]
async fn test_async_recv() {
    let fixture = TraceFixture::sample();
    let store = TraceStore::open(&fixture.path).unwrap();
    let mut stream = store.stream_events(2).unwrap();

    let first = stream.recv().await;
    assert!(matches!(
        first,
        Some(StreamMessage::Event(Event {
            kind: EventKind::MemWrite,
            ..
        }))
    ));

    let mut kinds = Vec::new();
    while let Some(message) = stream.recv().await {
        match message {
            StreamMessage::Event(event) => kinds.push(event.kind),
            StreamMessage::Finished(summary) => {
                assert_eq!(summary.total_events(), 7);
                break;
            }
            StreamMessage::Failed(reason) => panic!("stream failed: {}", reason),
        }
    }
    assert_eq!(kinds.len(), 6);
}

#[test]
fn test_cancel_before_first_event() {
    let fixture = TraceFixture::long(20000);
    let store = TraceStore::open(&fixture.path).unwrap();

    let stream = store.stream_events(1).unwrap();
    stream.cancel();

    let mut events = 0u64;
    let mut summary = None;
    for message in stream {
        match message {
            StreamMessage::Event(_) => events += 1,
            StreamMessage::Finished(done) => {
                summary = Some(done);
                break;
            }
            StreamMessage::Failed(reason) => panic!("cancel surfaced as failure: {}", reason),
        }
    }

    let summary = summary.expect("stream ended without a summary");
    assert!(summary.cancelled);
    assert!(summary.instructions < 20000);
    assert_eq!(summary.total_events(), events);
}
