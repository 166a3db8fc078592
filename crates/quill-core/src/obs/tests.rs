use super::*;

#[derive(Default)]
struct RecordingSink {
    names: RefCell<Vec<&'static str>>,
}

impl EventSink for RecordingSink {
    fn record(&self, event: &QueryEvent<'_>) {
        self.names.borrow_mut().push(event.name());
    }
}

fn rejected() -> QueryEvent<'static> {
    QueryEvent::Rejected {
        handle: "user",
        call: Call::Where,
        kind: ErrorKind::Value,
    }
}

#[test]
fn override_receives_events() {
    let sink = Rc::new(RecordingSink::default());

    with_event_sink(sink.clone(), || {
        record(&rejected());
        record(&QueryEvent::GroupAdded {
            handle: "user",
            parts: 2,
            bool_op: BoolOp::Or,
            negated: false,
        });
    });

    assert_eq!(*sink.names.borrow(), vec!["rejected", "group_added"]);
}

#[test]
fn override_is_removed_after_scope() {
    let sink = Rc::new(RecordingSink::default());

    with_event_sink(sink.clone(), || record(&rejected()));
    record(&rejected());

    assert_eq!(sink.names.borrow().len(), 1);
    assert!(SINK_OVERRIDE.with(|cell| cell.borrow().is_none()));
}

#[test]
fn nested_overrides_restore_outer_sink() {
    let outer = Rc::new(RecordingSink::default());
    let inner = Rc::new(RecordingSink::default());

    with_event_sink(outer.clone(), || {
        with_event_sink(inner.clone(), || record(&rejected()));
        record(&rejected());
    });

    assert_eq!(outer.names.borrow().len(), 1);
    assert_eq!(inner.names.borrow().len(), 1);
}

#[test]
fn guard_restores_on_panic() {
    let sink = Rc::new(RecordingSink::default());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        with_event_sink(sink.clone(), || panic!("boom"));
    }));

    assert!(result.is_err());
    assert!(SINK_OVERRIDE.with(|cell| cell.borrow().is_none()));
}

#[test]
fn tracing_sink_accepts_every_event() {
    let events = [
        QueryEvent::PredicateAdded {
            handle: "user",
            path: "name",
            operator: Operator::Eq,
            bool_op: BoolOp::And,
            negated: true,
        },
        rejected(),
        QueryEvent::Compiled {
            handle: "user",
            predicates: 1,
            order_by: 0,
            populate: 0,
            pluck: None,
            limit: Some(10),
            skip: None,
        },
    ];

    for event in &events {
        TracingSink.record(event);
    }
}
