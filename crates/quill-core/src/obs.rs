//! Event sink boundary.
//!
//! Builder code never logs directly. Every accepted or rejected call is
//! reported as a `QueryEvent` through `record`, which forwards to the
//! scoped override if one is installed and to `TracingSink` otherwise.

#[cfg(test)]
mod tests;

use crate::{
    error::{Call, ErrorKind},
    query::{BoolOp, Operator},
};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = const { RefCell::new(None) };
}

///
/// QueryEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryEvent<'a> {
    PredicateAdded {
        handle: &'a str,
        path: &'a str,
        operator: Operator,
        bool_op: BoolOp,
        negated: bool,
    },
    GroupAdded {
        handle: &'a str,
        parts: usize,
        bool_op: BoolOp,
        negated: bool,
    },
    Rejected {
        handle: &'a str,
        call: Call,
        kind: ErrorKind,
    },
    Compiled {
        handle: &'a str,
        predicates: usize,
        order_by: usize,
        populate: usize,
        pluck: Option<usize>,
        limit: Option<u64>,
        skip: Option<u64>,
    },
}

impl QueryEvent<'_> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PredicateAdded { .. } => "predicate_added",
            Self::GroupAdded { .. } => "group_added",
            Self::Rejected { .. } => "rejected",
            Self::Compiled { .. } => "compiled",
        }
    }
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: &QueryEvent<'_>);
}

///
/// TracingSink
/// default sink, emits `tracing` debug events
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &QueryEvent<'_>) {
        match *event {
            QueryEvent::PredicateAdded {
                handle,
                path,
                operator,
                bool_op,
                negated,
            } => tracing::debug!(
                schema = handle,
                path,
                %operator,
                combinator = %bool_op,
                negated,
                "predicate added"
            ),
            QueryEvent::GroupAdded {
                handle,
                parts,
                bool_op,
                negated,
            } => tracing::debug!(
                schema = handle,
                parts,
                combinator = %bool_op,
                negated,
                "predicate group added"
            ),
            QueryEvent::Rejected { handle, call, kind } => tracing::debug!(
                schema = handle,
                %call,
                %kind,
                "builder call rejected"
            ),
            QueryEvent::Compiled {
                handle,
                predicates,
                order_by,
                populate,
                pluck,
                limit,
                skip,
            } => tracing::debug!(
                schema = handle,
                predicates,
                order_by,
                populate,
                ?pluck,
                ?limit,
                ?skip,
                "query compiled"
            ),
        }
    }
}

pub(crate) fn record(event: &QueryEvent<'_>) {
    // clone out of the slot so a sink may itself install an override
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => TracingSink.record(event),
    }
}

/// Run a closure with a temporary event sink override on this thread.
pub fn with_event_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn EventSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
