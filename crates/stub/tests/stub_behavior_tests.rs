//! Behavior queue and history properties of the stub primitive

use mocktree_core::{args, StubError, Value};
use mocktree_stub::{Behavior, CallOutcome, Stub};
use proptest::prelude::*;

// ──────────────────── strategies ────────────────────

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn arb_behavior() -> impl Strategy<Value = Behavior> {
    prop_oneof![
        arb_value().prop_map(Behavior::Return),
        arb_value().prop_map(Behavior::Resolve),
        "[a-z]{1,6}".prop_map(|msg| Behavior::Reject(StubError::new(msg))),
    ]
}

proptest! {
    #[test]
    fn once_behaviors_served_in_order_then_persistent(
        queued in prop::collection::vec(arb_behavior(), 0..8),
        persistent in arb_value(),
    ) {
        let stub = Stub::new();
        stub.return_value(persistent.clone());
        for behavior in &queued {
            stub.configure(behavior.clone(), true);
        }

        for behavior in &queued {
            prop_assert_eq!(stub.call(args![]), behavior.run(&[]));
        }
        prop_assert_eq!(stub.call(args![]), Ok(persistent));
        prop_assert_eq!(stub.times_called(), queued.len() + 1);
    }

    #[test]
    fn history_preserves_invocation_order(all_args in prop::collection::vec(arb_value(), 0..16)) {
        let stub = Stub::named("ordered");
        for arg in &all_args {
            stub.call(vec![arg.clone()]).unwrap();
        }

        let calls = stub.calls();
        prop_assert_eq!(calls.len(), all_args.len());
        for (call, arg) in calls.iter().zip(&all_args) {
            prop_assert_eq!(&call.args, &vec![arg.clone()]);
            prop_assert_eq!(&call.outcome, &CallOutcome::Returned(Value::Null));
        }
    }

    #[test]
    fn returned_times_counts_async_rejections(failures in 0usize..6, async_calls in 0usize..6) {
        let stub = Stub::new();
        stub.rejected_value("sync failure");
        for _ in 0..failures {
            prop_assert!(stub.call(args![]).is_err());
        }
        let async_stub = Stub::new();
        async_stub.rejected_value("async failure");
        for _ in 0..async_calls {
            // Dropped unawaited: the call is recorded when it is made
            drop(async_stub.call_async(args![]));
        }

        prop_assert_eq!(stub.returned_times(), 0);
        prop_assert_eq!(async_stub.returned_times(), async_calls);
        prop_assert_eq!(async_stub.times_called(), async_calls);
    }
}
