// not every test binary uses every helper
#![allow(dead_code)]

use std::sync::Once;

use atomseq::Sequence;

static TRACING: Once = Once::new();

/// Route library events to the test harness output. Set `RUST_LOG` to see
/// them, e.g. `RUST_LOG=atomseq=trace`.
pub(crate) fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

pub(crate) fn strict(items: &[i32]) -> Sequence<i32> {
    Sequence::from(items)
}

pub(crate) fn lazy(items: &[i32]) -> Sequence<i32> {
    Sequence::lazy(items.to_vec())
}

/// Half lazy, half strict, so the result is a concat whenever both halves
/// have elements.
pub(crate) fn mixed(items: &[i32]) -> Sequence<i32> {
    let (head, tail) = items.split_at(items.len() / 2);
    lazy(head).concat(&strict(tail))
}
