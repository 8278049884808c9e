//! Future returned by async stub calls

use mocktree_core::StubResult;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Already-settled future carrying a stub's outcome
///
/// The call has been recorded by the time the future exists; awaiting it only
/// hands the outcome over.
#[derive(Debug)]
#[must_use = "futures do nothing unless awaited"]
pub struct StubFuture {
    result: Option<StubResult>,
}

impl StubFuture {
    pub(crate) fn settled(result: StubResult) -> Self {
        StubFuture {
            result: Some(result),
        }
    }
}

impl Future for StubFuture {
    type Output = StubResult;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.get_mut().result.take() {
            Some(result) => Poll::Ready(result),
            None => panic!("StubFuture polled after completion"),
        }
    }
}
