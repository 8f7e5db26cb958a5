use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{self, Either};
use futures::stream::{self, Stream, StreamExt};

/// Emit `initial` to the subscriber before any upstream value.
pub fn start_with<S>(initial: S::Item, upstream: S) -> impl Stream<Item = S::Item>
where
    S: Stream,
{
    stream::once(future::ready(initial)).chain(upstream)
}

/// Running fold where the first emission seeds the accumulator.
///
/// The first upstream value passes through unchanged; every later value
/// is folded into the accumulator with `reduce` and the new accumulator
/// is emitted. This is the shape behind the config cyclers, the loading
/// counter, and every "seed once, then advance" stream in the model.
pub fn fold_first<S, F>(upstream: S, mut reduce: F) -> impl Stream<Item = S::Item>
where
    S: Stream,
    S::Item: Clone,
    F: FnMut(S::Item, S::Item) -> S::Item,
{
    upstream
        .scan(None, move |acc: &mut Option<S::Item>, item| {
            let next = match acc.take() {
                None => item,
                Some(prev) => reduce(prev, item),
            };
            *acc = Some(next.clone());
            future::ready(Some(next))
        })
}

/// Recompute `combine(latest_a, latest_b)` every time either source
/// emits, once both have emitted at least once. Nothing is emitted
/// before that.
pub fn combine_latest<A, B, T, F>(a: A, b: B, mut combine: F) -> impl Stream<Item = T>
where
    A: Stream,
    B: Stream,
    A::Item: Clone,
    B::Item: Clone,
    F: FnMut(&A::Item, &B::Item) -> T,
{
    stream::select(a.map(Either::Left), b.map(Either::Right))
        .scan(
            (None, None),
            move |latest: &mut (Option<A::Item>, Option<B::Item>), item| {
                match item {
                    Either::Left(v) => latest.0 = Some(v),
                    Either::Right(v) => latest.1 = Some(v),
                }
                let out = match (latest.0.as_ref(), latest.1.as_ref()) {
                    (Some(x), Some(y)) => Some(combine(x, y)),
                    _ => None,
                };
                future::ready(Some(out))
            },
        )
        .filter_map(future::ready)
}

/// Emit `combine(value, latest_sampled)` on every `primary` arrival,
/// sampling the most recent `sampled` value. Arrivals on `sampled` never
/// trigger an emission; `primary` values before the first sample are
/// dropped.
pub fn with_latest_from<A, B, T, F>(primary: A, sampled: B, mut combine: F) -> impl Stream<Item = T>
where
    A: Stream,
    B: Stream,
    B::Item: Clone,
    F: FnMut(A::Item, &B::Item) -> T,
{
    stream::select(sampled.map(Either::Right), primary.map(Either::Left))
        .scan(None, move |latest: &mut Option<B::Item>, item| {
            let out = match item {
                Either::Right(v) => {
                    *latest = Some(v);
                    None
                }
                Either::Left(p) => latest.as_ref().map(|s| combine(p, s)),
            };
            future::ready(Some(out))
        })
        .filter_map(future::ready)
}

/// Suppress values equal to the immediately preceding emission.
pub fn distinct_until_changed<S>(upstream: S) -> impl Stream<Item = S::Item>
where
    S: Stream,
    S::Item: Clone + PartialEq,
{
    upstream
        .scan(None, |prev: &mut Option<S::Item>, item| {
            let out = if prev.as_ref() == Some(&item) {
                None
            } else {
                *prev = Some(item.clone());
                Some(item)
            };
            future::ready(Some(out))
        })
        .filter_map(future::ready)
}

/// Flatten a stream of streams in switch-latest mode: each new inner
/// stream supersedes the previous one, and a superseded inner's later
/// emissions are discarded.
pub fn switch_latest<O, S>(outer: O) -> impl Stream<Item = S::Item>
where
    O: Stream<Item = S>,
    S: Stream + Send + 'static,
    S::Item: Send,
{
    let current = Arc::new(AtomicU64::new(0));
    outer
        .map(move |inner| {
            let generation = current.fetch_add(1, Ordering::SeqCst) + 1;
            let live = Arc::clone(&current);
            inner
                .take_while(move |_| future::ready(live.load(Ordering::SeqCst) == generation))
                .boxed()
        })
        .flatten_unordered(None)
}
