//! Incremental, batch-at-a-time trip emission.
//!
//! A [`TripStream`] owns the sampled population and the built network and
//! produces one [`TripBatch`] per call.  Two ways to consume it:
//!
//! - **pull**: iterate it (`Iterator<Item = TripResult<TripBatch>>`) or call
//!   [`TripStream::next_batch`];
//! - **push**: [`TripStream::run`] drives a [`TripObserver`] to completion.
//!
//! # Termination
//!
//! The stream ends (`None`) when every person has been routed, or at the
//! next batch boundary after its [`CancelToken`] is cancelled.  A provider
//! failure is yielded as a single final `Err`; the stream is fused after it,
//! and batches already yielded remain valid.

use std::iter::FusedIterator;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info, warn};

use ct_core::PersonId;
use ct_spatial::{EdgeWeight, NetworkProvider, RoadNetwork};

use crate::batch::BatchRouter;
use crate::population::Population;
use crate::synthesizer::TripSynthesizer;
use crate::trip::TripBatch;
use crate::TripResult;

// ── CancelToken ───────────────────────────────────────────────────────────────

/// Shared flag that stops a stream at the next batch boundary.
///
/// Clones share the flag, so a consumer on another thread can cancel.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// ── StreamSummary ─────────────────────────────────────────────────────────────

/// Totals over every batch a stream produced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub people:     usize,
    pub batches:    usize,
    pub trips:      usize,
    /// Legs that produced no trip (no path, or origin == destination node).
    pub route_gaps: usize,
    /// Stopped early by a [`CancelToken`].
    pub cancelled:  bool,
    /// Stopped early by a provider error.
    pub aborted:    bool,
}

// ── TripObserver ──────────────────────────────────────────────────────────────

/// Callbacks invoked by [`TripStream::run`].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl TripObserver for Progress {
///     fn on_batch(&mut self, batch: &TripBatch) {
///         println!("batch {}: {} trips", batch.index, batch.len());
///     }
/// }
/// ```
pub trait TripObserver {
    /// Called once per batch, in emission order.
    fn on_batch(&mut self, _batch: &TripBatch) {}

    /// Called once after the last batch, also when the stream was cancelled
    /// or aborted.
    fn on_stream_end(&mut self, _summary: &StreamSummary) {}
}

/// A [`TripObserver`] that does nothing.
pub struct NoopObserver;

impl TripObserver for NoopObserver {}

// ── TripStream ────────────────────────────────────────────────────────────────

pub struct TripStream<P: NetworkProvider> {
    provider:   P,
    network:    RoadNetwork,
    population: Population,
    weight:     EdgeWeight,
    legs:       usize,
    batch_size: usize,
    next_start: usize,
    cancel:     CancelToken,
    finished:   bool,
    summary:    StreamSummary,
}

impl<P: NetworkProvider> TripStream<P> {
    /// Stream over `population`, routing `legs` (1 or 2) legs per person.
    pub fn new(
        provider:   P,
        network:    RoadNetwork,
        population: Population,
        weight:     EdgeWeight,
        legs:       usize,
        batch_size: usize,
    ) -> Self {
        let people = population.len();
        Self {
            provider,
            network,
            population,
            weight,
            legs: legs.clamp(1, 2),
            batch_size: batch_size.max(1),
            next_start: 0,
            cancel: CancelToken::new(),
            finished: false,
            summary: StreamSummary { people, ..StreamSummary::default() },
        }
    }

    /// Replace the stream's cancel token with a shared one.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels this stream.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    /// Totals so far.
    pub fn summary(&self) -> StreamSummary {
        self.summary
    }

    /// Number of batches a complete run produces.
    pub fn batch_count(&self) -> usize {
        self.population.len().div_ceil(self.batch_size)
    }

    /// Route, synthesize and sort the next batch.
    pub fn next_batch(&mut self) -> Option<TripResult<TripBatch>> {
        if self.finished {
            return None;
        }
        if self.next_start >= self.population.len() {
            self.finished = true;
            return None;
        }
        if self.cancel.is_cancelled() {
            info!(
                "trip stream cancelled after {} of {} batches",
                self.summary.batches,
                self.batch_count()
            );
            self.finished = true;
            self.summary.cancelled = true;
            return None;
        }

        let start = self.next_start;
        let people = start..(start + self.batch_size).min(self.population.len());
        self.next_start = people.end;

        match self.process(people) {
            Ok(batch) => {
                self.summary.batches += 1;
                self.summary.trips += batch.trips.len();
                self.summary.route_gaps += batch.route_gaps;
                Some(Ok(batch))
            }
            Err(e) => {
                warn!("trip stream aborted at batch {}: {e}", self.summary.batches);
                self.finished = true;
                self.summary.aborted = true;
                Some(Err(e))
            }
        }
    }

    /// Drain the stream into `observer`.
    ///
    /// Returns the summary, or the provider error that ended the stream.
    /// `on_stream_end` is called in both cases.
    pub fn run<O: TripObserver>(mut self, observer: &mut O) -> TripResult<StreamSummary> {
        while let Some(next) = self.next_batch() {
            match next {
                Ok(batch) => observer.on_batch(&batch),
                Err(e) => {
                    observer.on_stream_end(&self.summary);
                    return Err(e);
                }
            }
        }
        observer.on_stream_end(&self.summary);
        info!(
            "trip stream finished: {} trips in {} batches, {} route gaps",
            self.summary.trips, self.summary.batches, self.summary.route_gaps
        );
        Ok(self.summary)
    }

    fn process(&self, people: std::ops::Range<usize>) -> TripResult<TripBatch> {
        let t0 = Instant::now();
        let index = self.summary.batches;

        let router = BatchRouter::new(&self.provider, &self.network, self.weight, self.legs);
        let routed = router.route_batch(&self.population, people.clone())?;

        let synth = TripSynthesizer::new(&self.provider, &self.network);
        let mut trips = Vec::with_capacity(people.len() * routed.legs.len());
        let mut route_gaps = 0;
        for (direction, routes) in &routed.legs {
            for (offset, route) in routes.iter().enumerate() {
                let person = self.population.person(PersonId((people.start + offset) as u32));
                let (_, _, start_time) = person.leg(*direction);
                match synth.synthesize(person.person_id, route, start_time, *direction) {
                    Some(trip) => trips.push(trip),
                    None => route_gaps += 1,
                }
            }
        }
        trips.sort_by_key(|t| (t.person_id, t.start_time));

        debug!(
            "batch {index} (people {}..{}): {} trips, {route_gaps} gaps in {:.2?}",
            people.start,
            people.end,
            trips.len(),
            t0.elapsed()
        );

        Ok(TripBatch { index, people, trips, route_gaps })
    }
}

impl<P: NetworkProvider> Iterator for TripStream<P> {
    type Item = TripResult<TripBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch()
    }
}

impl<P: NetworkProvider> FusedIterator for TripStream<P> {}
