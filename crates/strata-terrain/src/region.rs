//! Background region sampling with a configurable thread pool.
//!
//! Offloads column sampling to worker threads, supports cancellation, and
//! delivers completed regions via bounded channels. Workers share the
//! engine's caches, so a region sampled concurrently is bit-identical to the
//! same region sampled inline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use dashmap::DashMap;

use crate::{ColumnSample, TerrainEngine};

/// Columns per region edge.
pub const REGION_SIZE: i64 = 16;

/// Address of one 16x16 column region, in region units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionCoord {
    /// Region x (world x divided by [`REGION_SIZE`]).
    pub x: i64,
    /// Region z (world z divided by [`REGION_SIZE`]).
    pub z: i64,
}

impl RegionCoord {
    /// World coordinate of the region's low corner.
    pub fn base(&self) -> (i64, i64) {
        (self.x * REGION_SIZE, self.z * REGION_SIZE)
    }
}

/// A request to sample a single region.
#[derive(Clone, Debug)]
pub struct RegionTask {
    /// The region to sample.
    pub region: RegionCoord,
    /// Priority: lower values first, typically the squared distance from the
    /// viewer so nearby regions land sooner.
    pub priority: u64,
}

/// A fully sampled region ready for the chunk builder.
#[derive(Debug)]
pub struct SampledRegion {
    /// The region address matching the original task.
    pub region: RegionCoord,
    /// Row-major `REGION_SIZE * REGION_SIZE` column samples.
    pub columns: Vec<ColumnSample>,
    /// Sampling time in microseconds, for profiling.
    pub sample_time_us: u64,
}

impl SampledRegion {
    /// The sample for local column `(lx, lz)`.
    pub fn column(&self, lx: usize, lz: usize) -> &ColumnSample {
        &self.columns[lz * REGION_SIZE as usize + lx]
    }
}

/// Internal wrapper carrying the task and its cancellation flag.
struct PrioritizedTask {
    task: RegionTask,
    cancelled: Arc<AtomicBool>,
}

/// Manages background region sampling across a thread pool.
pub struct RegionSampler {
    task_sender: Sender<PrioritizedTask>,
    result_receiver: Receiver<SampledRegion>,
    active_tasks: Arc<DashMap<RegionCoord, Arc<AtomicBool>>>,
    in_flight: Arc<AtomicU64>,
}

impl RegionSampler {
    /// Create a sampler over a shared engine.
    ///
    /// # Arguments
    /// - `thread_count`: worker threads; typically `num_cpus - 2` to leave
    ///   headroom for the caller.
    /// - `max_concurrent`: maximum in-flight tasks; excess submissions are
    ///   rejected back to the caller.
    /// - `result_capacity`: bounded channel capacity for finished regions.
    pub fn new(
        engine: Arc<TerrainEngine>,
        thread_count: usize,
        max_concurrent: usize,
        result_capacity: usize,
    ) -> Self {
        let (task_sender, task_receiver) = bounded::<PrioritizedTask>(max_concurrent * 2);
        let (result_sender, result_receiver) = bounded::<SampledRegion>(result_capacity);
        let in_flight = Arc::new(AtomicU64::new(0));

        for _ in 0..thread_count {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);
            let engine = Arc::clone(&engine);

            std::thread::Builder::new()
                .name("region-sampler".into())
                .spawn(move || {
                    while let Ok(ptask) = receiver.recv() {
                        if ptask.cancelled.load(Ordering::Relaxed) {
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let start = std::time::Instant::now();
                        let columns = sample_region_sync(&engine, ptask.task.region);
                        let elapsed = start.elapsed().as_micros() as u64;

                        if !ptask.cancelled.load(Ordering::Relaxed) {
                            let _ = sender.send(SampledRegion {
                                region: ptask.task.region,
                                columns,
                                sample_time_us: elapsed,
                            });
                        }

                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })
                .expect("failed to spawn region sampler worker thread");
        }

        log::debug!("region sampler started with {thread_count} workers");

        Self {
            task_sender,
            result_receiver,
            active_tasks: Arc::new(DashMap::new()),
            in_flight,
        }
    }

    /// Create a sampler with a thread count based on available CPU cores.
    pub fn with_defaults(engine: Arc<TerrainEngine>) -> Self {
        let cpus = num_cpus::get().max(2);
        let threads = (cpus - 2).max(1);
        Self::new(engine, threads, 64, 128)
    }

    /// Submit a region for background sampling.
    ///
    /// Returns `Ok(())` if queued, or `Err(task)` handing the task back when
    /// the queue is full.
    pub fn submit(&self, task: RegionTask) -> Result<(), RegionTask> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.active_tasks.insert(task.region, Arc::clone(&cancelled));
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        let ptask = PrioritizedTask {
            task: task.clone(),
            cancelled,
        };
        self.task_sender.try_send(ptask).map_err(|e| {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            let region = e.into_inner().task.region;
            self.active_tasks.remove(&region);
            task
        })
    }

    /// Cancel a pending or in-progress task. A task that already finished is
    /// unaffected.
    pub fn cancel(&self, region: &RegionCoord) {
        if let Some((_, cancelled)) = self.active_tasks.remove(region) {
            cancelled.store(true, Ordering::Relaxed);
        }
    }

    /// Drain all finished regions. Call periodically from the owning thread.
    pub fn drain_results(&self) -> Vec<SampledRegion> {
        let mut results = Vec::new();
        while let Ok(region) = self.result_receiver.try_recv() {
            self.active_tasks.remove(&region.region);
            results.push(region);
        }
        results
    }

    /// Number of tasks currently queued or executing.
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Whether a task for the given region is still pending.
    pub fn is_pending(&self, region: &RegionCoord) -> bool {
        self.active_tasks.contains_key(region)
    }
}

/// Sample every column of a region inline. This is the CPU-bound function
/// the worker threads run.
pub fn sample_region_sync(engine: &TerrainEngine, region: RegionCoord) -> Vec<ColumnSample> {
    let (base_x, base_z) = region.base();
    let mut columns = Vec::with_capacity((REGION_SIZE * REGION_SIZE) as usize);
    for lz in 0..REGION_SIZE {
        for lx in 0..REGION_SIZE {
            columns.push(engine.sample_column(base_x + lx, base_z + lz));
        }
    }
    columns
}
