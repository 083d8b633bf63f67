//! Worker pools for independent bootstrap replications.
//!
//! The two pools draw random numbers differently:
//! - [`SerialPool`] seeds one stream once and consumes it replicate after
//!   replicate, in order.
//! - [`RayonPool`] gives replicate `i` its own stream seeded with
//!   [`counter_rng_seed`]`(seed, i)`, so results do not depend on the number
//!   of workers or on scheduling.
//!
//! Each pool is reproducible for a fixed seed, but the same seed does not
//! give the same replicates across the two pools.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::warn;

use crate::constants::MIN_PARALLEL_WORKERS;
use crate::error::{Error, Result};
use crate::result::{Advisory, ExecutionMode};
#[cfg(feature = "parallel")]
use crate::statistics::counter_rng_seed;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Random stream handed to each task.
pub type TaskRng = Xoshiro256PlusPlus;

/// Runs `tasks` independent jobs and gathers their results in task order.
pub trait WorkerPool {
    /// How this pool executes.
    fn mode(&self) -> ExecutionMode;

    /// Run `task(i, rng)` for `i` in `0..tasks`.
    ///
    /// Stops at the first error; no partial results are returned.
    fn try_map_independent<T, E, F>(
        &self,
        seed: u64,
        tasks: usize,
        task: F,
    ) -> core::result::Result<Vec<T>, E>
    where
        T: Send,
        E: Send,
        F: Fn(usize, &mut TaskRng) -> core::result::Result<T, E> + Sync + Send;
}

// ============================================================================
// Serial
// ============================================================================

/// Single-threaded pool with one random stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialPool;

impl WorkerPool for SerialPool {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Serial
    }

    fn try_map_independent<T, E, F>(
        &self,
        seed: u64,
        tasks: usize,
        task: F,
    ) -> core::result::Result<Vec<T>, E>
    where
        T: Send,
        E: Send,
        F: Fn(usize, &mut TaskRng) -> core::result::Result<T, E> + Sync + Send,
    {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        (0..tasks).map(|i| task(i, &mut rng)).collect()
    }
}

// ============================================================================
// Parallel
// ============================================================================

/// Fixed-size rayon thread pool with one counter-seeded stream per task.
#[cfg(feature = "parallel")]
#[derive(Debug)]
pub struct RayonPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

#[cfg(feature = "parallel")]
impl RayonPool {
    /// Build a pool with `workers` threads.
    pub fn new(workers: usize) -> Result<Self> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("ipwpath-boot-{}", i))
            .build()
            .map_err(|e| Error::WorkerPool {
                message: e.to_string(),
            })?;
        Ok(Self { pool, workers })
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }
}

#[cfg(feature = "parallel")]
impl WorkerPool for RayonPool {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel {
            workers: self.workers,
        }
    }

    fn try_map_independent<T, E, F>(
        &self,
        seed: u64,
        tasks: usize,
        task: F,
    ) -> core::result::Result<Vec<T>, E>
    where
        T: Send,
        E: Send,
        F: Fn(usize, &mut TaskRng) -> core::result::Result<T, E> + Sync + Send,
    {
        self.pool.install(|| {
            (0..tasks)
                .into_par_iter()
                .map(|i| {
                    let mut rng = Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
                    task(i, &mut rng)
                })
                .collect()
        })
    }
}

// ============================================================================
// Selection
// ============================================================================

/// The pool chosen for a bootstrap run.
#[derive(Debug)]
pub enum Executor {
    /// Serial execution.
    Serial(SerialPool),
    /// Parallel execution on a rayon pool.
    #[cfg(feature = "parallel")]
    Parallel(RayonPool),
}

impl Executor {
    /// Choose a pool for the requested execution mode.
    ///
    /// Parallel execution without the `parallel` feature is fatal. A parallel
    /// request with fewer than two workers runs serially and records an
    /// [`Advisory::DegradedToSerial`].
    pub fn select(parallel: bool, workers: usize, advisories: &mut Vec<Advisory>) -> Result<Self> {
        if !parallel {
            return Ok(Executor::Serial(SerialPool));
        }

        if !cfg!(feature = "parallel") {
            return Err(Error::ParallelUnavailable);
        }

        let workers = workers.max(1);
        if workers < MIN_PARALLEL_WORKERS {
            let advisory = Advisory::DegradedToSerial {
                requested_workers: workers,
            };
            warn!("{}", advisory);
            advisories.push(advisory);
            return Ok(Executor::Serial(SerialPool));
        }

        Self::parallel(workers)
    }

    #[cfg(feature = "parallel")]
    fn parallel(workers: usize) -> Result<Self> {
        let pool = RayonPool::new(workers)?;
        tracing::debug!(workers = pool.workers(), "using parallel bootstrap pool");
        Ok(Executor::Parallel(pool))
    }

    #[cfg(not(feature = "parallel"))]
    fn parallel(_workers: usize) -> Result<Self> {
        Err(Error::ParallelUnavailable)
    }
}

impl WorkerPool for Executor {
    fn mode(&self) -> ExecutionMode {
        match self {
            Executor::Serial(pool) => pool.mode(),
            #[cfg(feature = "parallel")]
            Executor::Parallel(pool) => pool.mode(),
        }
    }

    fn try_map_independent<T, E, F>(
        &self,
        seed: u64,
        tasks: usize,
        task: F,
    ) -> core::result::Result<Vec<T>, E>
    where
        T: Send,
        E: Send,
        F: Fn(usize, &mut TaskRng) -> core::result::Result<T, E> + Sync + Send,
    {
        match self {
            Executor::Serial(pool) => pool.try_map_independent(seed, tasks, task),
            #[cfg(feature = "parallel")]
            Executor::Parallel(pool) => pool.try_map_independent(seed, tasks, task),
        }
    }
}
