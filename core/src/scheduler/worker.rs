use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// One unit of background work, run to completion
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Somewhere to run a drain off the host thread
pub trait BackgroundWorker: Send + Sync {
    fn submit(&self, job: Job);
}

/// Runs jobs on rayon, either the global pool or a dedicated one
#[derive(Clone, Default)]
pub struct RayonWorker {
    pool: Option<Arc<ThreadPool>>,
}

impl RayonWorker {
    pub fn global() -> Self {
        Self { pool: None }
    }

    /// Single named thread so drains never compete with other rayon work
    pub fn dedicated(name: &str) -> Result<Self, ThreadPoolBuildError> {
        let name = name.to_string();
        let pool = ThreadPoolBuilder::new()
            .num_threads(1)
            .thread_name(move |i| format!("{name}-{i}"))
            .build()?;
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }
}

impl BackgroundWorker for RayonWorker {
    fn submit(&self, job: Job) {
        match &self.pool {
            Some(pool) => pool.spawn(job),
            None => rayon::spawn(job),
        }
    }
}

impl std::fmt::Debug for RayonWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RayonWorker")
            .field("dedicated", &self.pool.is_some())
            .finish()
    }
}
