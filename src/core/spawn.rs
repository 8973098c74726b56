//! Task spawning on a tokio `LocalSet`

use std::rc::Rc;

use futures::task::{LocalFutureObj, LocalSpawn, SpawnError};
use tokio::task::LocalSet;

/// Spawns coordinator tasks onto a shared [`LocalSet`]
///
/// Spawning never needs an entered runtime: tasks are queued on the set and
/// run whenever the host drives it, with [`LocalSet::run_until`] or by
/// awaiting the set.
#[derive(Clone, Debug)]
pub struct TokioLocalSpawner {
    local: Rc<LocalSet>,
}

impl TokioLocalSpawner {
    pub fn new(local: Rc<LocalSet>) -> Self {
        Self { local }
    }

    pub fn local_set(&self) -> &LocalSet {
        &self.local
    }
}

impl LocalSpawn for TokioLocalSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        // Dropping the JoinHandle detaches the task
        self.local.spawn_local(future);
        Ok(())
    }
}
