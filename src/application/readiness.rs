//! Deferred component loading with a readiness query.
//!
//! A [`ReadinessGate`] starts a load task at boot and answers, without
//! blocking, whether the component is loading, ready or failed.

use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Externally visible load state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessState {
    Loading,
    Ready,
    Failed,
}

/// Why a component is not available yet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotReady {
    #[error("still loading")]
    Loading,

    #[error("load failed: {0}")]
    Failed(String),
}

enum Stage<T> {
    Loading,
    Ready(Arc<T>),
    Failed(String),
}

/// Handle to a component that becomes available once its load task finishes.
pub struct ReadinessGate<T> {
    stage: watch::Receiver<Stage<T>>,
}

impl<T> Clone for ReadinessGate<T> {
    fn clone(&self) -> Self {
        Self {
            stage: self.stage.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> ReadinessGate<T> {
    /// Spawns `load` on the runtime and returns a gate that tracks it.
    pub fn spawn<F, E>(name: &'static str, load: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: fmt::Display,
    {
        let (tx, rx) = watch::channel(Stage::Loading);

        tokio::spawn(async move {
            tracing::info!(component = name, "Loading component");
            let stage = match load.await {
                Ok(value) => {
                    tracing::info!(component = name, "Component ready");
                    Stage::Ready(Arc::new(value))
                }
                Err(e) => {
                    tracing::error!(component = name, error = %e, "Component failed to load");
                    Stage::Failed(e.to_string())
                }
            };
            let _ = tx.send(stage);
        });

        Self { stage: rx }
    }

    /// A gate that is ready from the start.
    pub fn ready(value: T) -> Self {
        let (_tx, rx) = watch::channel(Stage::Ready(Arc::new(value)));
        Self { stage: rx }
    }

    /// Current load state.
    pub fn state(&self) -> ReadinessState {
        match &*self.stage.borrow() {
            Stage::Loading => ReadinessState::Loading,
            Stage::Ready(_) => ReadinessState::Ready,
            Stage::Failed(_) => ReadinessState::Failed,
        }
    }

    /// The loaded component, or why it is unavailable.
    pub fn get(&self) -> Result<Arc<T>, NotReady> {
        Self::resolve(&self.stage.borrow())
    }

    /// Waits until loading has finished either way.
    pub async fn wait(&self) -> Result<Arc<T>, NotReady> {
        let mut stage = self.stage.clone();
        let resolved = match stage.wait_for(|s| !matches!(s, Stage::Loading)).await {
            Ok(current) => Self::resolve(&current),
            Err(_) => Err(NotReady::Failed("load task ended without a result".to_string())),
        };
        resolved
    }

    fn resolve(stage: &Stage<T>) -> Result<Arc<T>, NotReady> {
        match stage {
            Stage::Loading => Err(NotReady::Loading),
            Stage::Ready(value) => Ok(Arc::clone(value)),
            Stage::Failed(reason) => Err(NotReady::Failed(reason.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn reports_loading_until_task_finishes() {
        let (release, released) = oneshot::channel::<()>();
        let gate = ReadinessGate::spawn("test", async move {
            let _ = released.await;
            Ok::<_, String>(42)
        });

        assert_eq!(gate.state(), ReadinessState::Loading);
        assert_eq!(gate.get().err(), Some(NotReady::Loading));

        release.send(()).unwrap();
        assert_eq!(*gate.wait().await.unwrap(), 42);
        assert_eq!(gate.state(), ReadinessState::Ready);
        assert_eq!(*gate.get().unwrap(), 42);
    }

    #[tokio::test]
    async fn failed_load_is_reported() {
        let gate: ReadinessGate<u32> =
            ReadinessGate::spawn("test", async { Err::<u32, _>("model missing") });

        let result = gate.wait().await;
        assert_eq!(result.err(), Some(NotReady::Failed("model missing".to_string())));
        assert_eq!(gate.state(), ReadinessState::Failed);
    }

    #[tokio::test]
    async fn wait_on_ready_gate_returns_value() {
        let gate = ReadinessGate::ready(7u8);
        assert_eq!(*gate.wait().await.unwrap(), 7);
        assert_eq!(*gate.clone().wait().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn ready_gate_is_immediately_available() {
        let gate = ReadinessGate::ready("loaded");
        assert_eq!(gate.state(), ReadinessState::Ready);
        assert_eq!(*gate.get().unwrap(), "loaded");
    }

    #[tokio::test(start_paused = true)]
    async fn clones_observe_the_same_load() {
        let gate = ReadinessGate::spawn("test", async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<_, String>("done")
        });
        let observer = gate.clone();

        assert_eq!(*observer.wait().await.unwrap(), "done");
        assert_eq!(gate.state(), ReadinessState::Ready);
    }

    #[test]
    fn state_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ReadinessState::Loading).unwrap(), "\"loading\"");
    }
}
