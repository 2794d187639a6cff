//! Pipeline orchestration: run once, then watch forever.

use crate::debounce::Debouncer;
use crate::error::PipelineError;
use crate::retention::LogRetention;
use crate::sequence::{RunRecord, RunSequence};
use crate::watcher::{TargetEvent, TargetWatcher};
use kitwatch_common_log::spans::pipeline_span;
use kitwatch_common_core::{DEFAULT_DEBOUNCE_MS, DEFAULT_EXCERPT_LINES};
use kitwatch_evidence::{EvidenceLogger, Ledger};
use kitwatch_runner::RunCommand;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Mutex};
use tracing::{debug, error, info, warn, Instrument};

/// Default quiet window before a change triggers a run.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_MS);

pub use kitwatch_common_core::DEFAULT_LOGS_DIR;

/// Settings for one watched target.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub target: PathBuf,
    pub command: RunCommand,
    pub ledger: PathBuf,
    pub label: String,
    pub logs_dir: PathBuf,
    pub debounce: Duration,
    pub excerpt_lines: usize,
    /// Hold a per-target lock around each run so runs never overlap.
    pub serialize_runs: bool,
    /// Print the banner and every appended row to stdout.
    pub echo: bool,
}

impl PipelineConfig {
    pub fn new(
        target: impl Into<PathBuf>,
        command: RunCommand,
        ledger: impl Into<PathBuf>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            command,
            ledger: ledger.into(),
            label: label.into(),
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            debounce: DEFAULT_DEBOUNCE,
            excerpt_lines: DEFAULT_EXCERPT_LINES,
            serialize_runs: true,
            echo: true,
        }
    }

    pub fn with_logs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = dir.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_excerpt_lines(mut self, lines: usize) -> Self {
        self.excerpt_lines = lines;
        self
    }

    pub fn with_serialize_runs(mut self, serialize: bool) -> Self {
        self.serialize_runs = serialize;
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.target.as_os_str().is_empty() {
            return Err(PipelineError::InvalidConfig("file must not be empty".into()));
        }
        if self.ledger.as_os_str().is_empty() {
            return Err(PipelineError::InvalidConfig("log must not be empty".into()));
        }
        if self.label.trim().is_empty() {
            return Err(PipelineError::InvalidConfig("label must not be empty".into()));
        }
        if self.debounce.is_zero() {
            return Err(PipelineError::InvalidConfig(
                "debounce must be greater than zero".into(),
            ));
        }
        if self.excerpt_lines == 0 {
            return Err(PipelineError::InvalidConfig(
                "excerpt lines must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Lifecycle of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Not yet subscribed to changes.
    Idle,
    /// Subscribed; changes trigger runs.
    Watching,
}

/// One watched target bound to a command and a ledger.
///
/// Cloning is cheap and clones share the run lock and state.
#[derive(Clone)]
pub struct Pipeline {
    inner: Arc<Inner>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.inner.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

struct Inner {
    config: PipelineConfig,
    sequence: RunSequence,
    run_lock: Mutex<()>,
    state: watch::Sender<PipelineState>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;

        let evidence = EvidenceLogger::new(Ledger::new(&config.ledger))
            .with_excerpt_lines(config.excerpt_lines)
            .with_echo(config.echo);
        let sequence = RunSequence::new(
            config.command.clone(),
            config.label.clone(),
            LogRetention::new(&config.logs_dir),
            evidence,
        );
        let (state, _) = watch::channel(PipelineState::Idle);

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                sequence,
                run_lock: Mutex::new(()),
                state,
            }),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.inner.config
    }

    pub fn target(&self) -> &Path {
        &self.inner.config.target
    }

    pub fn state(&self) -> PipelineState {
        *self.inner.state.borrow()
    }

    /// Receiver that observes state transitions.
    pub fn subscribe_state(&self) -> watch::Receiver<PipelineState> {
        self.inner.state.subscribe()
    }

    /// Execute the run→log→append sequence once.
    pub async fn run_once(&self) -> Result<RunRecord, PipelineError> {
        self.guarded_run(false).await
    }

    /// Run once, subscribe to the target, then run again after every
    /// settled burst of changes.
    ///
    /// Only returns on failure: a watcher error, the target disappearing or
    /// the ledger becoming unwritable. A failing command is recorded and the
    /// loop continues.
    pub async fn watch(&self) -> Result<(), PipelineError> {
        let target = self.target().to_path_buf();
        if !target.exists() {
            return Err(PipelineError::TargetMissing(target));
        }

        self.run_once().await?;

        let mut watcher = TargetWatcher::new(&target)?;
        self.inner.state.send_replace(PipelineState::Watching);
        info!(label = %self.config().label, target = %target.display(), "watching");
        if self.config().echo {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "watching {}", target.display())?;
            stdout.flush()?;
        }

        let result = self.watch_loop(&mut watcher).await;
        self.inner.state.send_replace(PipelineState::Idle);
        result
    }

    async fn watch_loop(&self, watcher: &mut TargetWatcher) -> Result<(), PipelineError> {
        let (failures_tx, mut failures) = mpsc::channel::<PipelineError>(1);
        let pipeline = self.clone();
        let mut debouncer = Debouncer::new(self.config().debounce, move || {
            let pipeline = pipeline.clone();
            let failures_tx = failures_tx.clone();
            async move {
                if let Err(e) = pipeline.guarded_run(true).await {
                    error!(error = %e, "pipeline run failed");
                    let _ = failures_tx.send(e).await;
                }
            }
        });

        loop {
            tokio::select! {
                event = watcher.next_event() => match event {
                    Some(TargetEvent::Changed) => {
                        debug!("change detected");
                        debouncer.trigger();
                    }
                    Some(TargetEvent::Removed) => {
                        debug!("target removed or renamed");
                        debouncer.trigger();
                    }
                    Some(TargetEvent::Failed(message)) => {
                        return Err(PipelineError::Watch {
                            path: self.target().to_path_buf(),
                            message,
                        });
                    }
                    None => {
                        return Err(PipelineError::Watch {
                            path: self.target().to_path_buf(),
                            message: "notification stream closed".into(),
                        });
                    }
                },
                Some(err) = failures.recv() => return Err(err),
            }
        }
    }

    /// Run under the pipeline's lock (when serialising). With
    /// `require_target`, a target that has vanished by the time the lock is
    /// held ends the pipeline instead of running.
    async fn guarded_run(&self, require_target: bool) -> Result<RunRecord, PipelineError> {
        let config = &self.inner.config;
        let _guard = if config.serialize_runs {
            Some(self.inner.run_lock.lock().await)
        } else {
            None
        };

        if require_target && !kitwatch_common_fs::exists(&config.target).await {
            warn!(target = %config.target.display(), "watched file is gone");
            return Err(PipelineError::TargetRemoved(config.target.clone()));
        }

        self.inner
            .sequence
            .execute()
            .instrument(pipeline_span(&config.label, &config.target))
            .await
    }
}

/// Watch several pipelines concurrently. Returns the first failure.
pub async fn watch_all(pipelines: &[Pipeline]) -> Result<(), PipelineError> {
    futures::future::try_join_all(pipelines.iter().map(|p| p.watch())).await?;
    Ok(())
}
