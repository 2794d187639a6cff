use crate::error::PipelineError;
use notify::event::{AccessKind, AccessMode, ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Change notifications for one watched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetEvent {
    /// The file was written, created or renamed into place.
    Changed,
    /// The file was deleted or renamed away. It may come back (editors that
    /// save by rename do this), so this is only a hint.
    Removed,
    /// The notification backend reported an error.
    Failed(String),
}

/// Watches a single file.
///
/// The parent directory is watched non-recursively and events are filtered
/// by file name, so a file replaced by rename keeps being observed.
pub struct TargetWatcher {
    _watcher: notify::RecommendedWatcher,
    receiver: mpsc::Receiver<TargetEvent>,
    target: PathBuf,
}

impl TargetWatcher {
    pub fn new(target: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let target = target.into();
        if !target.exists() {
            return Err(PipelineError::TargetMissing(target));
        }
        let name = target
            .file_name()
            .map(OsStr::to_os_string)
            .ok_or_else(|| PipelineError::TargetMissing(target.clone()))?;
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, rx) = mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let event = match res {
                Ok(event) => Self::classify_event(&event, &name),
                Err(e) => Some(TargetEvent::Failed(e.to_string())),
            };
            if let Some(event) = event {
                let _ = tx.blocking_send(event);
            }
        })
        .map_err(|source| PipelineError::Subscribe {
            path: target.clone(),
            source,
        })?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|source| PipelineError::Subscribe {
                path: target.clone(),
                source,
            })?;
        debug!(target = %target.display(), dir = %dir.display(), "subscribed to changes");

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            target,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    fn classify_event(event: &Event, name: &OsString) -> Option<TargetEvent> {
        let is_target = |path: &PathBuf| path.file_name() == Some(name.as_os_str());
        trace!(kind = ?event.kind, paths = ?event.paths, "raw event");

        match &event.kind {
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                if event.paths.get(1).is_some_and(|p| is_target(p)) {
                    Some(TargetEvent::Changed)
                } else if event.paths.first().is_some_and(|p| is_target(p)) {
                    Some(TargetEvent::Removed)
                } else {
                    None
                }
            }
            _ if !event.paths.iter().any(|p| is_target(p)) => None,
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) | EventKind::Remove(_) => {
                Some(TargetEvent::Removed)
            }
            EventKind::Create(_) | EventKind::Modify(_) => Some(TargetEvent::Changed),
            EventKind::Access(AccessKind::Close(AccessMode::Write)) => Some(TargetEvent::Changed),
            _ => None,
        }
    }

    /// Next event, or `None` once the backend has shut down.
    pub async fn next_event(&mut self) -> Option<TargetEvent> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind};
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::time::timeout;

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        let mut event = Event::new(kind);
        for p in paths {
            event = event.add_path(PathBuf::from(p));
        }
        event
    }

    fn classify(kind: EventKind, paths: &[&str]) -> Option<TargetEvent> {
        TargetWatcher::classify_event(&event(kind, paths), &OsString::from("target.txt"))
    }

    #[test]
    fn test_classify_writes_and_removals() {
        assert_eq!(
            classify(EventKind::Modify(ModifyKind::Data(DataChange::Any)), &["/k/target.txt"]),
            Some(TargetEvent::Changed)
        );
        assert_eq!(
            classify(EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any)), &["/k/target.txt"]),
            Some(TargetEvent::Changed)
        );
        assert_eq!(
            classify(EventKind::Create(CreateKind::File), &["/k/target.txt"]),
            Some(TargetEvent::Changed)
        );
        assert_eq!(
            classify(EventKind::Remove(RemoveKind::File), &["/k/target.txt"]),
            Some(TargetEvent::Removed)
        );
        assert_eq!(
            classify(EventKind::Modify(ModifyKind::Name(RenameMode::From)), &["/k/target.txt"]),
            Some(TargetEvent::Removed)
        );
    }

    #[test]
    fn test_classify_rename_over_target() {
        assert_eq!(
            classify(
                EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
                &["/k/.target.txt.swp", "/k/target.txt"]
            ),
            Some(TargetEvent::Changed)
        );
        assert_eq!(
            classify(
                EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
                &["/k/target.txt", "/k/target.bak"]
            ),
            Some(TargetEvent::Removed)
        );
    }

    #[test]
    fn test_classify_ignores_siblings_and_reads() {
        assert_eq!(
            classify(EventKind::Modify(ModifyKind::Data(DataChange::Any)), &["/k/other.txt"]),
            None
        );
        assert_eq!(
            classify(EventKind::Access(AccessKind::Read), &["/k/target.txt"]),
            None
        );
        assert_eq!(
            classify(
                EventKind::Access(AccessKind::Close(AccessMode::Write)),
                &["/k/target.txt"]
            ),
            Some(TargetEvent::Changed)
        );
    }

    #[test]
    fn test_missing_target_is_rejected() {
        let temp = TempDir::new().unwrap();
        let result = TargetWatcher::new(temp.path().join("nope.txt"));
        assert!(matches!(result, Err(PipelineError::TargetMissing(_))));
    }

    #[tokio::test]
    async fn test_watcher_reports_write_and_removal() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target.txt");
        std::fs::write(&target, "v1").unwrap();
        let mut watcher = TargetWatcher::new(&target).unwrap();

        std::fs::write(temp.path().join("sibling.txt"), "noise").unwrap();
        std::fs::write(&target, "v2").unwrap();

        let first = timeout(Duration::from_secs(5), watcher.next_event())
            .await
            .unwrap();
        assert_eq!(first, Some(TargetEvent::Changed));

        std::fs::remove_file(&target).unwrap();
        let removed = timeout(Duration::from_secs(5), async {
            while let Some(event) = watcher.next_event().await {
                if event == TargetEvent::Removed {
                    return true;
                }
            }
            false
        })
        .await
        .unwrap();
        assert!(removed);
    }
}
