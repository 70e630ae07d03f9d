//! Reporting of recoverable dataset events.
//!
//! Datasets never write to a global logger directly. They hold a shared
//! [Reporter] and notify it about events that do not abort the current
//! call, such as a missing image file that is skipped over.

use crate::common::*;

/// An image file that could not be found and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingFile {
    /// The index of the entry that references the file.
    pub index: usize,
    /// The resolved path of the missing file.
    pub path: PathBuf,
}

/// The receiver of recoverable dataset events.
pub trait Reporter
where
    Self: Debug + Send + Sync,
{
    /// Called when the image file of the entry at `index` does not exist.
    fn missing_file(&self, index: usize, path: &Path);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn missing_file(&self, index: usize, path: &Path) {
        error!(
            "could not find image '{}' of entry {}",
            path.display(),
            index
        );
    }
}

/// Keeps events in memory for later inspection.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    missing: Mutex<Vec<MissingFile>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of the recorded missing files in the order they were reported.
    pub fn missing_files(&self) -> Vec<MissingFile> {
        self.missing
            .lock()
            .map(|missing| missing.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl Reporter for MemoryReporter {
    fn missing_file(&self, index: usize, path: &Path) {
        let event = MissingFile {
            index,
            path: path.to_owned(),
        };
        match self.missing.lock() {
            Ok(mut missing) => missing.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

/// Forwards events to another reporter and counts them.
#[derive(Debug)]
pub struct CountingReporter {
    inner: Arc<dyn Reporter>,
    num_missing: AtomicUsize,
}

impl CountingReporter {
    pub fn new(inner: Arc<dyn Reporter>) -> Self {
        Self {
            inner,
            num_missing: AtomicUsize::new(0),
        }
    }

    /// The number of missing files reported so far.
    pub fn num_missing_files(&self) -> usize {
        self.num_missing.load(Ordering::SeqCst)
    }
}

impl Reporter for CountingReporter {
    fn missing_file(&self, index: usize, path: &Path) {
        self.num_missing.fetch_add(1, Ordering::SeqCst);
        self.inner.missing_file(index, path);
    }
}

/// The reporter used by datasets unless another one is given.
pub fn default_reporter() -> Arc<dyn Reporter> {
    Arc::new(LogReporter)
}
