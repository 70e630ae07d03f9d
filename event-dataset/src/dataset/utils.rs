use super::*;
use crate::{
    common::*,
    report::{default_reporter, Reporter},
};

/// The recovery policy for records whose image file does not exist.
///
/// A missing file at index `i` is reported and substituted by the record at
/// `(i + 1) mod len`, repeatedly, for at most `max_skips` times. It defaults
/// to `len - 1` skips, so that every record is tried once. Larger limits are
/// clamped to `len - 1`.
#[derive(Debug, Clone)]
pub struct WrapAroundSkip {
    max_skips: Option<usize>,
    reporter: Arc<dyn Reporter>,
}

impl Default for WrapAroundSkip {
    fn default() -> Self {
        Self {
            max_skips: None,
            reporter: default_reporter(),
        }
    }
}

impl WrapAroundSkip {
    pub fn new(max_skips: Option<usize>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            max_skips,
            reporter,
        }
    }

    pub fn with_max_skips(self, max_skips: impl Into<Option<usize>>) -> Self {
        Self {
            max_skips: max_skips.into(),
            ..self
        }
    }

    pub fn with_reporter(self, reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter, ..self }
    }

    /// Find the first record starting from `index` whose image file exists.
    ///
    /// It returns the index of the found record and its resolved path.
    pub fn find<D>(&self, dataset: &D, index: usize) -> Result<(usize, PathBuf)>
    where
        D: FileDataset + ?Sized,
    {
        let num_records = dataset.num_records();
        ensure!(index < num_records, "invalid index {}", index);
        // each record is visited at most once
        let max_skips = self
            .max_skips
            .map_or(num_records - 1, |max_skips| max_skips.min(num_records - 1));

        for skips in 0..=max_skips {
            let current = (index + skips) % num_records;
            let path = dataset
                .image_path(current)
                .ok_or_else(|| format_err!("invalid index {}", current))?;

            if path.is_file() {
                return Ok((current, path));
            }
            self.reporter.missing_file(current, &path);
        }

        bail!(
            "no image file is found after trying {} records starting from index {}",
            max_skips + 1,
            index
        );
    }
}

/// Load a list of paths from a text file, one path per line.
///
/// Blank lines and lines starting with `#` are ignored. Relative paths
/// are resolved against the directory of the list file.
pub fn load_path_list_file(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let file = File::open(path)
        .with_context(|| format!("failed to open path list file '{}'", path.display()))?;

    let paths: Vec<_> = BufReader::new(file)
        .lines()
        .filter_map(|line| {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    let err = Error::from(err).context(format!(
                        "failed to read path list file '{}'",
                        path.display()
                    ));
                    return Some(Err(err));
                }
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            Some(Ok(base_dir.join(line)))
        })
        .try_collect()?;

    Ok(paths)
}
