pub use anyhow::{Context as _, Error, Result};
pub use event_dataset::{
    dataset::{
        DynDataset, FrameDataset, GenericDataset, ManifestDataset, PathListDataset,
        RandomAccessStream, Sample, StreamingDataset, UniformDataset,
    },
    processor::TransformConfig,
    report::{default_reporter, CountingReporter, Reporter},
};
pub use futures::stream::TryStreamExt as _;
pub use itertools::Itertools as _;
pub use log::{info, warn};
pub use once_cell::sync::Lazy;
pub use semver::{Version, VersionReq};
pub use serde::{de::Error as DeserializeError, Deserialize, Deserializer, Serialize};
pub use std::{
    collections::BTreeMap,
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Arc,
};
pub use tch::{Device, Tensor};
