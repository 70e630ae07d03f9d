use crate::common::*;

pub use dataset::*;
pub use output::*;

pub static CONFIG_VERSION: Lazy<VersionReq> = Lazy::new(|| VersionReq::parse("0.1.0").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_version")]
    pub version: Version,
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }
}

mod dataset {
    use super::*;

    /// Dataset options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct DatasetConfig {
        /// The maximum number of records skipped over when image files are
        /// missing. Every record is tried once if not set.
        #[serde(default)]
        pub max_skips: Option<usize>,
        /// The dataset configuration.
        pub kind: DatasetKind,
    }

    /// Variants of dataset and options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(tag = "type")]
    pub enum DatasetKind {
        /// Labeled images listed in a JSON Lines manifest.
        Manifest {
            image_dir: PathBuf,
            manifest_file: PathBuf,
        },
        /// Explicit list of image files.
        PathList { paths: Vec<PathBuf> },
        /// Text file listing one image file per line.
        PathListFile { list_file: PathBuf },
        /// Image files matching a glob pattern.
        Glob { pattern: String },
        /// Serialized uint8 tensor in `[frames, height, width]` or
        /// `[frames, height, width, channels]` shape.
        Frames { tensor_file: PathBuf },
    }
}

mod output {
    use super::*;

    /// Output options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct OutputConfig {
        /// The device where the stacked images are placed.
        #[serde(with = "tch_serde::serde_device")]
        pub device: Device,
        /// The number of concurrent loading workers. It defaults to the number of CPUs.
        #[serde(default)]
        pub num_workers: Option<NonZeroUsize>,
        /// The file to save stacked `[samples, 3, height, width]` images.
        #[serde(default)]
        pub tensor_file: Option<PathBuf>,
        /// The JSON file to save per-sample metadata.
        #[serde(default)]
        pub metadata_file: Option<PathBuf>,
    }
}

pub fn deserialize_version<'de, D>(deserializer: D) -> Result<Version, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let version = Version::parse(&text).map_err(|err| {
        D::Error::custom(format!(
            "failed to parse version number '{}': {:?}",
            text, err
        ))
    })?;

    if !CONFIG_VERSION.matches(&version) {
        return Err(D::Error::custom(format!(
            "incompatible version: get '{}', but it is incompatible with requirement '{}'",
            version, &*CONFIG_VERSION,
        )));
    }

    Ok(version)
}
