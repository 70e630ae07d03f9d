use crate::{
    common::*,
    config::{Config, DatasetConfig, DatasetKind},
};

/// Build the dataset described by the configuration on a blocking thread.
pub async fn load_dataset(
    config: Arc<Config>,
    reporter: Arc<dyn Reporter>,
) -> Result<Arc<DynDataset>> {
    tokio::task::spawn_blocking(move || build_dataset(&config, reporter)).await?
}

/// Build the dataset described by the configuration.
///
/// Missing image files are sent to `reporter`.
pub fn build_dataset(config: &Config, reporter: Arc<dyn Reporter>) -> Result<Arc<DynDataset>> {
    let Config {
        dataset: DatasetConfig {
            max_skips,
            ref kind,
        },
        ref transform,
        ..
    } = *config;

    let dataset: Arc<DynDataset> = match *kind {
        DatasetKind::Manifest {
            ref image_dir,
            ref manifest_file,
        } => {
            let dataset =
                ManifestDataset::load_with_transform(image_dir, manifest_file, transform.clone())?
                    .with_max_skips(max_skips)
                    .with_reporter(reporter);
            Arc::new(UniformDataset::new(dataset))
        }
        DatasetKind::PathList { ref paths } => {
            let dataset = PathListDataset::with_transform(paths.clone(), transform.clone())?
                .with_max_skips(max_skips)
                .with_reporter(reporter);
            Arc::new(UniformDataset::new(dataset))
        }
        DatasetKind::PathListFile { ref list_file } => {
            let dataset = PathListDataset::from_list_file(list_file)?
                .with_transform_config(transform.clone())?
                .with_max_skips(max_skips)
                .with_reporter(reporter);
            Arc::new(UniformDataset::new(dataset))
        }
        DatasetKind::Glob { ref pattern } => {
            let dataset = PathListDataset::from_glob(pattern)?
                .with_transform_config(transform.clone())?
                .with_max_skips(max_skips)
                .with_reporter(reporter);
            Arc::new(UniformDataset::new(dataset))
        }
        DatasetKind::Frames { ref tensor_file } => {
            let frames = Tensor::load(tensor_file).with_context(|| {
                format!("failed to load frames from '{}'", tensor_file.display())
            })?;
            if max_skips.is_some() {
                warn!("max_skips is ignored by in-memory frames");
            }
            let dataset = FrameDataset::with_transform(frames, transform.clone())?;
            Arc::new(UniformDataset::new(dataset))
        }
    };

    Ok(dataset)
}
