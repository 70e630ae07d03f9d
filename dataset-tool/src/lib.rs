//! The dataset inspection and export program.

mod common;
pub mod config;
pub mod input;
pub mod metadata;

use crate::{common::*, config::Config, metadata::SampleMetadata};

/// The entry of the program.
pub async fn start(config: Arc<Config>) -> Result<()> {
    // load dataset
    info!("loading dataset");
    let reporter = Arc::new(CountingReporter::new(default_reporter()));
    let dataset = input::load_dataset(config.clone(), reporter.clone()).await?;
    info!(
        "loaded dataset with {} records, output image shape {:?}",
        dataset.num_records(),
        dataset.transform().output_shape()
    );

    let keep_images = config.output.tensor_file.is_some();
    let device = config.output.device;

    // load and transform every sample
    let (images, metadata) = RandomAccessStream::from_arc(dataset)
        .with_num_workers(config.output.num_workers)
        .stream()?
        .try_fold(
            (vec![], vec![]),
            move |(mut images, mut metadata), (index, sample)| async move {
                let meta = SampleMetadata::new(index, &sample);
                info!("{}", meta);

                if keep_images {
                    images.push(sample.into_image().to_device(device));
                }
                metadata.push(meta);

                Ok::<_, Error>((images, metadata))
            },
        )
        .await?;

    metadata::report_summary(&metadata, reporter.num_missing_files());

    // save outputs
    if let Some(tensor_file) = &config.output.tensor_file {
        if images.is_empty() {
            warn!(
                "the dataset is empty, skip writing '{}'",
                tensor_file.display()
            );
        } else {
            let images = Tensor::stack(&images, 0);
            images.save(tensor_file).with_context(|| {
                format!("failed to save images to '{}'", tensor_file.display())
            })?;
            info!(
                "saved images of shape {:?} to '{}'",
                images.size(),
                tensor_file.display()
            );
        }
    }

    if let Some(metadata_file) = &config.output.metadata_file {
        let text = serde_json::to_string_pretty(&metadata)?;
        tokio::fs::write(metadata_file, text)
            .await
            .with_context(|| format!("failed to write metadata to '{}'", metadata_file.display()))?;
        info!("saved metadata to '{}'", metadata_file.display());
    }

    Ok(())
}
