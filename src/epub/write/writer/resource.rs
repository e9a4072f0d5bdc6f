use crate::epub::consts::layout;
use crate::epub::errors::EpubError;
use crate::epub::resource::MediaCategory;
use crate::epub::write::writer::EpubWriter;
use crate::util::uri;
use crate::writer::WriterResult;

impl EpubWriter<'_> {
    /// Retrieves and stages every registered resource,
    /// recording the media type detected for each.
    ///
    /// Category folders are only created when the category has resources.
    pub(super) fn write_resources(&mut self) -> WriterResult<()> {
        let state = self.ctx.state;
        let grabber = self.ctx.config.grabber.as_ref();

        for category in MediaCategory::ALL {
            let resources = state.resources.resources(category);
            if resources.is_empty() {
                continue;
            }

            let directory = uri::join(layout::CONTENT_DIR, category.folder());
            self.stage.create_dir(&directory)?;

            for resource in resources {
                let media = grabber
                    .fetch(&resource.source, &resource.filename)
                    .map_err(|error| EpubError::file_retrieval(&resource.source, error))?;

                tracing::debug!(
                    %category,
                    filename = %resource.filename,
                    media_type = %media.media_type,
                    bytes = media.data.len(),
                    "staged resource",
                );
                self.stage
                    .write_file(&uri::join(&directory, &resource.filename), &media.data)?;
                self.media_types
                    .insert((category, resource.filename.clone()), media.media_type);
            }
        }
        Ok(())
    }
}
