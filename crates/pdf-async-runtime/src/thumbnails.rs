//! Background page thumbnails
//!
//! Thumbnails are rendered one page at a time on a blocking thread and
//! delivered in page order as they become ready.

use image::RgbImage;
use image::imageops::{self, FilterType};
use pdf_nup::{NupError, RenderBackend, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One message from a [`ThumbnailTask`]
#[derive(Debug)]
pub enum ThumbnailUpdate {
    /// A page was rendered, or failed on its own; later pages still follow
    Page {
        index: usize,
        result: Result<RgbImage>,
    },
    /// The backend or the document could not be opened; nothing follows
    OpenFailed(NupError),
}

/// A running thumbnail job.
///
/// Dropping the task cancels it.
pub struct ThumbnailTask {
    receiver: mpsc::UnboundedReceiver<ThumbnailUpdate>,
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl ThumbnailTask {
    /// Next finished thumbnail, or `None` once every page was delivered, the
    /// document failed to open, or the task was cancelled
    pub async fn next(&mut self) -> Option<ThumbnailUpdate> {
        self.receiver.recv().await
    }

    /// Stop rendering after the page in progress
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ThumbnailTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start rendering thumbnails for `page_count` pages of `path`.
///
/// Pages are rendered at `dpi` and scaled down to at most `max_width`
/// pixels wide. A page that fails to render is reported in its slot and
/// the task moves on; failing to open the document is reported once as
/// [`ThumbnailUpdate::OpenFailed`] and ends the task.
pub fn spawn_thumbnails<B, F>(
    path: PathBuf,
    page_count: usize,
    dpi: u32,
    max_width: u32,
    make_backend: F,
) -> ThumbnailTask
where
    B: RenderBackend,
    F: FnOnce() -> Result<B> + Send + 'static,
{
    let (tx, receiver) = mpsc::unbounded_channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();

    let handle = tokio::task::spawn_blocking(move || {
        let backend = match make_backend() {
            Ok(backend) => backend,
            Err(e) => {
                let _ = tx.send(ThumbnailUpdate::OpenFailed(e));
                return;
            }
        };
        let renderer = match backend.open(&path) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Could not open {} for thumbnails: {}", path.display(), e);
                let _ = tx.send(ThumbnailUpdate::OpenFailed(e));
                return;
            }
        };

        for page_index in 0..page_count {
            if flag.load(Ordering::SeqCst) {
                log::debug!("Thumbnail rendering cancelled at page {}", page_index + 1);
                return;
            }

            let result = renderer
                .render(page_index, dpi)
                .map(|image| downscale(image, max_width));
            if let Err(e) = &result {
                log::warn!("Thumbnail for page {} failed: {}", page_index + 1, e);
            }

            // Receiver gone: nobody is waiting for the rest
            let update = ThumbnailUpdate::Page {
                index: page_index,
                result,
            };
            if tx.send(update).is_err() {
                return;
            }
        }
    });

    ThumbnailTask {
        receiver,
        cancel,
        handle,
    }
}

fn downscale(image: RgbImage, max_width: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if width <= max_width || max_width == 0 {
        return image;
    }
    let scaled_height = (height as u64 * max_width as u64 / width as u64).max(1) as u32;
    imageops::resize(&image, max_width, scaled_height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_downscale_keeps_aspect() {
        let image = RgbImage::from_pixel(400, 600, Rgb([1, 2, 3]));
        assert_eq!(downscale(image, 80).dimensions(), (80, 120));
    }

    #[test]
    fn test_small_images_are_untouched() {
        let image = RgbImage::from_pixel(50, 70, Rgb([1, 2, 3]));
        assert_eq!(downscale(image, 80).dimensions(), (50, 70));
    }
}
