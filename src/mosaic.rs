//! Homepage mosaic animator.
//!
//! Each column cycles an active image on a fixed interval, independently of
//! the others, with staggered entrance delays and start offsets for the
//! domino effect. Once started the animation runs for the life of the
//! process; there is no stop path, matching the page-lifetime scope of the
//! original effect.

use crate::dom::Element;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Interval between image changes within a column.
pub const CYCLE_INTERVAL: Duration = Duration::from_millis(4000);

/// One-time per-column start offset for the staggered effect.
pub const COLUMN_STAGGER: Duration = Duration::from_millis(1333);

/// One mosaic column and its cycling state.
#[derive(Debug, Clone)]
pub struct MosaicColumn {
    index: usize,
    images: Vec<String>,
    active: usize,
}

impl MosaicColumn {
    pub fn active(&self) -> usize {
        self.active
    }

    /// Advance the active image by cyclic index.
    pub fn advance(&mut self) {
        self.active = (self.active + 1) % self.images.len();
    }

    /// Entrance-animation delay, proportional to the column index.
    pub fn entrance_delay_secs(&self) -> f64 {
        0.1 * (self.index + 1) as f64
    }

    /// Delay before this column's interval starts.
    pub fn start_offset(&self) -> Duration {
        COLUMN_STAGGER * self.index as u32
    }

    fn build(&self) -> Element {
        let mut column = Element::new("div")
            .with_class("mosaic-column")
            .with_class("mosaic-entrance-animation")
            .with_attr(
                "style",
                format!("animation-delay: {:.1}s", self.entrance_delay_secs()),
            );

        for (image_index, url) in self.images.iter().enumerate() {
            // Stagger images within the column for the domino effect.
            let mut img = Element::new("img")
                .with_attr("src", url)
                .with_attr(
                    "style",
                    format!("transition-delay: {:.1}s", 0.1 * image_index as f64),
                );
            if image_index == self.active {
                img.add_class("active");
            }
            column.push(img);
        }
        column
    }

    /// Move the active marker on this column's element.
    fn apply_to(&self, mosaic: &mut Element) {
        let Some(column) = mosaic.child_elements_mut().nth(self.index) else {
            return;
        };
        for (image_index, img) in column.child_elements_mut().enumerate() {
            img.toggle_class("active", image_index == self.active);
        }
    }
}

/// The whole mosaic: columns of image references, each cycling on its own
/// schedule.
#[derive(Debug, Clone)]
pub struct MosaicAnimator {
    columns: Vec<MosaicColumn>,
}

impl MosaicAnimator {
    /// Columns without images are dropped; image 0 is active in each kept
    /// column.
    pub fn new(columns: Vec<Vec<String>>) -> Self {
        let columns = columns
            .into_iter()
            .filter(|images| !images.is_empty())
            .enumerate()
            .map(|(index, images)| MosaicColumn {
                index,
                images,
                active: 0,
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[MosaicColumn] {
        &self.columns
    }

    /// Build the mosaic subtree in its initial state.
    pub fn build(&self) -> Element {
        let mut mosaic = Element::new("div").with_class("mosaic");
        for column in &self.columns {
            mosaic.push(column.build());
        }
        mosaic
    }

    /// Start one cycling task per column against a shared mosaic subtree.
    ///
    /// The tasks never complete; the returned handles exist so a caller can
    /// observe them, not to stop them. This is a resource that is never
    /// released — acceptable for a page-lifetime effect, a leak anywhere
    /// long-lived.
    pub fn spawn(self, tree: Arc<Mutex<Element>>) -> Vec<JoinHandle<()>> {
        info!("Starting mosaic animation for {} columns", self.columns.len());
        self.columns
            .into_iter()
            .map(|mut column| {
                let tree = Arc::clone(&tree);
                tokio::spawn(async move {
                    tokio::time::sleep(column.start_offset()).await;
                    let mut ticker = tokio::time::interval(CYCLE_INTERVAL);
                    ticker.tick().await; // the first tick fires immediately
                    loop {
                        ticker.tick().await;
                        column.advance();
                        let mut mosaic = tree.lock().expect("mosaic tree lock poisoned");
                        column.apply_to(&mut mosaic);
                        debug!(
                            "Mosaic column {} advanced to image {}",
                            column.index, column.active
                        );
                    }
                })
            })
            .collect()
    }
}
