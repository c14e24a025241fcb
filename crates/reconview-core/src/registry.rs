//! Registry of named reconstruction datasets.

use std::sync::Arc;

use crate::dataset::PointCloudDataset;
use crate::error::{Result, ViewerError};
use crate::model::{GAUSSIAN_SPLATTING, NERF};

/// Holds the datasets of every reconstruction model and tracks which one is
/// active.
///
/// The active model, when set, is always a registered key.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    /// Datasets in insertion order; keys are unique.
    datasets: Vec<Arc<PointCloudDataset>>,
    active: Option<String>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every dataset and re-applies the selection policy.
    ///
    /// A later dataset with the same model name replaces an earlier one.
    /// Returns the newly active model, if any.
    pub fn set_datasets<I>(&mut self, datasets: I) -> Option<&str>
    where
        I: IntoIterator<Item = PointCloudDataset>,
    {
        self.datasets.clear();
        for dataset in datasets {
            let dataset = Arc::new(dataset);
            match self
                .datasets
                .iter_mut()
                .find(|d| d.model_name() == dataset.model_name())
            {
                Some(slot) => *slot = dataset,
                None => self.datasets.push(dataset),
            }
        }
        self.active = self.preferred_model().map(str::to_string);
        self.active.as_deref()
    }

    /// Removes every dataset.
    pub fn clear(&mut self) {
        self.datasets.clear();
        self.active = None;
    }

    /// Makes `key` the active model.
    ///
    /// Fails with [`ViewerError::InvalidSelection`] when `key` is not
    /// registered, leaving the current selection unchanged.
    pub fn select_model(&mut self, key: &str) -> Result<()> {
        if !self.contains(key) {
            return Err(ViewerError::InvalidSelection(key.to_string()));
        }
        self.active = Some(key.to_string());
        Ok(())
    }

    /// Returns the active model name.
    #[must_use]
    pub fn active_model(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Returns the active dataset.
    #[must_use]
    pub fn active_dataset(&self) -> Option<&Arc<PointCloudDataset>> {
        self.active.as_deref().and_then(|key| self.get(key))
    }

    /// Returns the dataset registered under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<PointCloudDataset>> {
        self.datasets.iter().find(|d| d.model_name() == key)
    }

    /// Checks whether `key` is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the registered model names in insertion order.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(|d| d.model_name())
    }

    /// Returns the number of registered datasets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Returns true if no dataset is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    fn preferred_model(&self) -> Option<&str> {
        [GAUSSIAN_SPLATTING, NERF]
            .into_iter()
            .find(|key| self.contains(key))
            .or_else(|| self.datasets.first().map(|d| d.model_name()))
    }
}
