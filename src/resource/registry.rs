//! Scanner Registry
//!
//! Lookup table from resource-type tag to the scanner that discovers it.

use super::ml::{SageMakerNotebookScanner, SageMakerTrainingJobScanner};
use super::scanner::ResourceScanner;
use std::collections::BTreeMap;
use std::sync::OnceLock;

type Registry = BTreeMap<&'static str, Box<dyn ResourceScanner>>;

/// Global registry, built on first access
static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn all_scanners() -> Vec<Box<dyn ResourceScanner>> {
    vec![
        Box::new(SageMakerNotebookScanner),
        Box::new(SageMakerTrainingJobScanner),
    ]
}

/// Get the scanner registry
pub fn get_registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        all_scanners()
            .into_iter()
            .map(|scanner| (scanner.resource_type(), scanner))
            .collect()
    })
}

/// Get a scanner by resource-type tag
pub fn get_scanner(resource_type: &str) -> Option<&'static dyn ResourceScanner> {
    get_registry().get(resource_type).map(|s| s.as_ref())
}

/// Get all resource-type tags (sorted)
pub fn get_all_resource_types() -> Vec<&'static str> {
    get_registry().keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::model::{SAGEMAKER_NOTEBOOK_INSTANCE, SAGEMAKER_TRAINING_JOB};

    #[test]
    fn test_registry_loads_successfully() {
        assert!(!get_registry().is_empty(), "Registry should have scanners");
    }

    #[test]
    fn test_scanners_keyed_by_their_own_type() {
        for resource_type in get_all_resource_types() {
            let scanner = get_scanner(resource_type).unwrap();
            assert_eq!(scanner.resource_type(), resource_type);
        }
    }

    #[test]
    fn test_ml_scanners_exist() {
        let types = get_all_resource_types();
        assert!(types.contains(&SAGEMAKER_NOTEBOOK_INSTANCE));
        assert!(types.contains(&SAGEMAKER_TRAINING_JOB));
        assert_eq!(
            get_scanner(SAGEMAKER_TRAINING_JOB).unwrap().display_name(),
            "Sagemaker Training Job"
        );
    }

    #[test]
    fn test_unknown_scanner() {
        assert!(get_scanner("aws_instance").is_none());
    }
}
