//! Handing generated projects to publishers.

use super::{GeneratedProject, GeneratorOptions, ProjectGenerator};
use crate::error::{CodegenError, Result};
use crate::targets::{ProjectType, PublisherType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument};
use uidl_core::ProjectUidl;

/// What a publisher reports back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishOutcome {
    /// Where the project ended up, when the publisher has a location for it.
    pub location: Option<String>,
    pub files_written: usize,
}

/// Delivers a generated project somewhere: an archive, a directory, a
/// repository or a sandbox.
pub trait Publisher: Send + Sync {
    fn publish(&self, project: &GeneratedProject) -> Result<PublishOutcome>;
}

/// Publishers by type.
#[derive(Default)]
pub struct PublisherRegistry {
    publishers: HashMap<PublisherType, Box<dyn Publisher>>,
}

impl PublisherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a publisher, replacing any previous one of the same type.
    pub fn register(&mut self, publisher_type: PublisherType, publisher: impl Publisher + 'static) {
        self.publishers.insert(publisher_type, Box::new(publisher));
    }

    pub fn get(&self, publisher_type: PublisherType) -> Option<&dyn Publisher> {
        self.publishers.get(&publisher_type).map(|publisher| publisher.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackOptions {
    #[serde(default)]
    pub project_type: ProjectType,
    pub publisher: PublisherType,
    #[serde(default)]
    pub generator: GeneratorOptions,
}

/// Generate a project and hand it to the selected publisher.
///
/// The publisher is looked up before anything is generated, so an
/// unregistered publisher fails fast with [`CodegenError::InvalidSelector`].
#[instrument(skip_all, fields(project = %uidl.name, publisher = %options.publisher))]
pub fn pack_project(
    uidl: &ProjectUidl,
    options: &PackOptions,
    registry: &PublisherRegistry,
) -> Result<PublishOutcome> {
    let publisher = registry
        .get(options.publisher)
        .ok_or_else(|| CodegenError::InvalidSelector {
            kind: "publisher type",
            value: options.publisher.to_string(),
        })?;

    let generator = match options.project_type {
        ProjectType::React => ProjectGenerator::new(options.generator.clone())?,
    };
    let project = generator.generate_project(uidl)?;
    let outcome = publisher.publish(&project)?;
    info!(files = outcome.files_written, location = ?outcome.location, "Published project");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use uidl_core::builders::{component, element, static_node};

    #[derive(Default)]
    struct Recorder {
        paths: Mutex<Vec<String>>,
    }

    impl Publisher for &'static Recorder {
        fn publish(&self, project: &GeneratedProject) -> Result<PublishOutcome> {
            let mut paths = self.paths.lock().unwrap();
            paths.extend(project.files.iter().map(|file| file.path.clone()));
            Ok(PublishOutcome {
                location: Some(format!("memory://{}", project.name)),
                files_written: project.files.len(),
            })
        }
    }

    struct Failing;

    impl Publisher for Failing {
        fn publish(&self, _project: &GeneratedProject) -> Result<PublishOutcome> {
            Err(CodegenError::Publish {
                publisher: "disk".into(),
                message: "read-only file system".into(),
            })
        }
    }

    fn project() -> ProjectUidl {
        ProjectUidl {
            name: "site".into(),
            globals: Default::default(),
            root: component("App", element("div", vec![static_node("Hello")])),
            components: Vec::new(),
        }
    }

    fn options(publisher: PublisherType) -> PackOptions {
        PackOptions {
            project_type: ProjectType::React,
            publisher,
            generator: GeneratorOptions::default(),
        }
    }

    #[test]
    fn test_pack_hands_project_to_publisher() {
        let recorder: &'static Recorder = Box::leak(Box::default());
        let mut registry = PublisherRegistry::new();
        registry.register(PublisherType::Zip, recorder);

        let outcome = pack_project(&project(), &options(PublisherType::Zip), &registry).unwrap();
        assert_eq!(outcome.location.as_deref(), Some("memory://site"));
        assert_eq!(outcome.files_written, recorder.paths.lock().unwrap().len());
        assert!(recorder.paths.lock().unwrap().contains(&"package.json".to_string()));
    }

    #[test]
    fn test_unregistered_publisher() {
        let err = pack_project(&project(), &options(PublisherType::Github), &PublisherRegistry::new())
            .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::InvalidSelector { kind: "publisher type", ref value } if value == "github"
        ));
    }

    #[test]
    fn test_publisher_error_propagates() {
        let mut registry = PublisherRegistry::new();
        registry.register(PublisherType::Disk, Failing);
        assert!(matches!(
            pack_project(&project(), &options(PublisherType::Disk), &registry),
            Err(CodegenError::Publish { .. })
        ));
    }
}
