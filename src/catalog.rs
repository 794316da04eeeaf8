//! Catalog compilation
//!
//! Turns a manifest into validated resource instances plus the working set
//! used for dependency lookups. Only exec login services are built as typed
//! instances; every other declared resource is kept as a plain reference so
//! it can satisfy autorequires.

use crate::resource::AaaAuthorizationLoginExecSvc;
use crate::schema::{Manifest, ResourceDecl};
use declarative::{ResourceRef, ResourceType, WorkingSet, instantiate};
use thiserror::Error;

/// A resource that could not be compiled
#[derive(Debug, Error)]
pub enum CompileError {
    /// Identity or attribute validation failed
    #[error("{resource}: {source}")]
    Invalid {
        resource: ResourceRef,
        #[source]
        source: declarative::Error,
    },

    /// The same resource is declared twice
    #[error("duplicate declaration of {0}")]
    Duplicate(ResourceRef),
}

/// Result of compiling a manifest
#[derive(Debug, Default)]
pub struct CompiledCatalog {
    /// Valid exec login services, in declaration order
    pub services: Vec<AaaAuthorizationLoginExecSvc>,
    /// Every successfully declared resource
    pub working_set: WorkingSet,
    /// Resources excluded from the catalog
    pub errors: Vec<CompileError>,
}

impl CompiledCatalog {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Find a compiled service by name
    pub fn service(&self, name: &str) -> Option<&AaaAuthorizationLoginExecSvc> {
        self.services.iter().find(|svc| svc.name() == name)
    }
}

/// Compile every resource in a manifest
///
/// An invalid resource is excluded and recorded; the rest still compile.
pub fn compile(manifest: &Manifest) -> CompiledCatalog {
    let mut catalog = CompiledCatalog::default();

    for decl in &manifest.resources {
        let declared = ResourceRef::new(&decl.resource_type, &decl.title);

        let resource = if declared.resource_type == AaaAuthorizationLoginExecSvc::TYPE_NAME {
            match build_service(decl) {
                Ok(svc) => {
                    let resource = svc.to_ref();
                    if !catalog.working_set.contains(&resource) {
                        catalog.services.push(svc);
                    }
                    resource
                }
                Err(source) => {
                    catalog.errors.push(CompileError::Invalid {
                        resource: declared,
                        source,
                    });
                    continue;
                }
            }
        } else {
            declared
        };

        if !catalog.working_set.insert(resource.clone()) {
            catalog.errors.push(CompileError::Duplicate(resource));
        }
    }

    log::debug!(
        "Compiled {} resources ({} services, {} errors)",
        catalog.working_set.len(),
        catalog.services.len(),
        catalog.errors.len()
    );
    catalog
}

fn build_service(decl: &ResourceDecl) -> declarative::Result<AaaAuthorizationLoginExecSvc> {
    let attributes = decl.values()?;
    instantiate(&decl.title, &attributes)
}
