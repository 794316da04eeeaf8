//! Catalog commands
//!
//! - `validate` - Compile a manifest and report invalid resources
//! - `deps` - Resolve autorequire edges against the manifest's working set
//! - `diff` - Compare declared services with observed device state
//! - `describe` - Print the resource type's documentation

use anyhow::{Context as AnyhowContext, Result, bail};
use declarative::{ResourceDiff, ResourceRef, ResourceType, compute_dependencies};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::Context;
use crate::catalog::{CompiledCatalog, compile};
use crate::engine;
use crate::resource::AaaAuthorizationLoginExecSvc;
use crate::schema::Manifest;
use crate::ui;

/// Dependency edges of one resource, for JSON output
#[derive(Debug, Serialize)]
struct DependencyReport {
    resource: ResourceRef,
    requires: BTreeSet<ResourceRef>,
}

// ============================================================================
// Loading
// ============================================================================

fn load_catalog(path: Option<&str>) -> Result<(PathBuf, CompiledCatalog)> {
    let path = Manifest::resolve_path(path)?;
    let manifest = Manifest::load(&path)?;
    Ok((path, compile(&manifest)))
}

/// Fail if any resource was excluded from the catalog
fn ensure_valid(path: &Path, catalog: &CompiledCatalog) -> Result<()> {
    if catalog.is_valid() {
        return Ok(());
    }
    for error in &catalog.errors {
        ui::error(&error.to_string());
    }
    bail!(
        "{} resource(s) in {} failed to compile",
        catalog.errors.len(),
        path.display()
    );
}

// ============================================================================
// Validate Command
// ============================================================================

pub fn validate(ctx: &Context, manifest: Option<&str>) -> Result<()> {
    let (path, catalog) = load_catalog(manifest)?;

    if !ctx.quiet {
        ui::header("Validate");
        ui::kv("manifest", &path.display().to_string());
    }

    if ctx.verbose > 0 {
        for resource in catalog.working_set.iter() {
            ui::dim(&resource.to_string());
        }
    }

    ensure_valid(&path, &catalog)?;

    if !ctx.quiet {
        ui::success(&format!(
            "{} resources compiled ({} exec login services)",
            catalog.working_set.len(),
            catalog.services.len()
        ));
    }
    Ok(())
}

// ============================================================================
// Deps Command
// ============================================================================

pub fn deps(ctx: &Context, manifest: Option<&str>, json: bool) -> Result<()> {
    let (path, catalog) = load_catalog(manifest)?;
    ensure_valid(&path, &catalog)?;

    let reports: Vec<DependencyReport> = catalog
        .services
        .iter()
        .map(|svc| DependencyReport {
            resource: svc.to_ref(),
            requires: compute_dependencies(svc, &catalog.working_set),
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&reports).context("Failed to serialize edges")?;
        println!("{out}");
        return Ok(());
    }

    if !ctx.quiet {
        ui::header("Dependencies");
    }
    if reports.is_empty() {
        ui::info("No exec login services declared");
        return Ok(());
    }
    for report in &reports {
        engine::display_dependencies(&report.resource, &report.requires);
    }
    Ok(())
}

// ============================================================================
// Diff Command
// ============================================================================

pub fn diff(ctx: &Context, manifest: Option<&str>, observed: &str, json: bool) -> Result<()> {
    let (path, desired) = load_catalog(manifest)?;
    ensure_valid(&path, &desired)?;

    let observed_path = Manifest::resolve_path(Some(observed))?;
    let observed_manifest = Manifest::load(&observed_path)?;
    let current = compile(&observed_manifest);
    if !current.is_valid() {
        ui::warn("Observed state contains invalid resources; they are treated as absent");
        for error in &current.errors {
            ui::dim(&error.to_string());
        }
    }

    let diffs: Vec<ResourceDiff> = desired
        .services
        .iter()
        .filter_map(|svc| ResourceDiff::between(svc, current.service(svc.name())))
        .collect();

    log::info!(
        "{} of {} services out of sync",
        diffs.len(),
        desired.services.len()
    );

    if json {
        let out = serde_json::to_string_pretty(&diffs).context("Failed to serialize diffs")?;
        println!("{out}");
        return Ok(());
    }

    if !ctx.quiet {
        ui::header("Diff");
        ui::kv("declared", &path.display().to_string());
        ui::kv("observed", &observed_path.display().to_string());
    }
    engine::display_diff(&diffs);
    Ok(())
}

// ============================================================================
// Describe Command
// ============================================================================

pub fn describe() -> Result<()> {
    type Svc = AaaAuthorizationLoginExecSvc;

    ui::header(Svc::TYPE_NAME);
    println!("{}", Svc::DOC);

    ui::section("Type");
    ui::kv("namevar", Svc::NAMEVAR);
    ui::kv("apply to", Svc::apply_to().as_str());
    ui::kv("ensurable", &Svc::ensurable().to_string());
    for pattern in Svc::title_patterns() {
        let attributes: Vec<&str> = pattern.attributes().collect();
        ui::kv("title pattern", &format!("{} → {}", pattern.pattern(), attributes.join(", ")));
    }

    ui::section("Attributes");
    for attribute in Svc::attributes() {
        ui::kv(attribute.name, &format!("{:?}", attribute.kind));
        ui::dim(attribute.doc);
    }
    Ok(())
}
