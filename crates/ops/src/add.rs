//! The add operation: download from the index, save into storage

use crate::{AddReport, AddedPackage, OpsCtx};
use pyndex_errors::{Error, OpsError};
use pyndex_fetch::Workspace;
use pyndex_types::Requirement;
use tracing::{debug, info};

/// Download each labelled requirement and ingest it under `owner`
///
/// Each label gets its own scoped workspace, deleted when the label is
/// done regardless of outcome. A distribution-not-found failure is
/// translated into an operation error carrying the original message;
/// every other failure propagates unmodified.
///
/// # Errors
///
/// Returns an error on the first label that fails; earlier labels stay
/// ingested.
pub async fn add(ctx: &OpsCtx, labels: &[String], owner: &str) -> Result<AddReport, Error> {
    if labels.is_empty() {
        return Err(OpsError::NoPackagesSpecified.into());
    }

    let mut packages = Vec::with_capacity(labels.len());
    for label in labels {
        packages.push(add_one(ctx, label, owner).await?);
    }

    Ok(AddReport { packages })
}

async fn add_one(ctx: &OpsCtx, label: &str, owner: &str) -> Result<AddedPackage, Error> {
    let requirement = Requirement::parse(label)?;
    let workspace = Workspace::create()?;
    debug!(workspace = %workspace.path().display(), %requirement, "starting add");

    let result = async {
        let fetched =
            pyndex_fetch::fetch_requirement(&ctx.net, &ctx.finder, &requirement, &workspace)
                .await?;
        let stored = ctx.store.ingest(&fetched.path, owner).await?;
        Ok::<_, Error>(AddedPackage {
            name: stored.metadata.name.clone(),
            version: stored.metadata.version.clone(),
            filename: stored.metadata.filename.clone(),
            sha256: stored.metadata.sha256.clone(),
            size: stored.metadata.size,
            owner: stored.metadata.owner.clone(),
        })
    }
    .await;

    // Workspace removal happens here on both paths
    drop(workspace);

    match result {
        Ok(added) => {
            info!(name = %added.name, version = %added.version, "added package");
            Ok(added)
        }
        Err(e) if e.is_distribution_not_found() => Err(OpsError::OperationFailed {
            message: e.to_string(),
        }
        .into()),
        Err(e) => Err(e),
    }
}
