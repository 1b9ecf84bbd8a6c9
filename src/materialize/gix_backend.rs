use std::num::NonZeroU32;
use std::sync::atomic::AtomicBool;

use gix::remote::fetch::Shallow;

use super::{Materializer, Narrowing, NarrowingOutcome, WorkingCopy};
use crate::error::{Result, WsAuditError};

/// Clones with gix at depth 1 and checks out the main worktree.
///
/// gix cannot restrict a checkout to a path subset, so narrowing requests are
/// reported as [`NarrowingOutcome::Unsupported`].
#[derive(Debug, Default)]
pub struct GixMaterializer {
    should_interrupt: AtomicBool,
}

impl GixMaterializer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            should_interrupt: AtomicBool::new(false),
        }
    }
}

impl Materializer for GixMaterializer {
    fn materialize(&self, clone_url: &str, narrowing: Option<&Narrowing>) -> Result<WorkingCopy> {
        let mut copy = WorkingCopy::create()?;
        log::info!("Shallow cloning repository: {clone_url}");

        let mut prepare = gix::prepare_clone(clone_url, copy.root())
            .map_err(|e| WsAuditError::clone_failed(clone_url, e))?
            .with_shallow(Shallow::DepthAtRemote(NonZeroU32::MIN));

        let (mut checkout, _) = prepare
            .fetch_then_checkout(gix::progress::Discard, &self.should_interrupt)
            .map_err(|e| WsAuditError::clone_failed(clone_url, e))?;

        checkout
            .main_worktree(gix::progress::Discard, &self.should_interrupt)
            .map_err(|e| WsAuditError::clone_failed(clone_url, e))?;

        if narrowing.is_some() {
            log::debug!("Narrowing not supported by gix backend for {clone_url}");
            copy.set_narrowing(NarrowingOutcome::Unsupported);
        }

        log::info!("Repository shallow cloned to {}", copy.root().display());
        Ok(copy)
    }
}
