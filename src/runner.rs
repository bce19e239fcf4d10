//! Cached projection runner and scenario batches

use rayon::prelude::*;

use crate::cache::ProjectionCache;
use crate::inputs::ProjectInputs;
use crate::projection::{ProjectionEngine, ProjectionOutput};

/// Owns an input snapshot plus the memoization cache
///
/// `run()` fingerprints the inputs as they are at call time, so edits made
/// through `inputs_mut` between runs simply miss the cache and recompute —
/// there is no separate invalidation step to forget.
#[derive(Debug)]
pub struct ProjectionRunner {
    inputs: ProjectInputs,
    cache: ProjectionCache,
}

impl Default for ProjectionRunner {
    fn default() -> Self {
        Self::new(ProjectInputs::demo_project())
    }
}

impl ProjectionRunner {
    pub fn new(inputs: ProjectInputs) -> Self {
        Self {
            inputs,
            cache: ProjectionCache::new(),
        }
    }

    pub fn inputs(&self) -> &ProjectInputs {
        &self.inputs
    }

    /// Mutable access for configuration edits between runs
    pub fn inputs_mut(&mut self) -> &mut ProjectInputs {
        &mut self.inputs
    }

    /// Replace the whole snapshot
    pub fn set_inputs(&mut self, inputs: ProjectInputs) {
        self.inputs = inputs;
    }

    /// Project the current inputs, reusing a cached result when the
    /// snapshot is unchanged
    pub fn run(&mut self) -> ProjectionOutput {
        let fingerprint = self.inputs.fingerprint();

        if let Some(hit) = self.cache.get(fingerprint).cloned() {
            self.cache.record_hit();
            log::debug!("projection cache hit for fingerprint {fingerprint:016x}");
            return hit;
        }

        self.cache.record_miss();
        log::debug!("projection cache miss for fingerprint {fingerprint:016x}, computing");
        let output = ProjectionEngine::new(self.inputs.clone()).run();
        self.cache.insert(fingerprint, output.clone());
        output
    }

    pub fn cache(&self) -> &ProjectionCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Project independent input variants in parallel
    ///
    /// Each variant is a full snapshot and each projection is pure, so the
    /// batch fans out safely; the shared cache is not consulted.
    pub fn run_scenarios(&self, variants: &[ProjectInputs]) -> Vec<ProjectionOutput> {
        variants
            .par_iter()
            .map(|variant| ProjectionEngine::new(variant.clone()).run())
            .collect()
    }
}
