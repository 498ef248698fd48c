use crate::config::{AppConfig, ConfigManager};
use crate::engines::features::FeatureExtractor;
use crate::engines::feedback::{
    CandidateRegistry, FeedbackAck, FeedbackLog, FeedbackLoop, FeedbackSubmission,
};
use crate::engines::optimisation::{BanditOptimizer, DiversityReranker};
use crate::engines::scanning::{PamPattern, SiteScanner};
use crate::engines::scoring::{GuideScorer, HeuristicScorer, DEFAULT_COVERAGE};
use crate::error::{DesignError, Result};
use crate::types::{candidate_id, Guide, Sequence};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRequest {
    pub gene_id: String,
    pub sequence: String,
    #[serde(default)]
    pub region_start: usize,
    #[serde(default)]
    pub region_end: Option<usize>,
    /// Per-locus coverage term; loci not listed use `DEFAULT_COVERAGE`
    #[serde(default)]
    pub coverage: HashMap<usize, f64>,
    /// Overrides `limits.final_top_k` for this request
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl DesignRequest {
    pub fn new(gene_id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            gene_id: gene_id.into(),
            sequence: sequence.into(),
            region_start: 0,
            region_end: None,
            coverage: HashMap::new(),
            top_k: None,
        }
    }

    pub fn with_region(mut self, start: usize, end: Option<usize>) -> Self {
        self.region_start = start;
        self.region_end = end;
        self
    }

    pub fn with_coverage(mut self, locus: usize, coverage: f64) -> Self {
        self.coverage.insert(locus, coverage);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRegion {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResponse {
    pub gene_id: String,
    pub region: DesignRegion,
    /// PAM sites found in the region, before any cap or selection
    pub total_sites: usize,
    pub guides: Vec<Guide>,
}

/// Runs the scan → features → score → select → rerank pipeline and routes
/// feedback back into the shared bandit.
pub struct DesignService {
    config: ConfigManager,
    extractor: FeatureExtractor,
    scorer: Box<dyn GuideScorer>,
    optimizer: Arc<BanditOptimizer>,
    reranker: DiversityReranker,
    registry: Arc<CandidateRegistry>,
    feedback: FeedbackLoop,
}

impl DesignService {
    pub fn new(config: ConfigManager, log: Box<dyn FeedbackLog>) -> Result<Self> {
        Self::with_scorer(config, log, Box::new(HeuristicScorer))
    }

    pub fn with_scorer(
        config: ConfigManager,
        log: Box<dyn FeedbackLog>,
        scorer: Box<dyn GuideScorer>,
    ) -> Result<Self> {
        let snapshot = config.get();
        snapshot.validate()?;

        let optimizer = Arc::new(BanditOptimizer::new(snapshot.rl_params, snapshot.seed)?);
        let registry = Arc::new(CandidateRegistry::new());
        let feedback = FeedbackLoop::new(Arc::clone(&registry), Arc::clone(&optimizer), log);

        Ok(Self {
            config,
            extractor: FeatureExtractor::new(),
            scorer,
            optimizer,
            reranker: DiversityReranker::new(),
            registry,
            feedback,
        })
    }

    pub fn config(&self) -> AppConfig {
        self.config.get()
    }

    /// Apply `f` to the configuration. The optimizer picks up the new
    /// exploration parameters and seed in the same commit, so a design sees
    /// either the old settings throughout or the new ones throughout.
    pub fn update_config<F>(&self, f: F) -> Result<AppConfig>
    where
        F: FnOnce(&mut AppConfig),
    {
        let updated = self.config.update_with(f, |config| {
            self.optimizer.reconfigure(config.rl_params, config.seed)
        })?;
        log::info!(
            "Configuration updated (pam={}, guide_length={}, epsilon={}, learning_rate={})",
            updated.pam_sequence,
            updated.guide_length,
            updated.rl_params.epsilon,
            updated.rl_params.learning_rate
        );
        Ok(updated)
    }

    pub fn optimizer(&self) -> &BanditOptimizer {
        &self.optimizer
    }

    pub fn registry(&self) -> &CandidateRegistry {
        &self.registry
    }

    pub fn feedback_log(&self) -> &dyn FeedbackLog {
        self.feedback.log()
    }

    pub fn design(&self, request: &DesignRequest) -> Result<DesignResponse> {
        self.config.read(|config| self.run(config, request))
    }

    fn run(&self, config: &AppConfig, request: &DesignRequest) -> Result<DesignResponse> {
        let sequence = Sequence::new(request.sequence.as_str())?;
        let region = resolve_region(request.region_start, request.region_end, sequence.len())?;

        let scanner = SiteScanner::new(PamPattern::parse(&config.pam_sequence)?, config.guide_length);
        let mut candidates = scanner.scan(sequence.as_str(), Some(region.start..region.end));
        let total_sites = candidates.len();
        log::info!(
            "Scanned {} [{}, {}): {} {} sites",
            request.gene_id,
            region.start,
            region.end,
            total_sites,
            config.pam_sequence
        );

        if candidates.len() > config.limits.max_candidates {
            log::warn!(
                "Capping {} candidates at {}",
                candidates.len(),
                config.limits.max_candidates
            );
            candidates.truncate(config.limits.max_candidates);
        }

        let sequence_length = sequence.len();
        let guides: Vec<Guide> = candidates
            .par_iter()
            .map(|candidate| {
                let features = self.extractor.extract(candidate, sequence_length);
                let coverage = request
                    .coverage
                    .get(&candidate.locus)
                    .copied()
                    .unwrap_or(DEFAULT_COVERAGE);
                let scores = self.scorer.score(&features, &config.weights, coverage);
                Guide::assemble(
                    candidate,
                    &features,
                    &scores,
                    candidate_id(&request.gene_id, candidate.locus),
                )
            })
            .collect();

        let scored = guides.len();
        let selected = self
            .optimizer
            .optimize_guides(guides, config.limits.select_top_k);
        let final_k = request.top_k.unwrap_or(config.limits.final_top_k);
        let guides = self.reranker.rerank(selected, final_k);

        // Only returned guides can be rated
        self.registry
            .register_all(guides.iter().map(|g| (g.candidate_id.clone(), g.policy_key())));

        log::info!(
            "Designed {} guides for {} ({} scored)",
            guides.len(),
            request.gene_id,
            scored
        );

        Ok(DesignResponse {
            gene_id: request.gene_id.clone(),
            region,
            total_sites,
            guides,
        })
    }

    pub fn submit_feedback(&self, submission: FeedbackSubmission) -> Result<FeedbackAck> {
        self.feedback.submit(submission)
    }
}

/// Reject `start > end` and `start > len`; clamp `end` to `len`
fn resolve_region(start: usize, end: Option<usize>, len: usize) -> Result<DesignRegion> {
    let requested_end = end.unwrap_or(len);
    if start > requested_end || start > len {
        return Err(DesignError::InvalidRegion {
            start,
            end: requested_end,
            len,
        });
    }
    Ok(DesignRegion {
        start,
        end: requested_end.min(len),
    })
}
