use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::{
    analysis::{
        Analyzer, HttpClassifier, Lexicon, ScoringEngine, SequenceClassifier,
        classifier::ClassifierError, jitter,
    },
    config::Config,
    extractor::{Extractor, SiteSelectors},
    fetcher::{FetchError, Fetcher},
    tables::TableError,
    verify::Verifier,
};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("failed to build page fetcher: {0}")]
    Fetcher(#[from] FetchError),
    #[error("failed to load data table: {0}")]
    Table(#[from] TableError),
    #[error("failed to configure classifier: {0}")]
    Classifier(#[from] ClassifierError),
}

#[derive(Clone)]
pub struct AppState {
    pub verifier: Verifier,
}

impl AppState {
    pub fn new(verifier: Verifier) -> Self {
        Self { verifier }
    }

    /// Build every long-lived collaborator once, at startup.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let fetcher = Fetcher::from_config(config)?;
        let sites = SiteSelectors::load(config.site_selectors_path().map(|p| p.as_path()))?;
        let lexicon = Lexicon::load(config.lexicon_path().map(|p| p.as_path()))?;
        info!(sites = sites.len(), "loaded data tables");

        let engine = ScoringEngine::new(lexicon, jitter::from_amplitude(config.confidence_jitter()));

        let classifier: Option<Arc<dyn SequenceClassifier>> = match config.classifier_url() {
            Some(url) => {
                let classifier = HttpClassifier::new(url)?;
                info!(endpoint = %classifier.endpoint(), "sequence classifier enabled");
                Some(Arc::new(classifier))
            }
            None => None,
        };

        let verifier = Verifier::new(
            Extractor::new(fetcher, sites),
            Analyzer::new(engine, classifier),
        );
        Ok(Self::new(verifier))
    }
}
