use crate::server::AppState;
use medjargon_core::{
    JargonService, config::ServiceConfig, definitions::DefinitionStore,
    identifier::TermIdentifier, lexicon::Lexicon,
};
use std::sync::Arc;

/// Longest text accepted by the test service, in characters
pub const TEST_MAX_TEXT_LENGTH: usize = 500;

/// Small in-memory service for handler and route tests
pub fn create_test_service() -> JargonService {
    let lexicon = Lexicon::from_entries([
        ("chronic emphysema", "C0034067"),
        ("embolism", "C0013922"),
        ("asthma", "C0004096"),
        ("COPD", "C0024117"),
        ("cellulitis", "C0007642"),
    ])
    .unwrap_or_else(|e| panic!("test lexicon is invalid: {}", e));
    let definitions: DefinitionStore = [
        (
            "C0034067",
            "Enlargement of air spaces distal to the terminal bronchioles.",
        ),
        ("C0013922", "Blocking of a blood vessel by an embolus."),
        ("C0004096", "A chronic inflammatory disorder of the airways."),
        (
            "C0024117",
            "A disease of chronic diffuse irreversible airflow obstruction.",
        ),
    ]
    .into_iter()
    .collect();
    let config = ServiceConfig {
        max_text_length: TEST_MAX_TEXT_LENGTH,
        ..Default::default()
    };

    JargonService::new(config, lexicon, definitions)
}

/// Create a test AppState for testing
pub fn create_test_state() -> AppState {
    AppState::new(create_test_service())
}

/// Test AppState whose LLM path is served by `identifier`
pub fn create_test_state_with_llm(identifier: Arc<dyn TermIdentifier>) -> AppState {
    AppState::new(create_test_service().with_llm_identifier(identifier))
}
