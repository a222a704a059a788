//! Term catalog: the ordered glossary the game deals from.

use crate::error::{GameError, Result};
use crate::parser::parse_glossary;
use crate::types::GlossaryEntry;
use serde::{Deserialize, Serialize};

const BUILTIN_GLOSSARY: &[(&str, &str)] = &[
    ("Ontology", "Assumptions about the nature of reality (objective vs. constructed)."),
    ("Epistemology", "Assumptions about how knowledge is created and validated."),
    ("Positivism", "Philosophy assuming objective truths can be measured and tested."),
    ("Interpretivism", "Philosophy assuming knowledge is constructed through human experience."),
    ("Pragmatism", "A practical philosophy often combining qualitative and quantitative methods."),
    ("Deductive Approach", "Testing existing theory with data."),
    ("Inductive Approach", "Building theory from observations and data."),
    ("Abductive Approach", "Iteratively moving between theory and data to develop explanations."),
    ("Case Study", "In-depth study of an organization, group, or event."),
    ("Survey", "Collecting data from a sample using questionnaires."),
    ("Action Research", "Solving a practical problem while simultaneously studying the process."),
    ("Cross-sectional Study", "Data collected at a single point in time."),
    ("Longitudinal Study", "Data collected from the same participants over time."),
    ("Mixed-Methods", "Combining qualitative and quantitative approaches."),
    ("Primary Data", "Data collected directly for the study."),
    ("Secondary Data", "Existing data (e.g., reports, archives) used for analysis."),
    ("Thematic Analysis", "Identifying patterns and themes in qualitative data."),
    ("Grounded Theory", "Developing theories from data through iterative coding."),
    ("Content Analysis", "Systematic coding and interpretation of text, media, or documents."),
    ("Triangulation", "Using multiple methods or data sources to strengthen findings."),
    ("Validity", "The extent to which you measure what you intend to measure."),
    ("Reliability", "Consistency of a measure or research results across time/conditions."),
    ("Generalizability", "Extent to which findings apply beyond the study sample."),
    ("Bias", "Systematic error that may distort findings."),
    ("Abstract", "Concise summary of the study, methods, findings, and implications."),
    ("Problem Statement", "Clear articulation of the issue being studied."),
    ("Research Question (RQ)", "Specific question(s) guiding the research."),
    ("Hypothesis", "Testable prediction about relationships between variables."),
    ("Variables", "Elements studied (independent, dependent, control)."),
    ("Conceptual Framework", "Theoretical model showing relationships among key concepts."),
    ("Contribution to Knowledge", "How the study advances academic understanding."),
    ("Contribution to Practice", "How findings help solve real-world problems."),
    ("Limitations", "Boundaries and weaknesses of the study."),
    ("Delimitations", "Scope choices defined by the researcher."),
    ("Ethics", "Standards ensuring responsible research conduct (e.g., consent, privacy)."),
    ("Reflexivity", "Researcher\u{2019}s reflection on their own influence in the study."),
];

/// Immutable, non-empty list of glossary entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GlossaryEntry>", into = "Vec<GlossaryEntry>")]
pub struct Catalog {
    entries: Vec<GlossaryEntry>,
}

impl Catalog {
    /// Build a catalog, preserving entry order. Duplicate terms are kept.
    pub fn new(entries: Vec<GlossaryEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        Ok(Self { entries })
    }

    /// The research-methods glossary shipped with the game.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_GLOSSARY
                .iter()
                .map(|(term, definition)| GlossaryEntry::new(*term, *definition))
                .collect(),
        }
    }

    /// Load from a JSON array of `{ "term", "definition" }` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GameError::CatalogFormat(e.to_string()))
    }

    /// Load from the `T:` / `D:` markdown format.
    pub fn from_markdown(content: &str) -> Result<Self> {
        Self::new(parse_glossary(content)?)
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<GlossaryEntry>> for Catalog {
    type Error = GameError;

    fn try_from(entries: Vec<GlossaryEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<Catalog> for Vec<GlossaryEntry> {
    fn from(catalog: Catalog) -> Self {
        catalog.entries
    }
}
