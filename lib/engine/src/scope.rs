//! Ontology-relevance analysis.
//!
//! Simulating inference against every known ontology is wasteful when a repository hosts many
//! projects. This module computes the smallest ontology set sufficient for one query, from an
//! immutable snapshot of the ontology cache and an asynchronous project lookup. Resolution is
//! the only suspending step of a compilation; dropping the returned future cancels it as a
//! unit, and no partial result is observable.

use crate::error::ScopeResolutionError;
use async_trait::async_trait;
use futures::future::try_join_all;
use gravsearch_model::vocab::knora_base;
use gravsearch_model::{Entity, NamedNode, QueryPattern, WhereClause};
use rustc_hash::{FxHashMap, FxHashSet};

/// The IRI prefix of project data (resources and values, as opposed to schema terms).
const DATA_IRI_PREFIX: &str = "http://rdfh.ch/";

/// The set of ontologies sufficient to simulate inference for one query.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OntologyScope {
    ontologies: FxHashSet<NamedNode>,
}

impl OntologyScope {
    pub fn contains(&self, ontology: &NamedNode) -> bool {
        self.ontologies.contains(ontology)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedNode> {
        self.ontologies.iter()
    }

    pub fn len(&self) -> usize {
        self.ontologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ontologies.is_empty()
    }
}

impl FromIterator<NamedNode> for OntologyScope {
    fn from_iter<I: IntoIterator<Item = NamedNode>>(iter: I) -> Self {
        Self {
            ontologies: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a OntologyScope {
    type Item = &'a NamedNode;
    type IntoIter = std::collections::hash_set::Iter<'a, NamedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.ontologies.iter()
    }
}

/// A read-only snapshot of the ontology cache's entity-to-defining-ontology map.
///
/// The cache itself is populated at startup and on ontology change; each compilation receives
/// a snapshot instead of reading shared mutable state.
#[derive(Clone, Debug, Default)]
pub struct OntologySnapshot {
    defining_ontologies: FxHashMap<NamedNode, NamedNode>,
}

impl OntologySnapshot {
    pub fn new(defining_ontologies: FxHashMap<NamedNode, NamedNode>) -> Self {
        Self {
            defining_ontologies,
        }
    }

    /// The ontology defining `entity`, if `entity` is a known schema term.
    pub fn defining_ontology(&self, entity: &NamedNode) -> Option<&NamedNode> {
        self.defining_ontologies.get(entity)
    }
}

impl FromIterator<(NamedNode, NamedNode)> for OntologySnapshot {
    fn from_iter<I: IntoIterator<Item = (NamedNode, NamedNode)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Resolves the ontologies belonging to a project. Retry and backoff, if any, belong to the
/// implementation, not to the resolver.
#[async_trait]
pub trait ProjectOntologyLookup: Send + Sync {
    async fn ontologies_for_project(
        &self,
        shortcode: &str,
    ) -> Result<Vec<NamedNode>, ScopeResolutionError>;
}

/// Computes the minimal ontology set relevant to inference for `where_clause`.
///
/// Returns `None` when no restriction is possible: either no entity resolved to any ontology,
/// or everything resolved to the foundational ontology alone. Otherwise the result always
/// includes the foundational ontology, since every query implicitly relies on its core
/// vocabulary.
///
/// Project lookups for distinct shortcodes run concurrently; duplicates are suppressed before
/// any lookup is issued, and the result is only produced once all lookups have completed.
pub async fn relevant_ontologies(
    where_clause: &WhereClause,
    snapshot: &OntologySnapshot,
    projects: &dyn ProjectOntologyLookup,
) -> Result<Option<OntologyScope>, ScopeResolutionError> {
    let mut entities = Vec::new();
    collect_entities(&where_clause.patterns, &mut entities);

    let mut ontologies = FxHashSet::default();
    let mut shortcodes = FxHashSet::default();
    for entity in &entities {
        let Some(iri) = entity.as_iri() else {
            continue;
        };
        match snapshot.defining_ontology(iri) {
            Some(ontology) => {
                ontologies.insert(ontology.clone());
            }
            // Not a schema term: assume project data. A project may use several ontologies
            // and which one defines the instance is not decidable from the IRI, so all of
            // them count. IRIs resolving to no project contribute nothing.
            None => {
                if let Some(shortcode) = project_shortcode(iri.as_str()) {
                    shortcodes.insert(shortcode.to_owned());
                }
            }
        }
    }

    let lookups = shortcodes
        .iter()
        .map(|shortcode| projects.ontologies_for_project(shortcode));
    for project_ontologies in try_join_all(lookups).await? {
        ontologies.extend(project_ontologies);
    }

    let foundational = knora_base::ONTOLOGY.into_owned();
    if ontologies.is_empty() || ontologies.iter().all(|ontology| *ontology == foundational) {
        return Ok(None);
    }
    ontologies.insert(foundational);
    Ok(Some(OntologyScope { ontologies }))
}

/// The project shortcode of a data IRI (`http://rdfh.ch/<shortcode>/…`).
fn project_shortcode(iri: &str) -> Option<&str> {
    let rest = iri.strip_prefix(DATA_IRI_PREFIX)?;
    let (shortcode, _) = rest.split_once('/')?;
    (shortcode.len() == 4 && shortcode.bytes().all(|b| b.is_ascii_hexdigit()))
        .then_some(shortcode)
}

fn collect_entities(patterns: &[QueryPattern], collector: &mut Vec<Entity>) {
    for pattern in patterns {
        match pattern {
            QueryPattern::Statement(statement) => {
                collector.push(statement.subject.clone());
                collector.push(statement.predicate.clone());
                collector.push(statement.object.clone());
            }
            QueryPattern::Union(blocks) => {
                for block in blocks {
                    collect_entities(block, collector);
                }
            }
            QueryPattern::Optional(patterns)
            | QueryPattern::Minus(patterns)
            | QueryPattern::FilterNotExists(patterns) => collect_entities(patterns, collector),
            QueryPattern::LuceneQuery(lucene) => {
                collector.push(lucene.subject.clone().into());
                collector.push(lucene.object.clone().into());
                if let Some(statement) = &lucene.literal_statement {
                    collector.push(statement.subject.clone());
                    collector.push(statement.predicate.clone());
                    collector.push(statement.object.clone());
                }
            }
            QueryPattern::Values(values) => {
                collector.push(values.variable.clone().into());
                collector.extend(values.values.iter().cloned());
            }
            QueryPattern::Bind(bind) => {
                collector.push(bind.variable.clone().into());
                bind.expression.collect_entities(collector);
            }
            QueryPattern::Filter(_) => {}
        }
    }
}
