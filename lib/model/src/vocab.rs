//! Provides ready to use [`NamedNodeRef`](oxrdf::NamedNodeRef)s for the project vocabularies.
//!
//! `rdf`, `rdfs` and `xsd` terms come from [`oxrdf::vocab`].

pub mod knora_base {
    //! The foundational `knora-base` ontology.
    use oxrdf::NamedNodeRef;

    /// The ontology itself. Every query implicitly relies on its core vocabulary.
    pub const ONTOLOGY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.knora.org/ontology/knora-base");
    /// Marks resources and values as deleted. Statements on this predicate are cheap filters
    /// and are deferred to the end of their block.
    pub const IS_DELETED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.knora.org/ontology/knora-base#isDeleted");
    /// The backend-agnostic marker for the named graph holding only asserted (non-inferred)
    /// triples. Transformers replace it with the deployed triplestore's graph, or strip it.
    pub const EXPLICIT_NAMED_GRAPH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.knora.org/explicit");
    /// The string representation of a value, used to support ordering.
    pub const VALUE_HAS_STRING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.knora.org/ontology/knora-base#valueHasString");
    /// The transitive closure of [STANDOFF_TAG_HAS_START_PARENT]. Rewritten to a property path
    /// over the parent predicate instead of being expanded like an ordinary property.
    pub const STANDOFF_TAG_HAS_START_ANCESTOR: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://www.knora.org/ontology/knora-base#standoffTagHasStartAncestor",
    );
    /// The direct parent of a standoff tag.
    pub const STANDOFF_TAG_HAS_START_PARENT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://www.knora.org/ontology/knora-base#standoffTagHasStartParent",
    );
}

pub mod ontotext {
    //! Vocabulary of the inference-capable backend (Ontotext GraphDB).
    use oxrdf::NamedNodeRef;

    /// The graph holding only explicitly asserted triples.
    pub const EXPLICIT_GRAPH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.ontotext.com/explicit");
    /// The proprietary full-text search predicate.
    pub const FULL_TEXT_SEARCH_INDEX: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.ontotext.com/owlim/lucene#fullTextSearchIndex");
}

pub mod jena_text {
    //! Vocabulary of the non-inferencing backend's full-text index (Jena text index).
    use oxrdf::NamedNodeRef;

    /// The full-text query predicate.
    pub const QUERY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://jena.apache.org/text#query");
}
