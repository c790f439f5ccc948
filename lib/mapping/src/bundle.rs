use rdf_entity_model::{
    BundleDefinition, InvalidMetadataError, MappingError, MappingResult, NamedNode,
    UnmappedBundleError,
};
use std::collections::BTreeMap;

/// The URIs of a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleUris {
    /// The RDF class that classifies the entities of the bundle.
    pub class_uri: NamedNode,
    /// The URI of the bundle itself, when the bundle is an addressable resource.
    pub resource_uri: NamedNode,
}

/// Translates between the bundle ids of an entity type and their RDF URIs.
///
/// The forward direction is injective (a bundle has exactly one class URI) while the reverse
/// direction may yield several bundles that share a class URI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BundleMapping {
    entity_type: String,
    outbound: BTreeMap<String, BundleUris>,
    /// Class URI to bundle ids. The ids are sorted.
    inbound: BTreeMap<String, Vec<String>>,
}

impl BundleMapping {
    /// Builds a [BundleMapping] from the raw bundle configuration of `entity_type`.
    ///
    /// # Errors
    ///
    /// Returns an error if a URI is not a valid IRI or if a bundle is declared twice with
    /// different URIs.
    pub fn try_new(
        entity_type: &str,
        definitions: &[BundleDefinition],
    ) -> Result<Self, InvalidMetadataError> {
        let invalid = |reason: String| InvalidMetadataError::new(entity_type, reason);

        let mut outbound = BTreeMap::new();
        for definition in definitions {
            let class_uri = NamedNode::new(definition.class_uri.as_str()).map_err(|error| {
                invalid(format!(
                    "invalid class URI '{}' of bundle '{}': {error}",
                    definition.class_uri, definition.bundle
                ))
            })?;
            let resource_uri = match &definition.resource_uri {
                Some(uri) => NamedNode::new(uri.as_str()).map_err(|error| {
                    invalid(format!(
                        "invalid resource URI '{uri}' of bundle '{}': {error}",
                        definition.bundle
                    ))
                })?,
                None => class_uri.clone(),
            };
            let uris = BundleUris {
                class_uri,
                resource_uri,
            };

            match outbound.get(&definition.bundle) {
                Some(existing) if *existing != uris => {
                    return Err(invalid(format!(
                        "bundle '{}' is mapped to more than one URI",
                        definition.bundle
                    )));
                }
                Some(_) => {}
                None => {
                    outbound.insert(definition.bundle.clone(), uris);
                }
            }
        }

        let mut inbound: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (bundle, uris) in &outbound {
            inbound
                .entry(uris.class_uri.as_str().to_owned())
                .or_default()
                .push(bundle.clone());
        }

        Ok(Self {
            entity_type: entity_type.to_owned(),
            outbound,
            inbound,
        })
    }

    /// Returns the URIs of `bundle`, if it is mapped.
    pub fn uris(&self, bundle: &str) -> Option<&BundleUris> {
        self.outbound.get(bundle)
    }

    /// Returns the class URI of `bundle`, or its resource URI if `to_resource_uri` is set.
    pub fn outbound_uri(&self, bundle: &str, to_resource_uri: bool) -> Option<&NamedNode> {
        self.uris(bundle).map(|uris| {
            if to_resource_uri {
                &uris.resource_uri
            } else {
                &uris.class_uri
            }
        })
    }

    /// Converts all `bundles` to their URIs.
    ///
    /// The conversion is all-or-nothing. If any bundle is not mapped, the error names every
    /// bundle without a mapping.
    pub fn bundles_to_uris<S: AsRef<str>>(
        &self,
        bundles: &[S],
        to_resource_uris: bool,
    ) -> Result<Vec<NamedNode>, UnmappedBundleError> {
        let mut uris = Vec::with_capacity(bundles.len());
        let mut unmapped = Vec::new();
        for bundle in bundles {
            let bundle = bundle.as_ref();
            match self.outbound_uri(bundle, to_resource_uris) {
                Some(uri) => uris.push(uri.clone()),
                None => unmapped.push(bundle.to_owned()),
            }
        }

        if unmapped.is_empty() {
            Ok(uris)
        } else {
            Err(UnmappedBundleError::outbound(&self.entity_type, unmapped))
        }
    }

    /// Returns every bundle whose class URI is `uri`.
    pub fn inbound_bundles(&self, uri: &str) -> Result<BundleMatch, UnmappedBundleError> {
        self.inbound
            .get(uri)
            .map(|bundles| BundleMatch {
                entity_type: self.entity_type.clone(),
                uri: uri.to_owned(),
                bundles: bundles.clone(),
            })
            .ok_or_else(|| UnmappedBundleError::inbound(&self.entity_type, uri))
    }

    pub fn len(&self) -> usize {
        self.outbound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty()
    }
}

/// The bundles that are mapped to a URI.
///
/// Several bundles may legitimately share a class URI. Callers that need exactly one bundle use
/// [BundleMatch::single], which reports the ambiguous case as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleMatch {
    entity_type: String,
    uri: String,
    bundles: Vec<String>,
}

impl BundleMatch {
    /// The URI that was looked up.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The matching bundle ids, sorted. Never empty.
    pub fn bundles(&self) -> &[String] {
        &self.bundles
    }

    /// Whether more than one bundle shares the URI.
    pub fn is_ambiguous(&self) -> bool {
        self.bundles.len() > 1
    }

    /// Returns the only matching bundle.
    ///
    /// # Errors
    ///
    /// Returns [MappingError::AmbiguousBundle] if several bundles share the URI.
    pub fn single(&self) -> MappingResult<&str> {
        match self.bundles.as_slice() {
            [bundle] => Ok(bundle),
            bundles => Err(MappingError::AmbiguousBundle {
                entity_type: self.entity_type.clone(),
                uri: self.uri.clone(),
                bundles: bundles.to_vec(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "http://example.com/Document";

    fn mapping() -> BundleMapping {
        BundleMapping::try_new(
            "node",
            &[
                BundleDefinition::new("page", DOCUMENT),
                BundleDefinition::new("article", "http://example.com/Article")
                    .with_resource_uri("http://example.com/bundles/article"),
                BundleDefinition::new("report", DOCUMENT),
            ],
        )
        .unwrap()
    }

    #[test]
    fn bundles_to_class_and_resource_uris() {
        let mapping = mapping();

        let classes = mapping.bundles_to_uris(&["article", "page"], false).unwrap();
        assert_eq!(
            classes,
            vec![
                NamedNode::new_unchecked("http://example.com/Article"),
                NamedNode::new_unchecked(DOCUMENT),
            ]
        );

        let resources = mapping.bundles_to_uris(&["article", "page"], true).unwrap();
        assert_eq!(
            resources,
            vec![
                NamedNode::new_unchecked("http://example.com/bundles/article"),
                NamedNode::new_unchecked(DOCUMENT),
            ]
        );
    }

    #[test]
    fn bundles_to_uris_is_all_or_nothing() {
        let error = mapping()
            .bundles_to_uris(&["article", "blog", "page", "wiki"], false)
            .unwrap_err();
        assert_eq!(error.keys, vec!["blog".to_owned(), "wiki".to_owned()]);
        insta::assert_snapshot!(error, @"Bundles of entity type 'node' without URI mapping: blog, wiki");
    }

    #[test]
    fn reverse_lookup_returns_all_aliases() {
        let mapping = mapping();

        let shared = mapping.inbound_bundles(DOCUMENT).unwrap();
        assert_eq!(shared.bundles(), ["page".to_owned(), "report".to_owned()]);
        assert_eq!(shared.uri(), DOCUMENT);
        assert!(shared.is_ambiguous());
        assert!(matches!(
            shared.single(),
            Err(MappingError::AmbiguousBundle { .. })
        ));

        let article = mapping
            .inbound_bundles("http://example.com/Article")
            .unwrap();
        assert_eq!(article.single().unwrap(), "article");
    }

    #[test]
    fn reverse_lookup_of_unknown_uri() {
        let error = mapping()
            .inbound_bundles("http://example.com/Unknown")
            .unwrap_err();
        insta::assert_snapshot!(error, @"No bundle of entity type 'node' is mapped to <http://example.com/Unknown>");
    }

    #[test]
    fn conflicting_bundle_declarations() {
        let error = BundleMapping::try_new(
            "node",
            &[
                BundleDefinition::new("page", DOCUMENT),
                BundleDefinition::new("page", "http://example.com/Page"),
            ],
        )
        .unwrap_err();
        insta::assert_snapshot!(error, @"Invalid field definitions for entity type 'node': bundle 'page' is mapped to more than one URI");
    }

    #[test]
    fn invalid_class_uri() {
        let result = BundleMapping::try_new("node", &[BundleDefinition::new("page", "not an iri")]);
        assert!(result.is_err());
    }
}
