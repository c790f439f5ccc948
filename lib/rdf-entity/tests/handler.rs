#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use rdf_entity::encoding::DataTypeRegistry;
use rdf_entity::mapping::{FieldDefinitionSourceRef, MemFieldDefinitions};
use rdf_entity::model::vocab::xsd;
use rdf_entity::model::{
    DataType, Decimal, EntityTypeDefinition, FieldFormat, FieldValue, Literal, NamedNode, Term,
};
use rdf_entity::{MappingError, RdfEntityConfig, RdfFieldHandler};
use std::error::Error;
use std::str::FromStr;
use std::sync::Arc;

const NODE: &str = r#"{
    "entity_type": "node",
    "bundle_key": "type",
    "fields": [
        {
            "field": "title",
            "main_property": "value",
            "columns": [
                { "column": "value", "predicates": ["http://purl.org/dc/terms/title"], "format": "t_literal" }
            ]
        },
        {
            "bundle": "article",
            "field": "title",
            "main_property": "value",
            "columns": [
                { "column": "value", "predicates": ["http://schema.org/headline"], "format": "t_literal" }
            ]
        },
        {
            "field": "status",
            "main_property": "value",
            "columns": [
                { "column": "value", "predicates": ["http://example.com/status"], "format": "literal", "data_type": "boolean" }
            ]
        },
        {
            "field": "price",
            "main_property": "value",
            "columns": [
                { "column": "value", "predicates": ["http://schema.org/price"], "format": "literal", "data_type": "xsd:decimal" },
                { "column": "currency", "predicates": ["http://schema.org/priceCurrency"], "format": "literal" }
            ]
        },
        {
            "field": "author",
            "main_property": "target_id",
            "columns": [
                { "column": "target_id", "predicates": ["http://schema.org/author"], "format": "resource" },
                { "column": "target_type" }
            ]
        },
        {
            "bundle": "event",
            "field": "date",
            "main_property": "value",
            "columns": [
                { "column": "value", "predicates": ["http://schema.org/startDate"], "format": "literal", "data_type": "date" }
            ]
        }
    ],
    "bundles": [
        { "bundle": "article", "class_uri": "http://schema.org/Article" },
        { "bundle": "event", "class_uri": "http://schema.org/Event", "resource_uri": "http://example.com/bundles/event" },
        { "bundle": "page", "class_uri": "http://schema.org/WebPage" },
        { "bundle": "landing_page", "class_uri": "http://schema.org/WebPage" }
    ]
}"#;

fn node_definition() -> EntityTypeDefinition {
    serde_json::from_str(NODE).unwrap()
}

fn handler() -> RdfFieldHandler {
    let definitions = MemFieldDefinitions::new();
    definitions.insert(node_definition());
    RdfFieldHandler::new(Arc::new(definitions))
}

fn render(uris: &[NamedNode]) -> String {
    uris.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_translatable_title_round_trip() -> Result<(), Box<dyn Error>> {
    let handler = handler();

    let term = handler.outbound_value("node", "title", &"Hello".into(), Some("en"), None, None)?;
    insta::assert_snapshot!(term, @r#""Hello"@en"#);

    let value = handler.inbound_value("node", "title", term.as_ref(), None, None, None)?;
    assert_eq!(value, FieldValue::from("Hello"));
    Ok(())
}

#[test]
fn test_boolean_status_round_trip() -> Result<(), Box<dyn Error>> {
    let handler = handler();

    let term = handler.outbound_value("node", "status", &true.into(), None, None, None)?;
    assert_eq!(term, Term::from(Literal::new_typed_literal("1", xsd::BOOLEAN)));

    let value = handler.inbound_value("node", "status", term.as_ref(), None, None, None)?;
    assert_eq!(value, FieldValue::Boolean(true));
    Ok(())
}

#[test]
fn test_decimal_and_secondary_column() -> Result<(), Box<dyn Error>> {
    let handler = handler();
    let price = FieldValue::from(Decimal::from_str("19.90")?);

    let term = handler.outbound_value("node", "price", &price, None, None, None)?;
    insta::assert_snapshot!(term, @r#""19.9"^^<http://www.w3.org/2001/XMLSchema#decimal>"#);
    assert_eq!(
        handler.inbound_value("node", "price", term.as_ref(), None, None, None)?,
        price
    );

    let currency =
        handler.outbound_value("node", "price", &"EUR".into(), None, Some("currency"), None)?;
    insta::assert_snapshot!(currency, @r#""EUR""#);
    Ok(())
}

#[test]
fn test_resource_reference() -> Result<(), Box<dyn Error>> {
    let handler = handler();
    let author = FieldValue::from("http://example.com/user/1");

    let term = handler.outbound_value("node", "author", &author, None, None, None)?;
    insta::assert_snapshot!(term, @"<http://example.com/user/1>");
    assert_eq!(
        handler.inbound_value("node", "author", term.as_ref(), None, None, None)?,
        author
    );

    let error = handler
        .outbound_value("node", "author", &"not a uri".into(), None, None, None)
        .unwrap_err();
    assert!(matches!(error, MappingError::TypeMismatch(_)));
    Ok(())
}

#[test]
fn test_values_of_other_kinds_are_rejected() {
    let handler = handler();
    let count = FieldValue::Integer(5);

    let error = handler
        .outbound_value("node", "title", &count, Some("en"), None, None)
        .unwrap_err();
    insta::assert_snapshot!(error, @"Field 'title' expects a string but got a value of kind integer");

    let error = handler
        .outbound_value("node", "price", &count, None, Some("currency"), None)
        .unwrap_err();
    assert!(matches!(error, MappingError::TypeMismatch(_)));

    let error = handler
        .outbound_value("node", "status", &"true".into(), None, None, None)
        .unwrap_err();
    assert!(matches!(error, MappingError::TypeMismatch(_)));

    // A typed literal cannot be read as a translation.
    let typed = Term::from(Literal::new_typed_literal("5", xsd::INTEGER));
    let error = handler
        .inbound_value("node", "title", typed.as_ref(), Some("en"), None, None)
        .unwrap_err();
    assert!(matches!(error, MappingError::TypeMismatch(_)));
}

#[test]
fn test_bundles_to_uris_is_all_or_nothing() -> Result<(), Box<dyn Error>> {
    let definitions = MemFieldDefinitions::new();
    definitions.insert(EntityTypeDefinition {
        bundles: node_definition().bundles[..1].to_vec(),
        ..node_definition()
    });
    let handler = RdfFieldHandler::new(Arc::new(definitions));

    let uris = handler.bundles_to_uris("node", &["article"], false)?;
    insta::assert_snapshot!(render(&uris), @"<http://schema.org/Article>");

    let error = handler
        .bundles_to_uris("node", &["article", "page"], false)
        .unwrap_err();
    insta::assert_snapshot!(error, @"Bundles of entity type 'node' without URI mapping: page");
    Ok(())
}

#[test]
fn test_bundle_resource_uris() -> Result<(), Box<dyn Error>> {
    let handler = handler();

    let uris = handler.bundles_to_uris("node", &["event", "page"], true)?;
    insta::assert_snapshot!(render(&uris), @r"
    <http://example.com/bundles/event>
    <http://schema.org/WebPage>
    ");
    assert_eq!(
        handler.outbound_bundle_value("node", "event", false)?,
        NamedNode::new("http://schema.org/Event")?
    );
    Ok(())
}

#[test]
fn test_inbound_bundle_value() -> Result<(), Box<dyn Error>> {
    let handler = handler();

    let article = handler.inbound_bundle_value("node", "http://schema.org/Article")?;
    assert_eq!(article.single()?, "article");

    let pages = handler.inbound_bundle_value("node", "http://schema.org/WebPage")?;
    assert_eq!(pages.bundles(), ["landing_page".to_owned(), "page".to_owned()]);
    assert!(matches!(
        pages.single(),
        Err(MappingError::AmbiguousBundle { .. })
    ));

    let error = handler
        .inbound_bundle_value("node", "http://schema.org/Person")
        .unwrap_err();
    assert!(matches!(error, MappingError::UnmappedBundle(_)));
    Ok(())
}

#[test]
fn test_unmapped_field_signaling() {
    let handler = handler();

    let error = handler
        .field_predicates("node", "body", None, None)
        .unwrap_err();
    assert!(error.is_unmapped_field());
    assert!(!handler.has_field_predicate("node", None, "body", None));

    // Declared without predicates.
    let error = handler
        .field_predicates("node", "author", Some("target_type"), None)
        .unwrap_err();
    assert!(error.is_unmapped_field());
    assert!(!handler.has_field_predicate("node", None, "author", Some("target_type")));

    // Unknown entity types never make the check fail.
    assert!(!handler.has_field_predicate("comment", None, "title", None));
    assert!(matches!(
        handler.field_predicates("comment", "title", None, None),
        Err(MappingError::UnknownEntityType(_))
    ));
}

#[test]
fn test_bundle_override_precedence() -> Result<(), Box<dyn Error>> {
    let handler = handler();

    let article = handler.field_predicates("node", "title", None, Some("article"))?;
    insta::assert_snapshot!(render(&article), @"<http://schema.org/headline>");

    let field_level = handler.field_predicates("node", "title", None, None)?;
    insta::assert_snapshot!(render(&field_level), @"<http://purl.org/dc/terms/title>");

    let page = handler.field_predicates("node", "title", None, Some("page"))?;
    assert_eq!(page, field_level);

    // Bundle-only fields are not available for other bundles.
    assert!(handler.has_field_predicate("node", Some("event"), "date", None));
    assert!(!handler.has_field_predicate("node", Some("article"), "date", None));
    Ok(())
}

#[test]
fn test_field_formats_and_main_property() -> Result<(), Box<dyn Error>> {
    let handler = handler();

    assert_eq!(
        handler.field_formats("node", "author", None, None)?,
        vec![FieldFormat::Resource]
    );
    assert_eq!(
        handler.field_formats("node", "title", None, Some("article"))?,
        vec![FieldFormat::TranslatableLiteral]
    );
    assert_eq!(handler.field_main_property("node", "author")?, "target_id");
    assert_eq!(handler.field_main_property("node", "type")?, "target_id");
    assert!(handler
        .field_main_property("node", "body")
        .is_err_and(|error| error.is_unmapped_field()));
    Ok(())
}

#[test]
fn test_property_list() -> Result<(), Box<dyn Error>> {
    let properties = handler().property_list("node")?;
    insta::assert_snapshot!(render(&properties), @r"
    <http://schema.org/author>
    <http://schema.org/startDate>
    <http://schema.org/priceCurrency>
    <http://schema.org/price>
    <http://example.com/status>
    <http://purl.org/dc/terms/title>
    <http://schema.org/headline>
    <http://www.w3.org/1999/02/22-rdf-syntax-ns#type>
    ");
    Ok(())
}

#[test]
fn test_build_is_deterministic() -> Result<(), Box<dyn Error>> {
    let mut reversed = node_definition();
    reversed.fields.reverse();
    reversed.bundles.reverse();

    let definitions = MemFieldDefinitions::new();
    definitions.insert(reversed);
    let reversed_handler = RdfFieldHandler::new(Arc::new(definitions));

    assert_eq!(
        *handler().inbound_map("node")?,
        *reversed_handler.inbound_map("node")?
    );
    Ok(())
}

#[test]
fn test_neutral_langcode() -> Result<(), Box<dyn Error>> {
    let definitions: FieldDefinitionSourceRef = Arc::new(MemFieldDefinitions::from_iter([
        node_definition(),
    ]));

    let error = RdfFieldHandler::new(Arc::clone(&definitions))
        .outbound_value("node", "title", &"Hello".into(), None, None, None)
        .unwrap_err();
    assert!(matches!(error, MappingError::MissingLangcode { .. }));

    let handler = RdfFieldHandler::new_with_config(
        definitions,
        RdfEntityConfig::default().with_neutral_langcode("und"),
    );
    let term = handler.outbound_value("node", "title", &"Hello".into(), None, None, None)?;
    insta::assert_snapshot!(term, @r#""Hello"@und"#);
    Ok(())
}

#[test]
fn test_supported_data_types() {
    assert_eq!(handler().supported_data_types(), DataType::ALL.to_vec());
}

#[test]
fn test_custom_registry() {
    let registry = DataTypeRegistry::builder()
        .without(DataType::Boolean)
        .build();
    let handler = RdfFieldHandler::new_with_config(
        Arc::new(MemFieldDefinitions::from_iter([node_definition()])),
        RdfEntityConfig::default().with_registry(Arc::new(registry)),
    );

    assert!(!handler
        .supported_data_types()
        .contains(&DataType::Boolean));
    let error = handler
        .outbound_value("node", "status", &true.into(), None, None, None)
        .unwrap_err();
    insta::assert_snapshot!(error, @"No converter is registered for data type 'boolean'");
}

#[test]
fn test_rebuild_after_definition_change() -> Result<(), Box<dyn Error>> {
    let definitions = Arc::new(MemFieldDefinitions::new());
    definitions.insert(node_definition());
    let source = Arc::clone(&definitions);
    let handler = RdfFieldHandler::new(source);
    assert!(!handler.has_field_predicate("node", None, "body", None));

    let mut changed = node_definition();
    changed.fields.push(serde_json::from_str(
        r#"{
            "field": "body",
            "main_property": "value",
            "columns": [{ "column": "value", "predicates": ["http://schema.org/text"], "format": "t_literal" }]
        }"#,
    )?);
    definitions.insert(changed);

    // The cached table is kept until the definitions are invalidated.
    assert!(!handler.has_field_predicate("node", None, "body", None));
    assert!(handler.invalidate("node"));
    assert!(handler.has_field_predicate("node", None, "body", None));

    handler.invalidate_all();
    handler.rebuild("node")?;
    assert!(handler.cache().is_cached("node"));
    Ok(())
}
