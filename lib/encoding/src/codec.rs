use crate::converter::ConversionError;
use crate::registry::{DataTypeRegistry, DataTypeRegistryRef};
use rdf_entity_model::vocab::xsd;
use rdf_entity_model::{
    DataType, FieldFormat, FieldValue, Literal, LiteralRef, MalformedLiteralError, MappingError,
    MappingResult, NamedNode, Term, TermRef, TypeMismatchError,
};

/// The field a value is encoded for or decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingTarget<'a> {
    pub entity_type: &'a str,
    pub field: &'a str,
    pub format: FieldFormat,
    pub data_type: DataType,
}

/// Converts native field values into RDF terms and back.
///
/// The conversion depends on the format of the field:
/// - [FieldFormat::Resource]: the value is an IRI and becomes a named node.
/// - [FieldFormat::TranslatableLiteral]: the value becomes a language-tagged literal.
/// - [FieldFormat::Literal]: the value is converted by the converter of the field's data type and
///   becomes a literal with the data type's canonical datatype IRI. String values become simple
///   literals.
///
/// For every value `v` that can be encoded, decoding the encoded term yields `v` again.
#[derive(Debug, Clone)]
pub struct ValueCodec {
    registry: DataTypeRegistryRef,
    neutral_langcode: Option<String>,
}

impl Default for ValueCodec {
    fn default() -> Self {
        Self::new(DataTypeRegistry::builtin())
    }
}

impl ValueCodec {
    /// Creates a new [ValueCodec] that requires a langcode for translatable literals.
    pub fn new(registry: DataTypeRegistryRef) -> Self {
        Self {
            registry,
            neutral_langcode: None,
        }
    }

    /// Sets the language tag of translatable literals that are encoded without a langcode.
    #[must_use]
    pub fn with_neutral_langcode(mut self, neutral_langcode: Option<String>) -> Self {
        self.neutral_langcode = neutral_langcode;
        self
    }

    pub fn registry(&self) -> &DataTypeRegistryRef {
        &self.registry
    }

    pub fn neutral_langcode(&self) -> Option<&str> {
        self.neutral_langcode.as_deref()
    }

    /// Encodes `value` as the RDF term of `target`.
    ///
    /// # Errors
    ///
    /// - [MappingError::TypeMismatch] if the value does not fit the format or data type.
    /// - [MappingError::MissingLangcode] if a translatable literal has no language.
    /// - [MappingError::UnsupportedDataType] if no converter is registered for the data type.
    pub fn encode(
        &self,
        target: EncodingTarget<'_>,
        value: &FieldValue,
        langcode: Option<&str>,
    ) -> MappingResult<Term> {
        match target.format {
            FieldFormat::Resource => {
                let Some(iri) = value.as_str() else {
                    let found = format!("a value of kind {}", value.kind());
                    return Err(mismatch(target, "an IRI", found));
                };
                let iri = NamedNode::new(iri)
                    .map_err(|error| mismatch(target, "an IRI", format!("\"{iri}\" ({error})")))?;
                Ok(iri.into())
            }
            FieldFormat::TranslatableLiteral => {
                let language = langcode
                    .or(self.neutral_langcode.as_deref())
                    .ok_or_else(|| MappingError::MissingLangcode {
                        entity_type: target.entity_type.to_owned(),
                        field: target.field.to_owned(),
                    })?;
                let FieldValue::String(lexical) = value else {
                    let found = format!("a value of kind {}", value.kind());
                    return Err(mismatch(target, "a string", found));
                };
                let literal = Literal::new_language_tagged_literal(lexical.clone(), language)
                    .map_err(|error| {
                        mismatch(
                            target,
                            "a valid language tag",
                            format!("\"{language}\" ({error})"),
                        )
                    })?;
                Ok(literal.into())
            }
            FieldFormat::Literal => {
                let converter = self.registry.converter(target.data_type)?;
                let lexical = converter
                    .to_lexical(value)
                    .map_err(|error| conversion_mismatch(target, error))?;
                let literal = match target.data_type {
                    DataType::String => Literal::new_simple_literal(lexical),
                    _ => Literal::new_typed_literal(lexical, converter.datatype()),
                };
                Ok(literal.into())
            }
        }
    }

    /// Decodes `term` into the native value of `target`.
    ///
    /// Datatype IRIs and language tags are stripped. Translatable fields read language-tagged
    /// literals, and simple literals if no `langcode` is given. If a `langcode` is given, the
    /// literal must carry that language.
    ///
    /// # Errors
    ///
    /// - [MappingError::TypeMismatch] if the term does not fit the format.
    /// - [MappingError::MalformedLiteral] if the converter cannot parse the lexical form.
    /// - [MappingError::UnsupportedDataType] if no converter is registered for the data type.
    pub fn decode(
        &self,
        target: EncodingTarget<'_>,
        term: TermRef<'_>,
        langcode: Option<&str>,
    ) -> MappingResult<FieldValue> {
        match (target.format, term) {
            (FieldFormat::Resource, TermRef::NamedNode(node)) => {
                Ok(FieldValue::String(node.as_str().to_owned()))
            }
            (FieldFormat::Resource, _) => Err(mismatch(target, "an IRI", term.to_string())),
            (FieldFormat::TranslatableLiteral, TermRef::Literal(literal)) => {
                let accepted = match (literal.language(), langcode) {
                    (Some(language), Some(requested)) => language.eq_ignore_ascii_case(requested),
                    (Some(_), None) => true,
                    // Untagged simple literals are only read when no language is requested.
                    (None, None) => literal.datatype() == xsd::STRING,
                    (None, Some(_)) => false,
                };
                if !accepted {
                    let expected = match langcode {
                        Some(requested) => format!("a literal tagged \"{requested}\""),
                        None => "a language-tagged literal".to_owned(),
                    };
                    return Err(mismatch(target, expected, term.to_string()));
                }
                Ok(FieldValue::String(literal.value().to_owned()))
            }
            (FieldFormat::Literal, TermRef::Literal(literal)) => self.decode_literal(target, literal),
            (FieldFormat::TranslatableLiteral | FieldFormat::Literal, _) => {
                Err(mismatch(target, "a literal", term.to_string()))
            }
        }
    }

    fn decode_literal(
        &self,
        target: EncodingTarget<'_>,
        literal: LiteralRef<'_>,
    ) -> MappingResult<FieldValue> {
        let converter = self.registry.converter(target.data_type)?;
        let value = converter.from_lexical(literal.value()).map_err(|error| {
            let reason = match error {
                ConversionError::InvalidLexical { reason, .. } => reason,
                other => other.to_string(),
            };
            MalformedLiteralError {
                field: target.field.to_owned(),
                data_type: target.data_type,
                lexical: literal.value().to_owned(),
                reason,
            }
        })?;
        Ok(value)
    }
}

fn mismatch(
    target: EncodingTarget<'_>,
    expected: impl Into<String>,
    found: impl Into<String>,
) -> MappingError {
    TypeMismatchError::new(target.field, expected, found).into()
}

fn conversion_mismatch(target: EncodingTarget<'_>, error: ConversionError) -> MappingError {
    let expected = format!("a {} value", target.data_type);
    match error {
        ConversionError::UnexpectedValue { found, .. } => {
            mismatch(target, expected, format!("a value of kind {found}"))
        }
        ConversionError::InvalidLexical {
            lexical, reason, ..
        } => mismatch(target, expected, format!("\"{lexical}\" ({reason})")),
    }
}
