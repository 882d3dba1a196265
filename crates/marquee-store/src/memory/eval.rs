use bson::{Bson, Document};
use marquee_pipeline::{Filter, Lookup, Operator, Projection, Stage, fields};

use crate::error::StoreError;

/// Reject stages the document engine would refuse to parse.
pub(crate) fn validate(stages: &[Stage]) -> Result<(), StoreError> {
    for stage in stages {
        match stage {
            Stage::Match(filter) => {
                require_path(&filter.field, "$match")?;
                if filter.operator != Operator::Eq && !matches!(filter.value, Bson::Array(_)) {
                    return Err(StoreError::InvalidPipeline(format!(
                        "$in/$nin on {} needs an array",
                        filter.field
                    )));
                }
            }
            Stage::Lookup(lookup) => {
                require_path(&lookup.from, "$lookup.from")?;
                require_path(&lookup.local_field, "$lookup.localField")?;
                require_path(&lookup.foreign_field, "$lookup.foreignField")?;
                require_path(&lookup.as_field, "$lookup.as")?;
            }
            Stage::Project(projection) => {
                if projection.first_elements.is_empty() {
                    return Err(StoreError::InvalidPipeline(
                        "$project must include at least one field".into(),
                    ));
                }
                for name in &projection.first_elements {
                    require_path(name, "$project")?;
                }
            }
        }
    }
    Ok(())
}

fn require_path(path: &str, context: &str) -> Result<(), StoreError> {
    if path.is_empty() {
        return Err(StoreError::InvalidPipeline(format!(
            "{context}: field path must not be empty"
        )));
    }
    Ok(())
}

/// Missing fields compare as null. Comparison is type-exact `Bson` equality:
/// `Int32(1)` does not equal `Int64(1)` and an array field does not match its
/// elements.
fn field<'a>(doc: &'a Document, name: &str) -> &'a Bson {
    doc.get(name).unwrap_or(&Bson::Null)
}

pub(crate) fn matches(filter: &Filter, doc: &Document) -> bool {
    let value = field(doc, &filter.field);
    match (&filter.operator, &filter.value) {
        (Operator::Eq, expected) => value == expected,
        (Operator::In, Bson::Array(candidates)) => candidates.contains(value),
        (Operator::Nin, Bson::Array(candidates)) => !candidates.contains(value),
        // validate() rejects set operators without an array
        _ => false,
    }
}

pub(crate) fn lookup(lookup: &Lookup, mut doc: Document, foreign: &[&Document]) -> Document {
    let key = field(&doc, &lookup.local_field).clone();
    let joined: Vec<Bson> = foreign
        .iter()
        .filter(|other| field(other, &lookup.foreign_field) == &key)
        .map(|other| Bson::Document((*other).clone()))
        .collect();
    doc.insert(lookup.as_field.clone(), Bson::Array(joined));
    doc
}

pub(crate) fn project(projection: &Projection, mut doc: Document) -> Result<Document, StoreError> {
    let mut out = Document::new();

    if !projection.suppress_id {
        if let Some(id) = doc.remove(fields::ID) {
            out.insert(fields::ID, id);
        }
    }

    for name in &projection.first_elements {
        match doc.remove(name) {
            Some(Bson::Array(items)) => {
                // past the end: field is omitted
                if let Some(first) = items.into_iter().next() {
                    out.insert(name.clone(), first);
                }
            }
            None | Some(Bson::Null) => {
                out.insert(name.clone(), Bson::Null);
            }
            Some(other) => {
                return Err(StoreError::InvalidPipeline(format!(
                    "$arrayElemAt on {name}: expected array, found {:?}",
                    other.element_type()
                )));
            }
        }
    }

    Ok(out)
}
