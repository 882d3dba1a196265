use bson::{Bson, Document};
use marquee_pipeline::fields;

use crate::convert;
use crate::error::{CoercionFailure, FieldCoercionError};
use crate::model::{PrincipalWithPerson, Title};

const GENRE_DELIMITER: char = ',';

/// Map the person→titles results, skipping documents whose join found no title.
pub fn map_titles(docs: &[Document]) -> Result<Vec<Title>, FieldCoercionError> {
    docs.iter()
        .filter_map(|doc| map_title(doc).transpose())
        .collect()
}

/// Map one person→titles result. `Ok(None)` means the join matched nothing.
pub fn map_title(doc: &Document) -> Result<Option<Title>, FieldCoercionError> {
    let Some(title) = nested_document(doc, fields::TITLE_INFO)? else {
        return Ok(None);
    };

    let genres = convert::empty_string_to_absent(optional_str(title, "genres")?);

    Ok(Some(Title {
        tconst: required_string(title, fields::TCONST)?,
        title_type: optional_string(title, "titleType")?,
        primary_title: optional_string(title, "primaryTitle")?,
        original_title: optional_string(title, "originalTitle")?,
        is_adult: convert::integer_to_boolean(required_integer(title, "isAdult")?),
        start_year: optional_integer(title, "startYear")?,
        end_year: sentinel_integer(title, "endYear")?,
        runtime_minutes: optional_integer(title, "runtimeMinutes")?,
        genres: convert::delimited_string_to_list(genres, GENRE_DELIMITER),
    }))
}

pub fn map_principals(docs: Vec<Document>) -> Result<Vec<PrincipalWithPerson>, FieldCoercionError> {
    docs.into_iter().map(map_principal).collect()
}

/// Map one title→people result. The joined person loses its `_id`.
pub fn map_principal(mut doc: Document) -> Result<PrincipalWithPerson, FieldCoercionError> {
    let tconst = required_string(&doc, fields::TCONST)?;
    let nconst = required_string(&doc, fields::NCONST)?;
    let category = lenient_string(&doc, fields::CATEGORY);

    let person = match doc.remove(fields::PERSON) {
        None | Some(Bson::Null) => None,
        Some(Bson::Document(person)) => Some(person),
        Some(Bson::Array(items)) => match items.into_iter().next() {
            None => None,
            Some(Bson::Document(person)) => Some(person),
            Some(other) => return Err(wrong_type(fields::PERSON, "document", &other)),
        },
        Some(other) => return Err(wrong_type(fields::PERSON, "document", &other)),
    };

    Ok(PrincipalWithPerson {
        tconst,
        nconst,
        category,
        person: person.map(strip_identity),
    })
}

fn strip_identity(mut person: Document) -> Document {
    person.remove(fields::ID);
    person
}

/// A joined sub-document stored either directly or as the first element of
/// the lookup array.
fn nested_document<'a>(
    doc: &'a Document,
    field: &str,
) -> Result<Option<&'a Document>, FieldCoercionError> {
    match present(doc, field) {
        None => Ok(None),
        Some(Bson::Document(nested)) => Ok(Some(nested)),
        Some(Bson::Array(items)) => match items.first() {
            None => Ok(None),
            Some(Bson::Document(nested)) => Ok(Some(nested)),
            Some(other) => Err(wrong_type(field, "document", other)),
        },
        Some(other) => Err(wrong_type(field, "document", other)),
    }
}

/// Null counts as absent.
fn present<'a>(doc: &'a Document, field: &str) -> Option<&'a Bson> {
    doc.get(field).filter(|value| !matches!(value, Bson::Null))
}

fn optional_str<'a>(doc: &'a Document, field: &str) -> Result<Option<&'a str>, FieldCoercionError> {
    match present(doc, field) {
        None => Ok(None),
        Some(Bson::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(wrong_type(field, "string", other)),
    }
}

fn optional_string(doc: &Document, field: &str) -> Result<Option<String>, FieldCoercionError> {
    Ok(optional_str(doc, field)?.map(str::to_string))
}

/// Role categories are open-ended; a value that is not a string is kept out of
/// the record instead of failing the whole result.
fn lenient_string(doc: &Document, field: &str) -> Option<String> {
    match present(doc, field) {
        Some(Bson::String(value)) => Some(value.clone()),
        _ => None,
    }
}

fn required_string(doc: &Document, field: &str) -> Result<String, FieldCoercionError> {
    optional_string(doc, field)?.ok_or_else(|| FieldCoercionError::new(field, CoercionFailure::Missing))
}

fn integer(field: &str, value: &Bson) -> Result<i64, FieldCoercionError> {
    match value {
        Bson::Int32(v) => Ok(i64::from(*v)),
        Bson::Int64(v) => Ok(*v),
        other => Err(wrong_type(field, "integer", other)),
    }
}

fn narrow(field: &str, value: i64) -> Result<i32, FieldCoercionError> {
    i32::try_from(value).map_err(|_| FieldCoercionError::new(field, CoercionFailure::OutOfRange(value)))
}

fn required_integer(doc: &Document, field: &str) -> Result<i64, FieldCoercionError> {
    let value = present(doc, field)
        .ok_or_else(|| FieldCoercionError::new(field, CoercionFailure::Missing))?;
    integer(field, value)
}

fn optional_integer(doc: &Document, field: &str) -> Result<Option<i32>, FieldCoercionError> {
    present(doc, field)
        .map(|value| narrow(field, integer(field, value)?))
        .transpose()
}

/// An integer stored as text, with `""` meaning unknown.
fn sentinel_integer(doc: &Document, field: &str) -> Result<Option<i32>, FieldCoercionError> {
    match present(doc, field) {
        None => Ok(None),
        Some(Bson::String(text)) => match convert::empty_string_to_absent(Some(text.as_str())) {
            None => Ok(None),
            Some(text) => text.parse::<i32>().map(Some).map_err(|_| {
                FieldCoercionError::new(field, CoercionFailure::NotAnInteger(text.to_string()))
            }),
        },
        Some(value) => Ok(Some(narrow(field, integer(field, value)?)?)),
    }
}

fn wrong_type(field: &str, expected: &'static str, found: &Bson) -> FieldCoercionError {
    FieldCoercionError::new(
        field,
        CoercionFailure::WrongType {
            expected,
            found: found.element_type(),
        },
    )
}
