//! Single-value conversions applied while mapping documents.

/// 1 is true, every other integer is false.
pub fn integer_to_boolean(value: i64) -> bool {
    value == 1
}

/// The empty string is the source data's "unknown" sentinel.
pub fn empty_string_to_absent(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Split on `delimiter`, keeping order and every piece as-is.
pub fn delimited_string_to_list(value: Option<&str>, delimiter: char) -> Option<Vec<String>> {
    value.map(|v| v.split(delimiter).map(str::to_string).collect())
}
