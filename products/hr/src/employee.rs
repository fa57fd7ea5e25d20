use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::{Map, Number, Value};

use crate::error::{FetchError, FetchResult, RecordError};

/// Integer value of a record's `id` field.
pub type EmployeeId = i64;

/// Records in the order they were returned to the caller.
pub type EmployeeList = Vec<EmployeeRecord>;

const ID_FIELD: &str = "id";

/// One employee entry as served by the HR endpoint.
///
/// Only `id` is validated. Every other field is kept verbatim, and the record
/// serializes back to an object deep-equal to the one it was built from (a
/// string id stays a string). Key order is not preserved.
#[derive(Clone, Debug)]
pub struct EmployeeRecord {
    id: EmployeeId,
    fields: Map<String, Value>,
}

impl EmployeeRecord {
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl PartialEq for EmployeeRecord {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl TryFrom<Value> for EmployeeRecord {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(fields) = value else {
            return Err(RecordError::NotAnObject { index: 0 });
        };
        let raw = fields
            .get(ID_FIELD)
            .ok_or(RecordError::MissingId { index: 0 })?;
        let id = parse_id(raw).ok_or_else(|| RecordError::InvalidId {
            index: 0,
            value: raw.to_string(),
        })?;
        Ok(Self { id, fields })
    }
}

impl Serialize for EmployeeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EmployeeRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        EmployeeRecord::try_from(value).map_err(de::Error::custom)
    }
}

/// Integer ids arrive either as JSON integers or as decimal strings with an
/// optional sign. Floats, booleans, and values outside `i64` are rejected.
fn parse_id(value: &Value) -> Option<EmployeeId> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| negative_zero(number)),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

/// serde_json decodes the integer literal `-0` as a float.
fn negative_zero(number: &Number) -> Option<EmployeeId> {
    number
        .as_f64()
        .filter(|f| *f == 0.0 && f.is_sign_negative())
        .map(|_| 0)
}

/// Validate an already-decoded response body.
///
/// The body must be an array and every element a valid record; the first bad
/// element fails the whole list. Records come back in input order.
pub fn parse_employee_list(body: Value) -> FetchResult<EmployeeList> {
    let Value::Array(items) = body else {
        return Err(FetchError::not_a_list());
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| EmployeeRecord::try_from(item).map_err(|err| err.at(index)))
        .collect::<Result<EmployeeList, _>>()
        .map_err(FetchError::from)
}

/// Stable ascending sort by integer id.
pub fn sort_employees(records: &mut [EmployeeRecord]) {
    records.sort_by_key(EmployeeRecord::id);
}
