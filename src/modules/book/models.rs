use serde::{de, de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Simplified book metadata returned by `GET /book/{isbn}/`.
///
/// Every field is always present on the wire; values missing upstream are
/// empty strings or empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    pub title: String,
    /// Author names in upstream order
    pub authors: Vec<String>,
    /// Publisher names in upstream order
    pub publishers: Vec<String>,
    pub publish_date: String,
    pub isbn_10: Vec<String>,
    pub isbn_13: Vec<String>,
    /// Large cover image URL, or empty
    pub cover: String,
}

/// One edition entry of an Open Library `jscmd=data` response.
///
/// Optional fields decode to `None` when absent or `null`; the defaults are
/// applied once, in `From<EditionData> for BookRecord`.
#[derive(Debug, Deserialize)]
pub(crate) struct EditionData {
    title: Option<String>,
    authors: Option<Vec<NamedEntry>>,
    publishers: Option<Vec<NamedEntry>>,
    publish_date: Option<String>,
    #[serde(default, deserialize_with = "optional_object")]
    identifiers: Option<Identifiers>,
    #[serde(default, deserialize_with = "cover_url")]
    cover: String,
}

/// Author or publisher reference. Must be an object with a `name`: anything
/// else rejects the whole record.
#[derive(Debug)]
struct NamedEntry(String);

#[derive(Deserialize)]
struct NamedFields {
    name: String,
}

impl<'de> Deserialize<'de> for NamedEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        from_object::<_, NamedFields>(deserializer).map(|fields| NamedEntry(fields.name))
    }
}

#[derive(Debug, Deserialize)]
struct Identifiers {
    isbn_10: Option<Vec<String>>,
    isbn_13: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct Cover {
    large: Option<String>,
}

/// Decode `T` from a JSON object only. Derived struct visitors also accept
/// sequences as positional fields, which upstream never means.
fn from_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let map = Map::<String, Value>::deserialize(deserializer)?;
    serde_json::from_value(Value::Object(map)).map_err(de::Error::custom)
}

fn optional_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Map<String, Value>>::deserialize(deserializer)? {
        Some(map) => serde_json::from_value(Value::Object(map))
            .map(Some)
            .map_err(de::Error::custom),
        None => Ok(None),
    }
}

/// `cover.large` when `cover` is a non-empty object; empty for any falsy
/// value (`null`, `false`, `0`, `""`, `[]`, `{}`). Other values are rejected.
fn cover_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(map) if !map.is_empty() => {
            let cover: Cover =
                serde_json::from_value(Value::Object(map)).map_err(de::Error::custom)?;
            Ok(cover.large.unwrap_or_default())
        }
        value if is_falsy(&value) => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "invalid cover {}, expected an object",
            other
        ))),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn names(entries: Option<Vec<NamedEntry>>) -> Vec<String> {
    entries
        .unwrap_or_default()
        .into_iter()
        .map(|NamedEntry(name)| name)
        .collect()
}

impl From<EditionData> for BookRecord {
    fn from(data: EditionData) -> Self {
        let (isbn_10, isbn_13) = match data.identifiers {
            Some(ids) => (
                ids.isbn_10.unwrap_or_default(),
                ids.isbn_13.unwrap_or_default(),
            ),
            None => (Vec::new(), Vec::new()),
        };

        BookRecord {
            title: data.title.unwrap_or_default(),
            authors: names(data.authors),
            publishers: names(data.publishers),
            publish_date: data.publish_date.unwrap_or_default(),
            isbn_10,
            isbn_13,
            cover: data.cover,
        }
    }
}
