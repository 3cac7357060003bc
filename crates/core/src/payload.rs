//! Wire shape of a sync batch item as sent by the mobile client.
//!
//! Field names follow the client's JSON (`id_arvore`, `nome_popular`, ...).
//! Devices build these payloads from text inputs, so numeric fields accept
//! either JSON numbers or numeric strings, and blank strings count as absent.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::media::{persistable_uri, DEFAULT_PHOTO_CATEGORY};
use crate::pest::normalize_pest_names;
use crate::types::{DbId, Timestamp};

/// Interpret a client-supplied numeric id.
///
/// Accepts JSON integers, integral floats and strings holding an integer.
/// Anything else (null, fractional numbers, free text) is treated as absent.
///
/// ```
/// use arbor_core::payload::parse_db_id;
/// use serde_json::json;
///
/// assert_eq!(parse_db_id(&json!(12)), Some(12));
/// assert_eq!(parse_db_id(&json!(" 7 ")), Some(7));
/// assert_eq!(parse_db_id(&json!("ipê")), None);
/// ```
pub fn parse_db_id(raw: &Value) -> Option<DbId> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as DbId)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Render a scalar JSON value as trimmed text; blanks and non-scalars are absent.
fn scalar_text(raw: &Value) -> Option<String> {
    let text = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }))
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(parse_db_id)
        .and_then(|v| i32::try_from(v).ok()))
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// One `{ tree, inspection }` pair of a sync batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncItem {
    #[serde(default)]
    pub tree: Option<TreePayload>,
    #[serde(default)]
    pub inspection: Option<InspectionPayload>,
}

/// Locally authored tree record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreePayload {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default, rename = "id_arvore")]
    pub server_id: Option<Value>,
    #[serde(default, rename = "numero_etiqueta")]
    pub tag: Option<Value>,
    #[serde(default, rename = "nome_popular")]
    pub display_name: Option<String>,
    #[serde(default, rename = "speciesId")]
    pub species_id: Option<Value>,
    #[serde(default)]
    pub cover_photo: Option<String>,
    #[serde(default, rename = "rua")]
    pub street: Option<String>,
    #[serde(default, rename = "numero")]
    pub number: Option<Value>,
    #[serde(default, rename = "bairro")]
    pub neighborhood: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lng: Option<f64>,
}

impl TreePayload {
    /// Client identity, if the device assigned one.
    pub fn uuid(&self) -> Option<&str> {
        non_blank(self.uuid.as_ref())
    }

    /// Server-assigned id the device learned on an earlier sync.
    pub fn server_id(&self) -> Option<DbId> {
        self.server_id.as_ref().and_then(parse_db_id)
    }

    /// Human tag/label painted on or attached to the tree.
    pub fn tag(&self) -> Option<String> {
        self.tag.as_ref().and_then(scalar_text)
    }

    pub fn display_name(&self) -> Option<&str> {
        non_blank(self.display_name.as_ref())
    }

    pub fn street(&self) -> Option<&str> {
        non_blank(self.street.as_ref())
    }

    pub fn number(&self) -> Option<String> {
        self.number.as_ref().and_then(scalar_text)
    }

    pub fn neighborhood(&self) -> Option<&str> {
        non_blank(self.neighborhood.as_ref())
    }

    /// `(latitude, longitude)` when both are supplied.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lng?))
    }
}

/// Locally authored inspection record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InspectionPayload {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default, rename = "data_inspecao")]
    pub inspected_on: Option<String>,
    #[serde(default)]
    pub tree_removed: Option<bool>,
    #[serde(default)]
    pub dendrometric: Option<DendrometricPayload>,
    #[serde(default)]
    pub phytosanitary: Option<PhytosanitaryPayload>,
    #[serde(default)]
    pub management: Option<ManagementPayload>,
    #[serde(default)]
    pub photos: Option<Vec<PhotoPayload>>,
}

impl InspectionPayload {
    pub fn uuid(&self) -> Option<&str> {
        non_blank(self.uuid.as_ref())
    }

    /// When the visit happened, defaulting to `now`.
    pub fn inspected_at(&self, now: Timestamp) -> Timestamp {
        non_blank(self.inspected_on.as_ref())
            .and_then(parse_timestamp)
            .unwrap_or(now)
    }

    /// Canonical pest names mentioned in the phytosanitary section.
    pub fn pest_names(&self) -> Vec<String> {
        self.phytosanitary
            .as_ref()
            .and_then(|p| p.pests.as_deref())
            .map(normalize_pest_names)
            .unwrap_or_default()
    }

    /// Photos that may be stored canonically.
    pub fn persistable_photos(&self) -> Vec<PhotoRef> {
        self.photos
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|photo| {
                let uri = persistable_uri(photo.uri.as_deref())?;
                Some(PhotoRef {
                    uri: uri.to_string(),
                    category: non_blank(photo.category.as_ref())
                        .unwrap_or(DEFAULT_PHOTO_CATEGORY)
                        .to_string(),
                    is_cover: photo.is_cover.unwrap_or(false),
                })
            })
            .collect()
    }
}

/// Accepts RFC 3339 timestamps, naive date-times and plain dates (UTC midnight).
fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Trunk and crown measurements.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DendrometricPayload {
    /// Diameter at breast height, centimetres.
    #[serde(default, rename = "dap", deserialize_with = "lenient_f64")]
    pub dbh_cm: Option<f64>,
    #[serde(default, rename = "altura_total", deserialize_with = "lenient_f64")]
    pub total_height_m: Option<f64>,
    #[serde(default, rename = "altura_copa", deserialize_with = "lenient_f64")]
    pub crown_height_m: Option<f64>,
    #[serde(default, rename = "diametro_copa", deserialize_with = "lenient_f64")]
    pub crown_diameter_m: Option<f64>,
}

/// Health assessment and risk ratings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhytosanitaryPayload {
    #[serde(default, rename = "estado_saude")]
    pub health_status: Option<String>,
    #[serde(default, rename = "severidade", deserialize_with = "lenient_i32")]
    pub severity: Option<i32>,
    #[serde(default, rename = "probabilidade", deserialize_with = "lenient_i32")]
    pub probability: Option<i32>,
    #[serde(default, rename = "consequencia", deserialize_with = "lenient_i32")]
    pub consequence: Option<i32>,
    #[serde(default, rename = "pragas")]
    pub pests: Option<Vec<String>>,
}

/// Recommended management action.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManagementPayload {
    #[serde(default, rename = "necessita_manejo")]
    pub needs_management: Option<bool>,
    #[serde(default, rename = "tipo_manejo")]
    pub action_type: Option<String>,
    #[serde(default, rename = "subtipos")]
    pub subtypes: Option<Vec<String>>,
    #[serde(default, rename = "justificativa")]
    pub justification: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoPayload {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub is_cover: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A photo reference that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef {
    pub uri: String,
    pub category: String,
    pub is_cover: bool,
}
