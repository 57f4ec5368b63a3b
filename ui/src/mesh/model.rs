//! Serde model of a Mesh `tour` node as returned by the REST API with
//! `expandAll=true&resolveLinks=short`.
//!
//! Everything except the node uuid is optional: content editors can leave
//! fields empty and the view renders such gaps as empty fragments. Numbers
//! are read leniently (`12`, `12.0` and `"12"` are all twelve) and a value of
//! the wrong shape decodes as absent instead of failing the whole node.

use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub uuid: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub fields: TourFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TourFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub size: Option<u32>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// `null` and a missing list both mean no dates.
    #[serde(default, deserialize_with = "lenient::list")]
    pub dates: Vec<TourDate>,
}

/// Expanded node reference to an image node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub uuid: Option<String>,
    /// Webroot path, e.g. `/images/harbour.jpg`.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub fields: ImageFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageFields {
    #[serde(default)]
    pub attribution: Option<String>,
}

/// One entry of the `dates` micronode list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TourDate {
    #[serde(default)]
    pub fields: TourDateFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TourDateFields {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub seats: Option<u32>,
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(as_f64).and_then(|n| {
            (n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n)).then_some(n as u32)
        }))
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(as_f64).filter(|n| n.is_finite()))
    }

    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }

    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl Tour {
    /// Earliest date at or after `now` that still has free seats.
    /// Dates that fail to parse are skipped.
    pub fn next_bookable(&self, now: OffsetDateTime) -> Option<(OffsetDateTime, u32)> {
        self.fields
            .dates
            .iter()
            .filter_map(|entry| {
                let seats = entry.fields.seats.filter(|&seats| seats > 0)?;
                let raw = entry.fields.date.as_deref()?;
                match OffsetDateTime::parse(raw, &Rfc3339) {
                    Ok(date) => Some((date, seats)),
                    Err(err) => {
                        tracing::warn!(tour = %self.uuid, "could not parse date `{raw}`: {err}");
                        None
                    }
                }
            })
            .filter(|(date, _)| *date >= now)
            .min_by_key(|(date, _)| *date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn tour_with_dates(dates: serde_json::Value) -> Tour {
        serde_json::from_value(json!({"uuid": "t1", "fields": {"dates": dates}})).unwrap()
    }

    #[test]
    fn decodes_expanded_node() {
        let tour: Tour = serde_json::from_value(json!({
            "uuid": "42",
            "language": "en",
            "schema": {"name": "tour"},
            "fields": {
                "title": "Harbour walk",
                "image": {
                    "uuid": "img-1",
                    "path": "/img/x.jpg",
                    "fields": {"attribution": "Photo: Jane", "binary": {}}
                },
                "size": 12,
                "price": 25.0,
                "description": "Along the docks."
            }
        }))
        .unwrap();

        assert_eq!(tour.fields.title.as_deref(), Some("Harbour walk"));
        let image = tour.fields.image.unwrap();
        assert_eq!(image.path.as_deref(), Some("/img/x.jpg"));
        assert_eq!(image.fields.attribution.as_deref(), Some("Photo: Jane"));
        assert_eq!(tour.fields.size, Some(12));
        assert!(tour.fields.dates.is_empty());
    }

    #[test]
    fn missing_fields_decode_as_absent() {
        let tour: Tour = serde_json::from_value(json!({"uuid": "42", "fields": {}})).unwrap();
        assert_eq!(tour.fields, TourFields::default());
    }

    #[test]
    fn integral_floats_count_as_whole_numbers() {
        let tour: Tour = serde_json::from_value(json!({
            "uuid": "42",
            "fields": {
                "size": 12.0,
                "price": "25.5",
                "dates": [{"fields": {"date": "2026-05-01T10:00:00Z", "seats": 3.0}}]
            }
        }))
        .unwrap();

        assert_eq!(tour.fields.size, Some(12));
        assert_eq!(tour.fields.price, Some(25.5));
        assert_eq!(tour.fields.dates[0].fields.seats, Some(3));
    }

    #[test]
    fn odd_numbers_decode_as_absent() {
        let tour: Tour = serde_json::from_value(json!({
            "uuid": "42",
            "fields": {
                "title": "Harbour walk",
                "size": 12.5,
                "price": {"amount": 25},
                "dates": [
                    {"fields": {"date": "2026-05-01T10:00:00Z", "seats": -1}},
                    {"fields": {"date": "2026-05-02T10:00:00Z", "seats": "many"}}
                ]
            }
        }))
        .unwrap();

        assert_eq!(tour.fields.title.as_deref(), Some("Harbour walk"));
        assert_eq!(tour.fields.size, None);
        assert_eq!(tour.fields.price, None);
        assert!(tour.fields.dates.iter().all(|d| d.fields.seats.is_none()));
    }

    #[test]
    fn null_values_decode_as_absent() {
        let tour: Tour = serde_json::from_value(json!({
            "uuid": "42",
            "fields": {"size": null, "price": null, "dates": null, "image": null}
        }))
        .unwrap();
        assert_eq!(tour.fields, TourFields::default());
    }

    #[test]
    fn next_bookable_picks_earliest_future_date_with_seats() {
        let tour = tour_with_dates(json!([
            {"fields": {"date": "2026-06-01T10:00:00Z", "seats": 4}},
            {"fields": {"date": "2026-05-01T10:00:00Z", "seats": 0}},
            {"fields": {"date": "2026-01-01T10:00:00Z", "seats": 9}},
            {"fields": {"date": "2026-05-15T10:00:00Z", "seats": 2}},
            {"fields": {"date": "not a date", "seats": 3}}
        ]));

        let next = tour.next_bookable(datetime!(2026-03-01 00:00 UTC));
        assert_eq!(next, Some((datetime!(2026-05-15 10:00 UTC), 2)));
    }

    #[test]
    fn next_bookable_is_none_when_sold_out() {
        let tour = tour_with_dates(json!([
            {"fields": {"date": "2026-06-01T10:00:00Z", "seats": 0}}
        ]));
        assert_eq!(tour.next_bookable(datetime!(2026-03-01 00:00 UTC)), None);
    }
}
