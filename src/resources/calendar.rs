//! Calendar booking operations.

use crate::{client::Client, error::Result, request::RequestSpec, resources::to_body};
use http::Method;
use serde::{Deserialize, Serialize};

/// Who an attendee is from the platform's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendeeKind {
    Customer,
    Employee,
}

/// One participant on a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub kind: AttendeeKind,
}

/// Free-form booking metadata. Unknown fields are preserved round-trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A calendar booking as the server returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct Booking {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub instructions: Option<String>,
    pub slot_ids: Vec<String>,
    #[serde(default)]
    pub metadata: Option<BookingMetadata>,
    pub created_ts: String,
}

/// Input for booking an appointment. Slot ids and title are required.
#[derive(Debug, Clone, Serialize)]
pub struct BookingCreate {
    pub slot_ids: Vec<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BookingMetadata>,
}

impl BookingCreate {
    /// Creates an input with the required fields and no options set.
    pub fn new(slot_ids: Vec<String>, title: impl Into<String>) -> Self {
        Self {
            slot_ids,
            title: title.into(),
            instructions: None,
            metadata: None,
        }
    }
}

impl Client {
    /// Books an appointment on the given availability slots.
    pub async fn book_appointment(&self, input: BookingCreate) -> Result<Booking> {
        let spec =
            RequestSpec::new(Method::POST, "/person-calendar/book").with_body(to_body(&input)?);
        self.execute(spec).await
    }

    /// Searches for available appointment slots with free-form filters.
    pub async fn search_availability(
        &self,
        filters: impl IntoIterator<Item = (String, String)>,
    ) -> Result<serde_json::Value> {
        let spec =
            RequestSpec::new(Method::GET, "/person-calendar/search").with_query_pairs(filters);
        self.execute(spec).await
    }

    /// Fetches one booking by id.
    pub async fn get_booking(&self, booking_id: &str) -> Result<Booking> {
        self.execute(RequestSpec::new(
            Method::GET,
            format!("/person-calendar/{booking_id}"),
        ))
        .await
    }

    /// Cancels a booking by id.
    pub async fn cancel_booking(&self, booking_id: &str) -> Result<()> {
        self.execute_empty(RequestSpec::new(
            Method::DELETE,
            format!("/person-calendar/{booking_id}"),
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendee_kind_uses_wire_name() {
        let attendee = Attendee {
            name: "Mike".to_string(),
            email: None,
            phone: Some("+1 555 9999".to_string()),
            kind: AttendeeKind::Customer,
        };
        let body = serde_json::to_value(&attendee).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "name": "Mike",
                "phone": "+1 555 9999",
                "type": "customer",
            })
        );
    }

    #[test]
    fn metadata_preserves_unknown_fields() {
        let json = r#"{"task_id": "t-1", "crew_size": 3}"#;
        let metadata: BookingMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(metadata.task_id, Some("t-1".to_string()));
        assert_eq!(metadata.extra.get("crew_size"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn booking_input_skips_unset_fields() {
        let input = BookingCreate::new(vec!["slot-1".to_string()], "Service call");
        let body = serde_json::to_value(&input).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "slot_ids": ["slot-1"],
                "title": "Service call",
            })
        );
    }
}
