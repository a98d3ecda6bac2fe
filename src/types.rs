use serde::{Deserialize, Serialize};

/// Hostaway wraps every payload as `{"status": "success", "result": ...}`.
/// List endpoints add the paging fields.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: String,
    pub result: T,
    pub count: Option<u64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub page: Option<u64>,
    #[serde(rename = "totalPages")]
    pub total_pages: Option<u64>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub internal_listing_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub person_capacity: Option<u32>,
    pub bedrooms_number: Option<u32>,
    pub bathrooms_number: Option<f64>,
    pub price: Option<f64>,
    pub currency_code: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Option<i64>,
    pub listing_map_id: Option<i64>,
    pub channel_id: Option<i64>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub number_of_guests: Option<u32>,
    pub arrival_date: Option<String>,
    pub departure_date: Option<String>,
    pub total_price: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_list_envelope_with_missing_fields() {
        let body = json!({
            "status": "success",
            "result": [
                {"id": 42, "name": "Loft", "city": "Austin", "personCapacity": 4},
                {"id": 43}
            ],
            "count": 2,
            "limit": 20,
            "offset": 0
        });

        let response: ApiResponse<Vec<Listing>> = serde_json::from_value(body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.count, Some(2));
        assert_eq!(response.total_pages, None);
        assert_eq!(response.result[0].city.as_deref(), Some("Austin"));
        assert_eq!(response.result[0].person_capacity, Some(4));
        assert_eq!(response.result[1], Listing { id: Some(43), ..Default::default() });
    }

    #[test]
    fn decodes_reservation_camel_case() {
        let reservation: Reservation = serde_json::from_value(json!({
            "id": 7,
            "listingMapId": 42,
            "guestName": "Ada",
            "arrivalDate": "2024-05-01",
            "departureDate": "2024-05-04",
            "totalPrice": 512.5,
            "unknownField": true
        }))
        .unwrap();

        assert_eq!(reservation.listing_map_id, Some(42));
        assert_eq!(reservation.guest_name.as_deref(), Some("Ada"));
        assert_eq!(reservation.total_price, Some(512.5));
        assert_eq!(reservation.status, None);
    }
}
