use serde::{Deserialize, Serialize};

// free stock photos of damaged cars
const CRASH_PHOTO: &str = "https://cdn.pixabay.com/photo/2016/04/05/01/49/crash-1308575_1280.jpg";
const DAMAGE_PHOTO: &str =
    "https://cdn.pixabay.com/photo/2015/02/16/10/54/insurance-539659_1280.jpg";

/// A customer's damage request as body shops see it. Reference data only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: i64,
    pub vehicle: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub vin: String,
    pub damage: String,
    pub insurance_value: i64,
    pub location: String,
    pub created_at: String,
    pub additional_notes: Option<String>,
    pub image_labels: Vec<String>,
    pub image_urls: Vec<String>,
}

/// The fixed demo dataset.
#[derive(Clone, Debug)]
pub struct Catalog {
    requests: Vec<ServiceRequest>,
}

impl Catalog {
    pub fn new(requests: Vec<ServiceRequest>) -> Self {
        Self { requests }
    }

    pub fn demo() -> Self {
        Self::new(vec![
            ServiceRequest {
                id: 1,
                vehicle: "2022 Toyota Camry".into(),
                make: "Toyota".into(),
                model: "Camry".into(),
                year: "2022".into(),
                vin: "4T1BF1FK5NU123456".into(),
                damage: "Front bumper and headlight damage".into(),
                insurance_value: 18000,
                location: "New York, NY".into(),
                created_at: "2024-01-15".into(),
                additional_notes: Some(
                    "Driver side headlight broken. Bumper has crack and paint damage.".into(),
                ),
                image_labels: strings(&[
                    "Front view",
                    "Rear view",
                    "Left side",
                    "Right side",
                    "Damage close-up",
                    "Engine bay",
                ]),
                image_urls: strings(&[
                    CRASH_PHOTO,
                    CRASH_PHOTO,
                    CRASH_PHOTO,
                    DAMAGE_PHOTO,
                    CRASH_PHOTO,
                    DAMAGE_PHOTO,
                ]),
            },
            ServiceRequest {
                id: 2,
                vehicle: "2021 Honda Accord".into(),
                make: "Honda".into(),
                model: "Accord".into(),
                year: "2021".into(),
                vin: "1HGCV1F13MA123456".into(),
                damage: "Left door and fender damage".into(),
                insurance_value: 14000,
                location: "Brooklyn, NY".into(),
                created_at: "2024-01-17".into(),
                additional_notes: Some(
                    "Dent on driver door, fender scratch. No structural damage.".into(),
                ),
                image_labels: strings(&[
                    "Front view",
                    "Rear view",
                    "Left side (damage)",
                    "Right side",
                    "Damage close-up",
                ]),
                image_urls: strings(&[
                    CRASH_PHOTO,
                    CRASH_PHOTO,
                    CRASH_PHOTO,
                    DAMAGE_PHOTO,
                    DAMAGE_PHOTO,
                ]),
            },
            ServiceRequest {
                id: 3,
                vehicle: "2020 BMW 3 Series".into(),
                make: "BMW".into(),
                model: "3 Series".into(),
                year: "2020".into(),
                vin: "3MW5R7C05L8B12345".into(),
                damage: "Rear bumper and trunk damage".into(),
                insurance_value: 22000,
                location: "Queens, NY".into(),
                created_at: "2024-01-18".into(),
                additional_notes: Some("Rear collision. Trunk latch may need adjustment.".into()),
                image_labels: strings(&[
                    "Front view",
                    "Rear view",
                    "Left side",
                    "Right side",
                    "Damage close-up",
                    "Trunk interior",
                    "Rear bumper",
                    "Wheel well",
                ]),
                image_urls: strings(&[
                    CRASH_PHOTO,
                    CRASH_PHOTO,
                    CRASH_PHOTO,
                    CRASH_PHOTO,
                    DAMAGE_PHOTO,
                    DAMAGE_PHOTO,
                    DAMAGE_PHOTO,
                    CRASH_PHOTO,
                ]),
            },
            ServiceRequest {
                id: 4,
                vehicle: "2019 Mercedes C-Class".into(),
                make: "Mercedes-Benz".into(),
                model: "C-Class".into(),
                year: "2019".into(),
                vin: "55SWF4KB8KU123456".into(),
                damage: "Front bumper, hood and headlight damage".into(),
                insurance_value: 25000,
                location: "Manhattan, NY".into(),
                created_at: "2024-01-16".into(),
                additional_notes: Some("Hood bent, both headlights. Requesting OEM parts.".into()),
                image_labels: strings(&[
                    "Front view",
                    "Rear view",
                    "Left side",
                    "Right side",
                    "Hood damage",
                    "Headlight",
                    "Engine bay",
                ]),
                image_urls: strings(&[
                    CRASH_PHOTO,
                    CRASH_PHOTO,
                    CRASH_PHOTO,
                    DAMAGE_PHOTO,
                    CRASH_PHOTO,
                    DAMAGE_PHOTO,
                    DAMAGE_PHOTO,
                ]),
            },
        ])
    }

    pub fn requests(&self) -> &[ServiceRequest] {
        &self.requests
    }

    pub fn find(&self, id: i64) -> Option<&ServiceRequest> {
        self.requests.iter().find(|request| request.id == id)
    }

    /// Vehicle label, or `#id` for requests outside the catalog.
    pub fn vehicle_label(&self, id: i64) -> String {
        self.find(id)
            .map(|request| request.vehicle.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[test]
fn demo_catalog_lookup() {
    let catalog = Catalog::demo();

    assert_eq!(catalog.requests().len(), 4);
    assert_eq!(catalog.find(3).map(|r| r.vehicle.as_str()), Some("2020 BMW 3 Series"));
    assert_eq!(catalog.find(9), None);
    assert_eq!(catalog.vehicle_label(1), "2022 Toyota Camry");
    assert_eq!(catalog.vehicle_label(9), "#9");

    for request in catalog.requests() {
        assert_eq!(request.image_labels.len(), request.image_urls.len());
    }
}
