use serde::Deserialize;

use crate::domain::ticket::optional_scalar;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PatientProfile {
    #[serde(default, deserialize_with = "optional_scalar")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub medical_record_number: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
}
