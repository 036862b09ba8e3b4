use serde::Serialize;
use serde_json::Value;

use crate::filter::SqlValue;
use crate::validation::{has_required, int_field, text_field, Invalid};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appointment {
    pub appointment_id: i64,
    pub pet_id: i64,
    pub vet_id: i64,
    pub appointment_date: String,
    pub appointment_time: String,
    pub reason: String,
    pub status: String,
}

impl Appointment {
    const REQUIRED: [&'static str; 4] = ["appointment_date", "appointment_time", "reason", "status"];
    const MISSING: &'static str = "appointment_date, appointment_time, reason, and status are required";

    pub fn from_create(body: &Value) -> Result<Self, Invalid> {
        let ids = (
            int_field(body, "appointment_id"),
            int_field(body, "pet_id"),
            int_field(body, "vet_id"),
        );
        let (Some(appointment_id), Some(pet_id), Some(vet_id)) = ids else {
            return Err(Invalid("appointment_id, pet_id, and vet_id must be integers"));
        };
        Self::from_body(appointment_id, pet_id, vet_id, body)
    }

    pub fn from_update(appointment_id: i64, body: &Value) -> Result<Self, Invalid> {
        let (Some(pet_id), Some(vet_id)) = (int_field(body, "pet_id"), int_field(body, "vet_id")) else {
            return Err(Invalid("pet_id and vet_id must be integers"));
        };
        Self::from_body(appointment_id, pet_id, vet_id, body)
    }

    fn from_body(appointment_id: i64, pet_id: i64, vet_id: i64, body: &Value) -> Result<Self, Invalid> {
        if !has_required(body, &Self::REQUIRED) {
            return Err(Invalid(Self::MISSING));
        }
        Ok(Self {
            appointment_id,
            pet_id,
            vet_id,
            appointment_date: text_field(body, "appointment_date"),
            appointment_time: text_field(body, "appointment_time"),
            reason: text_field(body, "reason"),
            status: text_field(body, "status"),
        })
    }

    pub fn fields(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("appointment_id", SqlValue::Int(self.appointment_id)),
            ("pet_id", SqlValue::Int(self.pet_id)),
            ("vet_id", SqlValue::Int(self.vet_id)),
            ("appointment_date", SqlValue::Date(self.appointment_date.clone())),
            ("appointment_time", SqlValue::Time(self.appointment_time.clone())),
            ("reason", SqlValue::Text(self.reason.clone())),
            ("status", SqlValue::Text(self.status.clone())),
        ]
    }
}
