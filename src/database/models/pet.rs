use serde::Serialize;
use serde_json::Value;

use crate::filter::SqlValue;
use crate::validation::{has_required, int_field, text_field, Invalid};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pet {
    pub pet_id: i64,
    pub name: String,
    pub species: String,
    pub gender: String,
    pub owner_id: i64,
}

impl Pet {
    const REQUIRED: [&'static str; 3] = ["name", "species", "gender"];

    pub fn from_create(body: &Value) -> Result<Self, Invalid> {
        let (pet_id, owner_id) = match (int_field(body, "pet_id"), int_field(body, "owner_id")) {
            (Some(pet_id), Some(owner_id)) => (pet_id, owner_id),
            _ => return Err(Invalid("pet_id and owner_id must be integers")),
        };
        Self::from_body(pet_id, owner_id, body)
    }

    pub fn from_update(pet_id: i64, body: &Value) -> Result<Self, Invalid> {
        let owner_id = int_field(body, "owner_id").ok_or(Invalid("owner_id must be an integer"))?;
        Self::from_body(pet_id, owner_id, body)
    }

    fn from_body(pet_id: i64, owner_id: i64, body: &Value) -> Result<Self, Invalid> {
        if !has_required(body, &Self::REQUIRED) {
            return Err(Invalid("name, species, and gender are required"));
        }
        Ok(Self {
            pet_id,
            name: text_field(body, "name"),
            species: text_field(body, "species"),
            gender: text_field(body, "gender"),
            owner_id,
        })
    }

    pub fn fields(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("pet_id", SqlValue::Int(self.pet_id)),
            ("name", SqlValue::Text(self.name.clone())),
            ("species", SqlValue::Text(self.species.clone())),
            ("gender", SqlValue::Text(self.gender.clone())),
            ("owner_id", SqlValue::Int(self.owner_id)),
        ]
    }
}
