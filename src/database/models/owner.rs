use serde::Serialize;
use serde_json::Value;

use crate::filter::SqlValue;
use crate::validation::{has_required, int_field, text_field, validate_email, Invalid};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub owner_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Owner {
    const REQUIRED: [&'static str; 3] = ["first_name", "last_name", "email"];

    /// Body of `POST /api/owners`
    pub fn from_create(body: &Value) -> Result<Self, Invalid> {
        let owner_id = int_field(body, "owner_id").ok_or(Invalid("owner_id must be an integer"))?;
        Self::from_body(owner_id, body)
    }

    /// Body of `PUT /api/owners/:id`; the key comes from the path
    pub fn from_update(owner_id: i64, body: &Value) -> Result<Self, Invalid> {
        Self::from_body(owner_id, body)
    }

    fn from_body(owner_id: i64, body: &Value) -> Result<Self, Invalid> {
        if !has_required(body, &Self::REQUIRED) {
            return Err(Invalid("first_name, last_name, and email are required"));
        }
        let email = text_field(body, "email");
        if !validate_email(&email) {
            return Err(Invalid("Invalid email format"));
        }

        Ok(Self {
            owner_id,
            first_name: text_field(body, "first_name"),
            last_name: text_field(body, "last_name"),
            phone: text_field(body, "phone"),
            email,
            address: text_field(body, "address"),
        })
    }

    pub fn fields(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("owner_id", SqlValue::Int(self.owner_id)),
            ("first_name", SqlValue::Text(self.first_name.clone())),
            ("last_name", SqlValue::Text(self.last_name.clone())),
            ("phone", SqlValue::Text(self.phone.clone())),
            ("email", SqlValue::Text(self.email.clone())),
            ("address", SqlValue::Text(self.address.clone())),
        ]
    }
}
