pub mod appointment;
pub mod owner;
pub mod pet;
pub mod social;
pub mod user;

pub use appointment::Appointment;
pub use owner::Owner;
pub use pet::Pet;
pub use social::{MonthCount, NewSocialLog};
pub use user::UserAccount;

use crate::filter::SqlValue;
use crate::types::Row;

/// Entities with full CRUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Owner,
    Pet,
    Appointment,
}

impl Entity {
    pub const ALL: [Entity; 3] = [Entity::Owner, Entity::Pet, Entity::Appointment];

    pub fn table(self) -> &'static str {
        match self {
            Entity::Owner => "Owner",
            Entity::Pet => "Pet",
            Entity::Appointment => "Appointment",
        }
    }

    pub fn primary_key(self) -> &'static str {
        match self {
            Entity::Owner => "owner_id",
            Entity::Pet => "pet_id",
            Entity::Appointment => "appointment_id",
        }
    }

    /// `/api/owners`, `/api/pets`, `/api/appointments`
    pub fn collection_path(self) -> String {
        format!("/api/{}s", self.table().to_lowercase())
    }

    /// Name used in client messages
    pub fn label(self) -> &'static str {
        self.table()
    }

    pub fn not_found(self) -> String {
        format!("{} not found", self.label())
    }

    pub fn invalid_id(self) -> String {
        format!("Invalid {}", self.primary_key())
    }
}

/// A fully validated row ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Owner(Owner),
    Pet(Pet),
    Appointment(Appointment),
}

impl Record {
    pub fn entity(&self) -> Entity {
        match self {
            Record::Owner(_) => Entity::Owner,
            Record::Pet(_) => Entity::Pet,
            Record::Appointment(_) => Entity::Appointment,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Record::Owner(o) => o.owner_id,
            Record::Pet(p) => p.pet_id,
            Record::Appointment(a) => a.appointment_id,
        }
    }

    /// Column/value pairs, primary key first
    pub fn fields(&self) -> Vec<(&'static str, SqlValue)> {
        match self {
            Record::Owner(o) => o.fields(),
            Record::Pet(p) => p.fields(),
            Record::Appointment(a) => a.fields(),
        }
    }

    pub fn to_row(&self) -> Row {
        self.fields()
            .into_iter()
            .map(|(column, value)| (column.to_string(), value.to_json()))
            .collect()
    }
}

impl From<Owner> for Record {
    fn from(owner: Owner) -> Self {
        Record::Owner(owner)
    }
}

impl From<Pet> for Record {
    fn from(pet: Pet) -> Self {
        Record::Pet(pet)
    }
}

impl From<Appointment> for Record {
    fn from(appointment: Appointment) -> Self {
        Record::Appointment(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_messages() {
        assert_eq!(Entity::Owner.not_found(), "Owner not found");
        assert_eq!(Entity::Pet.invalid_id(), "Invalid pet_id");
        assert_eq!(Entity::Appointment.invalid_id(), "Invalid appointment_id");
        assert_eq!(Entity::Appointment.collection_path(), "/api/appointments");
    }

    #[test]
    fn rows_keep_column_order() {
        let record = Record::from(Pet {
            pet_id: 3,
            name: "Rex".into(),
            species: "dog".into(),
            gender: "M".into(),
            owner_id: 1,
        });
        let keys: Vec<_> = record.to_row().keys().cloned().collect();
        assert_eq!(keys, ["pet_id", "name", "species", "gender", "owner_id"]);
        assert_eq!(record.id(), 3);
        assert_eq!(record.entity(), Entity::Pet);
    }
}
