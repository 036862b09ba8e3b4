/// Shared types used across the codebase

use serde_json::{Map, Value};

/// One result row as a JSON object, keys in column order
pub type Row = Map<String, Value>;

/// Read-only reporting views exposed verbatim under `/api/views/*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportView {
    UpcomingAppointments,
    TopCostVets,
    OwnerPetCounts,
    FullAppointmentSummary,
    ActivePets,
    TopMedications,
    MultiServicePets,
    MultiPetOwners,
    AvgTreatmentCostPerVet,
    InactivePets,
}

impl ReportView {
    pub const ALL: [ReportView; 10] = [
        ReportView::UpcomingAppointments,
        ReportView::TopCostVets,
        ReportView::OwnerPetCounts,
        ReportView::FullAppointmentSummary,
        ReportView::ActivePets,
        ReportView::TopMedications,
        ReportView::MultiServicePets,
        ReportView::MultiPetOwners,
        ReportView::AvgTreatmentCostPerVet,
        ReportView::InactivePets,
    ];

    /// URL segment after `/api/views/`
    pub fn slug(self) -> &'static str {
        match self {
            ReportView::UpcomingAppointments => "upcoming-appointments",
            ReportView::TopCostVets => "top-cost-vets",
            ReportView::OwnerPetCounts => "owner-pet-counts",
            ReportView::FullAppointmentSummary => "full-appointment-summary",
            ReportView::ActivePets => "active-pets",
            ReportView::TopMedications => "top-medications",
            ReportView::MultiServicePets => "multi-service-pets",
            ReportView::MultiPetOwners => "multi-pet-owners",
            ReportView::AvgTreatmentCostPerVet => "avg-treatment-cost-per-vet",
            ReportView::InactivePets => "inactive-pets",
        }
    }

    /// Relation name in the store
    pub fn relation(self) -> &'static str {
        match self {
            ReportView::UpcomingAppointments => "UpcomingAppointments",
            ReportView::TopCostVets => "TopCostVets",
            ReportView::OwnerPetCounts => "OwnerPetCounts",
            ReportView::FullAppointmentSummary => "FullAppointmentSummary",
            ReportView::ActivePets => "ActivePets",
            ReportView::TopMedications => "TopMedications",
            ReportView::MultiServicePets => "MultiServicePets",
            ReportView::MultiPetOwners => "MultiPetOwners",
            ReportView::AvgTreatmentCostPerVet => "AvgTreatmentCostPerVet",
            ReportView::InactivePets => "InactivePets",
        }
    }

    pub fn path(self) -> String {
        format!("/api/views/{}", self.slug())
    }
}
