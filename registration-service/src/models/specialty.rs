//! Medical specialty enumeration offered at clinic registration.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Business line of a clinic. The list is fixed and server-validated;
/// anything that does not fit registers as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Specialty {
    Odontology,
    Psychiatry,
    Psychology,
    Physiotherapy,
    Nutrition,
    #[serde(rename = "General Medicine")]
    GeneralMedicine,
    Pediatrics,
    Orthopedics,
    Dermatology,
    Ophthalmology,
    Cardiology,
    Gynecology,
    Urology,
    Neurology,
    Otorhinolaryngology,
    Endocrinology,
    Geriatrics,
    Rheumatology,
    #[serde(rename = "Speech Therapy")]
    SpeechTherapy,
    Other,
}

impl Specialty {
    pub const ALL: [Specialty; 20] = [
        Specialty::Odontology,
        Specialty::Psychiatry,
        Specialty::Psychology,
        Specialty::Physiotherapy,
        Specialty::Nutrition,
        Specialty::GeneralMedicine,
        Specialty::Pediatrics,
        Specialty::Orthopedics,
        Specialty::Dermatology,
        Specialty::Ophthalmology,
        Specialty::Cardiology,
        Specialty::Gynecology,
        Specialty::Urology,
        Specialty::Neurology,
        Specialty::Otorhinolaryngology,
        Specialty::Endocrinology,
        Specialty::Geriatrics,
        Specialty::Rheumatology,
        Specialty::SpeechTherapy,
        Specialty::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Odontology => "Odontology",
            Specialty::Psychiatry => "Psychiatry",
            Specialty::Psychology => "Psychology",
            Specialty::Physiotherapy => "Physiotherapy",
            Specialty::Nutrition => "Nutrition",
            Specialty::GeneralMedicine => "General Medicine",
            Specialty::Pediatrics => "Pediatrics",
            Specialty::Orthopedics => "Orthopedics",
            Specialty::Dermatology => "Dermatology",
            Specialty::Ophthalmology => "Ophthalmology",
            Specialty::Cardiology => "Cardiology",
            Specialty::Gynecology => "Gynecology",
            Specialty::Urology => "Urology",
            Specialty::Neurology => "Neurology",
            Specialty::Otorhinolaryngology => "Otorhinolaryngology",
            Specialty::Endocrinology => "Endocrinology",
            Specialty::Geriatrics => "Geriatrics",
            Specialty::Rheumatology => "Rheumatology",
            Specialty::SpeechTherapy => "Speech Therapy",
            Specialty::Other => "Other",
        }
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Specialty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Specialty::ALL
            .iter()
            .find(|sp| sp.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown specialty: {}", s))
    }
}
