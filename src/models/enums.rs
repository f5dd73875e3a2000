use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(EntryType {
    SickCall => "sick_call",
    Injury => "injury",
    PhysicalExam => "physical_exam",
    MentalHealth => "mental_health",
    Dental => "dental",
    Hospitalization => "hospitalization",
    Emergency => "emergency",
    FollowUp => "follow_up",
    Referral => "referral",
    Imaging => "imaging",
    Lab => "lab",
    Medication => "medication",
    Immunization => "immunization",
    DeploymentScreening => "deployment_screening",
    SeparationExam => "separation_exam",
    Other => "other",
});

str_enum!(OpportunityType {
    DirectServiceConnection => "direct_service_connection",
    Aggravation => "aggravation",
    SecondaryCondition => "secondary_condition",
    ChronicCondition => "chronic_condition",
    MentalHealth => "mental_health",
    Tbi => "tbi",
    Ptsd => "ptsd",
    GulfWarPresumptive => "gulf_war_presumptive",
    BurnPitPresumptive => "burn_pit_presumptive",
    AgentOrangePresumptive => "agent_orange_presumptive",
});

str_enum!(ConfidenceTier {
    High => "high",
    Medium => "medium",
    Low => "low",
});

str_enum!(ProcessingStatus {
    Pending => "pending",
    Processing => "processing",
    Completed => "completed",
    Error => "error",
});

impl ProcessingStatus {
    /// Terminal states are absorbing: no transition leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

str_enum!(FrequencyClass {
    Frequent => "frequent",
    Regular => "regular",
    Periodic => "periodic",
    Occasional => "occasional",
});

str_enum!(Severity {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
});

str_enum!(DateConfidence {
    Parsed => "parsed",
    Fallback => "fallback",
});

str_enum!(FileKind {
    Pdf => "pdf",
    Tiff => "tiff",
    Jpg => "jpg",
    Png => "png",
    Heic => "heic",
});

str_enum!(BodySystem {
    Musculoskeletal => "musculoskeletal",
    Respiratory => "respiratory",
    MentalHealth => "mental_health",
    Neurological => "neurological",
    Auditory => "auditory",
    Cardiovascular => "cardiovascular",
    Digestive => "digestive",
    Skin => "skin",
    Endocrine => "endocrine",
    Genitourinary => "genitourinary",
    Vision => "vision",
    Other => "other",
});
