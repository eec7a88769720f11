use serde::{Deserialize, Serialize};

/// Gender as reported by the provider. Unknown provider values always
/// degrade to `Unspecified` instead of failing the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    NonBinary,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Gender {
    /// Cross-walk from the provider's numeric gender code.
    pub fn from_provider(code: Option<i64>) -> Self {
        match code {
            Some(1) => Gender::Female,
            Some(2) => Gender::Male,
            Some(3) => Gender::NonBinary,
            _ => Gender::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub adult: bool,
    pub gender: Gender,
    pub id: i64,
    pub known_department: String,
    pub name: String,
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    pub cast_id: i64,
    pub character: String,
    pub credit_id: String,
    pub order: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub adult: bool,
    pub gender: Gender,
    pub id: i64,
    pub known_department: String,
    pub name: String,
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    pub credit_id: String,
    pub department: String,
    pub job: String,
}

/// Cast and crew for one movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieCredits {
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}
