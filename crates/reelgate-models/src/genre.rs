use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Response body for the genre catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}
