use serde::{Deserialize, Serialize};

/// An authenticated principal. Issued by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
}
