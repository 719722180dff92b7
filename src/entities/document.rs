use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A schema-less document; the body is stored as-is.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub body: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Render the document the way the collection hands it out: the body
    /// object with its identity under `_id`. Non-object bodies are wrapped.
    pub fn into_json(self) -> Json {
        match self.body {
            Json::Object(mut fields) => {
                fields.insert("_id".to_string(), Json::String(self.id));
                Json::Object(fields)
            }
            other => serde_json::json!({ "_id": self.id, "value": other }),
        }
    }
}
