use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u32,
    pub post_id: u32,
    pub name: String,
    pub email: String,
    pub body: String,
}
