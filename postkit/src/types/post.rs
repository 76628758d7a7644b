use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u32,
    pub user_id: u32,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
}

/// DummyJSON reports reactions either as a bare count or as a like/dislike pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reactions {
    Count(u32),
    Split { likes: u32, dislikes: u32 },
}

impl Reactions {
    pub fn total(&self) -> u32 {
        match self {
            Reactions::Count(n) => *n,
            Reactions::Split { likes, dislikes } => likes + dislikes,
        }
    }
}

/// Body of `POST /posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u32,
}

/// Body of `PUT /posts/{id}`; unset fields are left out of the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u32>,
}

/// DummyJSON search envelope: `{"posts":[...],"total":..}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSearchResults {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub total: Option<u32>,
}
