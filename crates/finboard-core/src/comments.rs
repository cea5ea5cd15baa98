//! Element comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::elements::ElementId;

pub type CommentId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub element_id: ElementId,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(element_id: ElementId, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            element_id,
            text: text.into(),
            author: author.into(),
            timestamp: Utc::now(),
            resolved: false,
            replies: Vec::new(),
        }
    }

    pub fn apply(&mut self, patch: CommentPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(resolved) = patch.resolved {
            self.resolved = resolved;
        }
        if let Some(replies) = patch.replies {
            self.replies = replies;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentPatch {
    pub text: Option<String>,
    pub resolved: Option<bool>,
    pub replies: Option<Vec<Comment>>,
}
