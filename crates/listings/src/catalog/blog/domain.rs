use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::validation::{double_option, non_null, ValidationError, Violations};

pub(crate) const ENTITY: &str = "blog post";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogPostId(pub i64);

impl fmt::Display for BlogPostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn from_new(id: BlogPostId, created_at: DateTime<Utc>, new: NewBlogPost) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            excerpt: new.excerpt,
            author: new.author,
            published: new.published,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub published: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
}

impl BlogPostDraft {
    /// Drafts stay unpublished unless the author says otherwise.
    pub fn validate(self) -> Result<NewBlogPost, ValidationError> {
        let mut violations = Violations::new(ENTITY);
        let title = violations.required_text("title", self.title);
        let content = violations.required_text("content", self.content);
        let excerpt = violations.required_text("excerpt", self.excerpt);
        let author = violations.required_text("author", self.author);
        violations.finish()?;

        match (title, content, excerpt, author) {
            (Some(title), Some(content), Some(excerpt), Some(author)) => Ok(NewBlogPost {
                title,
                content,
                excerpt,
                author,
                published: self.published.unwrap_or(false),
            }),
            _ => Err(ValidationError::single(ENTITY, "body", "incomplete payload")),
        }
    }
}

/// Partial update; `id` and `createdAt` in the payload are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BlogPostPatchBody")]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
    pub(crate) nulls: Vec<&'static str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BlogPostPatchBody {
    #[serde(deserialize_with = "double_option")]
    title: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    content: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    excerpt: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    author: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    published: Option<Option<bool>>,
}

impl From<BlogPostPatchBody> for BlogPostPatch {
    fn from(body: BlogPostPatchBody) -> Self {
        let mut nulls = Vec::new();
        Self {
            title: non_null(&mut nulls, "title", body.title),
            content: non_null(&mut nulls, "content", body.content),
            excerpt: non_null(&mut nulls, "excerpt", body.excerpt),
            author: non_null(&mut nulls, "author", body.author),
            published: non_null(&mut nulls, "published", body.published),
            nulls,
        }
    }
}

impl BlogPostPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new(ENTITY);
        violations.nulls(&self.nulls);
        violations.supplied_text("title", &self.title);
        violations.supplied_text("content", &self.content);
        violations.supplied_text("excerpt", &self.excerpt);
        violations.supplied_text("author", &self.author);
        violations.finish()
    }

    pub fn apply(self, post: &mut BlogPost) {
        if let Some(value) = self.title {
            post.title = value;
        }
        if let Some(value) = self.content {
            post.content = value;
        }
        if let Some(value) = self.excerpt {
            post.excerpt = value;
        }
        if let Some(value) = self.author {
            post.author = value;
        }
        if let Some(value) = self.published {
            post.published = value;
        }
    }
}
