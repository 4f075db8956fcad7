use serde::{Deserialize, Serialize};

/// A news or policy item from the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, alias = "imageURL")]
    pub image_url: String,
}

impl Issue {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            image_url: image_url.into(),
        }
    }
}

/// Position of a row in a sectioned list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexPath {
    pub row: usize,
    pub section: usize,
}

impl IndexPath {
    pub fn new(row: usize, section: usize) -> Self {
        Self { row, section }
    }
}
