use serde::{Serialize, Deserialize};
use serde_json::Value;

pub const ORG_NAME: &str = "CyberSecuredIndia";
pub const ORG_LOGO: &str = "cybersecuredindia_logo.jpeg";
pub const ORG_PAGE_URL: &str = "https://linkedin.com/company/cybersecuredindia";
pub const ORG_POSTS_URL: &str = "https://linkedin.com/company/cybersecuredindia/posts/";

// ************* Normalized output *************** | START

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub image: String,
}

impl Author {
    /// The posts we surface are always authored by the organization itself.
    pub fn organization() -> Self {
        Self {
            name: ORG_NAME.to_string(),
            image: ORG_LOGO.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: Option<String>,
    pub alt: String,
}

impl Media {
    pub fn image(url: Option<String>, alt: &str) -> Self {
        Self {
            kind: "image".to_string(),
            url,
            alt: alt.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    #[serde(rename = "createdTime")]
    pub created_time: String,
    pub author: Author,
    pub engagement: Engagement,
    pub media: Option<Media>,
    pub url: String,
}

// ************* Normalized output *************** | END

// ************* Upstream shapes *************** | START

/// Envelope of every LinkedIn post-listing endpoint: the posts live in
/// `elements`, which may be missing entirely on an empty result.
#[derive(Debug, Deserialize)]
pub struct ElementsResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// One loosely structured post record. Shares and ugcPosts disagree on the
/// id type (numeric vs URN string), so it stays a raw `Value`.
#[derive(Debug, Default, Deserialize)]
pub struct Element {
    pub id: Option<Value>,
    pub text: Option<TextBody>,
    pub created: Option<Created>,
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct TextBody {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Created {
    pub time: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(rename = "contentEntities", default)]
    pub content_entities: Vec<ContentEntity>,
}

#[derive(Debug, Deserialize)]
pub struct ContentEntity {
    #[serde(rename = "entityLocation")]
    pub entity_location: Option<String>,
    pub thumbnails: Option<Vec<Thumbnail>>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
}

// ************* Upstream shapes *************** | END
