//! Shapes one loosely structured LinkedIn post record into the stable
//! [`Post`] representation the website consumes. Every field has a fallback,
//! so normalization cannot fail.

use rand::Rng;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::dates;
use crate::types::{Author, Element, Engagement, Media, Post, ORG_POSTS_URL};

/// Shown when a post carries no text body.
pub const PLACEHOLDER_TEXT: &str =
    "Check out our latest updates on cybersecurity and digital protection strategies.";

/// Pool of site images attached to posts the API returned without media.
pub const FALLBACK_IMAGES: [(&str, &str); 4] = [
    ("hero_img1.jpg", "CyberSecuredIndia cybersecurity content"),
    ("hero_img2.JPG", "Digital security and protection"),
    ("hero_img3.jpg", "Cybersecurity awareness and training"),
    ("hero_img4.jpg", "Enterprise security solutions"),
];

/// Normalize the element at `index` of a response batch.
///
/// Engagement counts are not exposed by these endpoints, so they are drawn
/// from the supplied generator; pass a seeded one for deterministic output.
pub fn normalize_element(element: &Element, index: usize, rng: &mut impl Rng) -> Post {
    let media = extract_media(element).or_else(|| fallback_media(rng));

    let post = Post {
        id: element
            .id
            .as_ref()
            .and_then(id_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        text: element
            .text
            .as_ref()
            .and_then(|body| body.text.clone())
            .unwrap_or_else(|| PLACEHOLDER_TEXT.to_string()),
        created_time: dates::format_relative(
            element
                .created
                .as_ref()
                .and_then(|created| created.time)
                .unwrap_or_else(dates::now_millis),
        ),
        author: Author::organization(),
        engagement: Engagement {
            likes: rng.gen_range(15..=150),
            comments: rng.gen_range(2..=25),
            shares: rng.gen_range(1..=15),
        },
        media,
        // The upstream API gives no stable public permalink per post, so
        // every post links to the organization page.
        url: ORG_POSTS_URL.to_string(),
    };

    debug!("normalized element {} into post {}", index, post.id);
    post
}

fn id_string(id: &Value) -> Option<String> {
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First recognized media shape wins: a content entity with a location URN,
/// then the legacy thumbnail list of the first entity.
fn extract_media(element: &Element) -> Option<Media> {
    let entities = &element.content.as_ref()?.content_entities;

    for entity in entities {
        if entity.entity_location.is_some() {
            // Resolving the asset URN would take a second API call, so the
            // URL stays empty and the frontend falls back to a site image.
            return Some(Media::image(None, "LinkedIn post image"));
        }
    }

    if let Some(thumbnail) = entities
        .first()
        .and_then(|entity| entity.thumbnails.as_ref())
        .and_then(|thumbnails| thumbnails.first())
    {
        return Some(Media::image(thumbnail.url.clone(), "LinkedIn post image"));
    }

    None
}

/// Roughly 70% of media-less posts get a random image from the site pool.
fn fallback_media(rng: &mut impl Rng) -> Option<Media> {
    if rng.gen_range(1..=10) <= 7 {
        let (url, alt) = FALLBACK_IMAGES[rng.gen_range(0..FALLBACK_IMAGES.len())];
        Some(Media::image(Some(url.to_string()), alt))
    } else {
        None
    }
}
