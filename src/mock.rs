//! Fixed example posts served whenever the live feed is unavailable. The
//! page must never render an empty feed, so this set is the floor.

use lazy_static::lazy_static;

use crate::types::{Author, Engagement, Media, Post, ORG_PAGE_URL};

lazy_static! {
    static ref MOCK_POSTS: Vec<Post> = build_posts();
}

/// The fixed five-post fallback set, in display order.
pub fn fixed_posts() -> Vec<Post> {
    MOCK_POSTS.clone()
}

fn post(
    id: &str,
    text: &str,
    created_time: &str,
    engagement: Engagement,
    media: Option<Media>,
) -> Post {
    Post {
        id: id.to_string(),
        text: text.to_string(),
        created_time: created_time.to_string(),
        author: Author::organization(),
        engagement,
        media,
        url: ORG_PAGE_URL.to_string(),
    }
}

fn build_posts() -> Vec<Post> {
    vec![
        post(
            "mock_1",
            "\u{1F512} Exciting news! We've just launched our advanced cybersecurity training \
             program designed to help businesses protect their digital assets. Join us in \
             building a more secure digital future! #CyberSecurity #DigitalProtection",
            "2 hours ago",
            Engagement { likes: 87, comments: 12, shares: 8 },
            Some(Media::image(
                Some("hero_img1.jpg".to_string()),
                "Advanced cybersecurity training program launch",
            )),
        ),
        post(
            "mock_2",
            "\u{1F4CA} New research shows that 95% of successful cyber attacks are due to human \
             error. Our latest blog post covers the top 5 ways to train your team for better \
             cybersecurity awareness. Link in comments! #CyberAwareness #InfoSec",
            "1 day ago",
            Engagement { likes: 134, comments: 18, shares: 15 },
            Some(Media::image(
                Some("hero_img2.JPG".to_string()),
                "Cybersecurity awareness training statistics",
            )),
        ),
        post(
            "mock_3",
            "\u{1F680} Proud to announce our partnership with leading tech companies to enhance \
             cybersecurity standards across the industry. Together, we're making the digital \
             world safer for everyone! #Partnership #CyberSecurity",
            "3 days ago",
            Engagement { likes: 92, comments: 7, shares: 11 },
            Some(Media::image(
                Some("hero_img3.jpg".to_string()),
                "Partnership announcement in cybersecurity industry",
            )),
        ),
        post(
            "mock_4",
            "\u{1F4A1} Did you know? Multi-factor authentication can prevent 99.9% of automated \
             attacks. Here are 3 simple steps to implement MFA in your organization. Swipe to \
             learn more! #MFA #CyberTips",
            "5 days ago",
            Engagement { likes: 156, comments: 23, shares: 19 },
            Some(Media::image(
                Some("hero_img4.jpg".to_string()),
                "Multi-factor authentication implementation guide",
            )),
        ),
        post(
            "mock_5",
            "\u{1F31F} Celebrating our team's achievement! We've successfully helped 500+ \
             businesses strengthen their cybersecurity posture this year. Thank you for \
             trusting us with your digital security! #Milestone #ThankYou",
            "1 week ago",
            Engagement { likes: 203, comments: 31, shares: 24 },
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_fallback_set_has_five_posts() {
        assert_eq!(fixed_posts().len(), 5);
    }

    #[test]
    fn fallback_posts_are_deterministic() {
        assert_eq!(fixed_posts(), fixed_posts());
    }

    #[test]
    fn every_fallback_post_is_well_formed() {
        for post in fixed_posts() {
            assert!(!post.text.is_empty());
            assert!(!post.author.name.is_empty());
            assert!(!post.id.is_empty());
        }
    }

    #[test]
    fn media_is_mixed_across_the_set() {
        let posts = fixed_posts();
        assert!(posts.iter().any(|p| p.media.is_some()));
        assert!(posts.iter().any(|p| p.media.is_none()));
    }
}
