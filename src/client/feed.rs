// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Community feed.
//!
//! The feed has no backend: it is a fixed set of seeded posts, filtered and
//! updated in memory. Likes and comments only change the local copy.

use serde::{Deserialize, Serialize};

const AVATARS: [&str; 5] = [
    "https://api.dicebear.com/7.x/avataaars/svg?seed=1",
    "https://api.dicebear.com/7.x/avataaars/svg?seed=2",
    "https://api.dicebear.com/7.x/avataaars/svg?seed=3",
    "https://api.dicebear.com/7.x/avataaars/svg?seed=4",
    "https://api.dicebear.com/7.x/avataaars/svg?seed=5",
];

pub const DEFAULT_POST_LIMIT: usize = 10;
pub const DEFAULT_HOT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u32,
    pub author: String,
    /// Author's job title
    pub role: String,
    pub avatar: String,
    /// Relative time label, e.g. "2 hours ago"
    pub time: String,
    pub content: String,
    pub likes: u32,
    pub comments: u32,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotPost {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub likes: u32,
    pub comments: u32,
    pub trending: bool,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u32,
    pub post_id: u32,
    pub author: String,
    pub text: String,
    pub time: String,
}

/// A post as written in the composer. Author and role fall back to
/// "You" and "Developer".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub author: Option<String>,
    pub role: Option<String>,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub const DEFAULT_COMMENT_LIMIT: usize = 5;

/// In-memory feed state.
#[derive(Debug, Clone)]
pub struct Feed {
    posts: Vec<Post>,
    hot: Vec<HotPost>,
    comments: Vec<Comment>,
    next_comment_id: u32,
}

struct Seed {
    author: &'static str,
    role: &'static str,
    time: &'static str,
    content: &'static str,
    likes: u32,
    comments: u32,
    tags: &'static [&'static str],
}

const SEED_POSTS: &[Seed] = &[
    Seed {
        author: "Sarah Chen",
        role: "Senior React Developer",
        time: "2 hours ago",
        content: "Just finished a mentoring session on React Hooks. Once useEffect and useCallback click, the rest of React gets much easier. Happy to help anyone stuck on them.",
        likes: 45,
        comments: 12,
        tags: &["React", "JavaScript", "Mentoring"],
    },
    Seed {
        author: "Mike Rodriguez",
        role: "Full-Stack Engineer",
        time: "5 hours ago",
        content: "Starting out in open source? Filter for 'good first issue' labels. They are the quickest way to learn a codebase and land your first PR. I review beginner PRs every week.",
        likes: 89,
        comments: 23,
        tags: &["OpenSource", "Tips", "Contributing"],
    },
    Seed {
        author: "Emma Watson",
        role: "DevOps Mentor",
        time: "1 day ago",
        content: "Docker and Kubernetes look overwhelming at first, but containers are the one idea that makes everything else fit. Running a beginner workshop next week.",
        likes: 67,
        comments: 18,
        tags: &["Docker", "Kubernetes", "DevOps"],
    },
    Seed {
        author: "David Kim",
        role: "Tech Lead",
        time: "1 day ago",
        content: "Clean code is about being clear, not clever. Your team will thank you. What are your favourite clean code habits?",
        likes: 134,
        comments: 45,
        tags: &["CleanCode", "BestPractices"],
    },
    Seed {
        author: "Lisa Anderson",
        role: "UI/UX Designer & Mentor",
        time: "2 days ago",
        content: "Helped a mentee set up their first component library with Figma and Storybook. Design systems pay for themselves quickly.",
        likes: 92,
        comments: 31,
        tags: &["Design", "UI/UX", "ComponentLibrary"],
    },
    Seed {
        author: "Alex Johnson",
        role: "Backend Engineer",
        time: "3 days ago",
        content: "Scaling to millions of users taught me that simplicity wins. Start with the simplest thing that works and iterate on real needs.",
        likes: 156,
        comments: 38,
        tags: &["Backend", "Scaling", "Architecture"],
    },
    Seed {
        author: "Maria Garcia",
        role: "Mobile Developer",
        time: "3 days ago",
        content: "React Native or Flutter? I have shipped both. It depends on your team more than the framework. Ask me anything about either.",
        likes: 78,
        comments: 29,
        tags: &["Mobile", "ReactNative", "Flutter"],
    },
    Seed {
        author: "James Wilson",
        role: "Security Engineer",
        time: "4 days ago",
        content: "Security is thinking like an attacker. Validate inputs, never trust user data and keep your dependencies updated.",
        likes: 201,
        comments: 52,
        tags: &["Security", "BestPractices", "CyberSecurity"],
    },
    Seed {
        author: "Nina Patel",
        role: "Data Scientist",
        time: "5 days ago",
        content: "A simple linear regression sometimes beats a neural network. Start simple, measure, then add complexity if the numbers ask for it.",
        likes: 143,
        comments: 41,
        tags: &["MachineLearning", "DataScience", "AI"],
    },
    Seed {
        author: "Robert Brown",
        role: "Engineering Manager",
        time: "5 days ago",
        content: "Advice for junior developers: ask questions. Staying stuck because you are afraid to ask is the only mistake. Good teams support learning.",
        likes: 267,
        comments: 73,
        tags: &["Career", "Learning", "TeamCulture"],
    },
    Seed {
        author: "Jessica Lee",
        role: "Frontend Architect",
        time: "1 week ago",
        content: "Use React.memo wisely. Not every component needs it. Profile first, optimize later.",
        likes: 89,
        comments: 27,
        tags: &["React", "Performance", "Optimization"],
    },
    Seed {
        author: "Rachel Green",
        role: "QA Engineer & Mentor",
        time: "1 week ago",
        content: "Testing is everyone's job. Write tests as you code so the next refactor does not break everything.",
        likes: 134,
        comments: 42,
        tags: &["Testing", "QA", "BestPractices"],
    },
];

const SEED_HOT: &[(&str, &str, u32, u32, bool, &[&str])] = &[
    (
        "How I landed my first FAANG job after 100 rejections",
        "Alex Turner",
        456,
        89,
        true,
        &["Career", "FAANG", "Interview"],
    ),
    (
        "Free resources that helped me become a better developer",
        "Maria Garcia",
        389,
        67,
        true,
        &["Learning", "Resources", "Free"],
    ),
    (
        "My journey from bootcamp to senior engineer in 3 years",
        "James Wilson",
        523,
        112,
        true,
        &["Career", "Journey", "Bootcamp"],
    ),
    (
        "Top 10 GitHub repos every developer should know",
        "Nina Patel",
        678,
        94,
        false,
        &["GitHub", "OpenSource", "Tools"],
    ),
    (
        "How mentoring changed my perspective on coding",
        "Robert Brown",
        234,
        45,
        false,
        &["Mentoring", "Learning", "Community"],
    ),
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Feed {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Feed {
    /// The built-in posts.
    pub fn seeded() -> Self {
        let posts = SEED_POSTS
            .iter()
            .enumerate()
            .map(|(i, seed)| Post {
                id: i as u32 + 1,
                author: seed.author.to_string(),
                role: seed.role.to_string(),
                avatar: AVATARS[i % AVATARS.len()].to_string(),
                time: seed.time.to_string(),
                content: seed.content.to_string(),
                likes: seed.likes,
                comments: seed.comments,
                tags: to_strings(seed.tags),
            })
            .collect();

        let hot = SEED_HOT
            .iter()
            .enumerate()
            .map(|(i, (title, author, likes, comments, trending, tags))| HotPost {
                id: 101 + i as u32,
                title: title.to_string(),
                author: author.to_string(),
                likes: *likes,
                comments: *comments,
                trending: *trending,
                tags: to_strings(tags),
            })
            .collect();

        Self::from_posts(posts, hot)
    }

    pub fn from_posts(posts: Vec<Post>, hot: Vec<HotPost>) -> Self {
        Self {
            posts,
            hot,
            comments: Vec::new(),
            next_comment_id: 1,
        }
    }

    /// First `limit` posts.
    pub fn posts(&self, limit: usize) -> &[Post] {
        &self.posts[..limit.min(self.posts.len())]
    }

    pub fn hot_posts(&self, limit: usize) -> &[HotPost] {
        &self.hot[..limit.min(self.hot.len())]
    }

    pub fn post(&self, post_id: u32) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    /// Case-insensitive substring match over content, author and tags.
    pub fn search(&self, query: &str) -> Vec<&Post> {
        let needle = query.trim().to_lowercase();
        self.posts
            .iter()
            .filter(|p| {
                p.content.to_lowercase().contains(&needle)
                    || p.author.to_lowercase().contains(&needle)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Publish a post at the top of the feed. Blank content is rejected.
    pub fn create_post(&mut self, draft: NewPost) -> Option<Post> {
        let content = draft.content.trim();
        if content.is_empty() {
            return None;
        }

        let post = Post {
            id: self.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            author: draft.author.unwrap_or_else(|| "You".to_string()),
            role: draft.role.unwrap_or_else(|| "Developer".to_string()),
            avatar: AVATARS[0].to_string(),
            time: "Just now".to_string(),
            content: content.to_string(),
            likes: 0,
            comments: 0,
            tags: draft.tags,
        };
        self.posts.insert(0, post.clone());
        Some(post)
    }

    /// Like a post. Returns false when there is no such post.
    pub fn like(&mut self, post_id: u32) -> bool {
        match self.posts.iter_mut().find(|p| p.id == post_id) {
            Some(post) => {
                post.likes += 1;
                true
            }
            None => false,
        }
    }

    /// Add a comment and bump the post's comment count.
    pub fn add_comment(&mut self, post_id: u32, author: &str, text: &str) -> Option<Comment> {
        let post = self.posts.iter_mut().find(|p| p.id == post_id)?;
        post.comments += 1;

        let comment = Comment {
            id: self.next_comment_id,
            post_id,
            author: author.to_string(),
            text: text.to_string(),
            time: "Just now".to_string(),
        };
        self.next_comment_id += 1;
        self.comments.push(comment.clone());
        Some(comment)
    }

    /// Up to `limit` comments added locally to a post, oldest first.
    pub fn comments_for(&self, post_id: u32, limit: usize) -> Vec<&Comment> {
        self.comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_increments_only_target() {
        let mut feed = Feed::seeded();
        let before: Vec<u32> = feed.posts(usize::MAX).iter().map(|p| p.likes).collect();

        assert!(feed.like(3));

        let after: Vec<u32> = feed.posts(usize::MAX).iter().map(|p| p.likes).collect();
        for (i, (b, a)) in before.iter().zip(&after).enumerate() {
            if i == 2 {
                assert_eq!(*a, b + 1);
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_like_unknown_post() {
        let mut feed = Feed::seeded();
        assert!(!feed.like(999));
    }

    #[test]
    fn test_limits() {
        let feed = Feed::seeded();
        assert_eq!(feed.posts(DEFAULT_POST_LIMIT).len(), 10);
        assert_eq!(feed.posts(100).len(), SEED_POSTS.len());
        assert_eq!(feed.hot_posts(DEFAULT_HOT_LIMIT).len(), 5);
        assert_eq!(feed.hot_posts(2)[0].id, 101);
    }

    #[test]
    fn test_search_matches_content_author_and_tags() {
        let feed = Feed::seeded();

        let by_tag: Vec<u32> = feed.search("react").iter().map(|p| p.id).collect();
        assert!(by_tag.contains(&1));
        assert!(by_tag.contains(&11));

        assert!(feed
            .search("NINA PATEL")
            .iter()
            .all(|p| p.author == "Nina Patel"));
        assert_eq!(feed.search("NINA PATEL").len(), 1);
        assert!(feed.search("cobol").is_empty());
    }

    #[test]
    fn test_add_comment() {
        let mut feed = Feed::seeded();
        let before = feed.post(2).unwrap().comments;

        let comment = feed.add_comment(2, "Ada", "Thanks!").unwrap();
        assert_eq!(comment.id, 1);
        assert_eq!(feed.post(2).unwrap().comments, before + 1);
        assert_eq!(feed.comments_for(2, DEFAULT_COMMENT_LIMIT).len(), 1);
        assert!(feed.add_comment(999, "Ada", "?").is_none());
    }

    #[test]
    fn test_comment_limit() {
        let mut feed = Feed::seeded();
        for i in 0..7 {
            feed.add_comment(4, "Ada", &format!("comment {}", i)).unwrap();
        }
        let shown = feed.comments_for(4, DEFAULT_COMMENT_LIMIT);
        assert_eq!(shown.len(), 5);
        assert_eq!(shown[0].text, "comment 0");
        assert!(feed.comments_for(5, DEFAULT_COMMENT_LIMIT).is_empty());
    }

    #[test]
    fn test_create_post_goes_to_top() {
        let mut feed = Feed::seeded();
        let count = feed.posts(usize::MAX).len();

        let post = feed
            .create_post(NewPost {
                content: "  Shipped my first crate!  ".to_string(),
                tags: vec!["Rust".to_string()],
                ..Default::default()
            })
            .unwrap();

        assert_eq!(post.id, count as u32 + 1);
        assert_eq!(post.author, "You");
        assert_eq!(post.role, "Developer");
        assert_eq!(post.content, "Shipped my first crate!");
        assert_eq!(post.likes, 0);
        assert_eq!(feed.posts(1)[0], post);
        assert_eq!(feed.search("first crate").len(), 1);

        assert!(feed
            .create_post(NewPost {
                content: "   ".to_string(),
                ..Default::default()
            })
            .is_none());
        assert_eq!(feed.posts(usize::MAX).len(), count + 1);
    }
}
