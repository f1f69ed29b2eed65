//! Static portfolio content shown inside opened tiles.

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub title: &'static str,
    pub category: &'static str,
    pub image: &'static str,
    pub summary: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub title: &'static str,
    pub excerpt: &'static str,
    pub date: &'static str,
    pub read_time: &'static str,
    pub category: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactCard {
    pub email: &'static str,
    pub location: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Neon Banking",
        category: "Fintech Web App",
        image: "https://picsum.photos/id/20/600/400",
        summary: "A real-time banking dashboard with 3D data visualization using Three.js and D3.",
    },
    Project {
        title: "Aura Health",
        category: "Mobile Application",
        image: "https://picsum.photos/id/26/600/400",
        summary: "Meditation and wellness tracker built with React Native and Reanimated.",
    },
    Project {
        title: "Nexus AI",
        category: "Generative Interface",
        image: "https://picsum.photos/id/60/600/400",
        summary: "A multimodal AI workspace integrating text, image, and video generation.",
    },
];

pub const GALLERY_IMAGES: &[&str] = &[
    "https://picsum.photos/id/101/600/600",
    "https://picsum.photos/id/102/600/600",
    "https://picsum.photos/id/103/600/600",
    "https://picsum.photos/id/104/600/600",
    "https://picsum.photos/id/106/600/600",
    "https://picsum.photos/id/108/600/600",
];

pub const BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        title: "Building Smooth Animations with Framer Motion",
        excerpt: "A deep dive into creating buttery-smooth UI animations that delight users and improve perceived performance.",
        date: "Nov 28, 2024",
        read_time: "5 min read",
        category: "Animation",
    },
    BlogPost {
        title: "The Art of Component Design in React",
        excerpt: "Exploring patterns and best practices for creating reusable, maintainable React components.",
        date: "Nov 15, 2024",
        read_time: "8 min read",
        category: "React",
    },
    BlogPost {
        title: "Integrating AI into Modern Web Apps",
        excerpt: "How to leverage Gemini and other AI APIs to create intelligent, context-aware user experiences.",
        date: "Nov 3, 2024",
        read_time: "6 min read",
        category: "AI",
    },
];

pub const CONTACT: ContactCard = ContactCard {
    email: "hello@lumina-portfolio.dev",
    location: "San Francisco, CA",
};

/// Badges shown under the skills tile's description.
pub const SKILL_BADGES: &[&str] = &[
    "React",
    "TypeScript",
    "Tailwind",
    "Node.js",
    "Framer Motion",
    "Three.js",
    "PostgreSQL",
    "Python",
    "Gemini API",
];

pub const GITHUB_USERNAME: &str = "namit2111";
