//! Static copy for the landing page.
//!
//! Records are plain data; the renderer decides layout. Outbound links that
//! point at the hosted app use [`Href::WebApp`] so the URL stays
//! configurable through `links.web_app_url`.

use serde::Serialize;

/// Page sections in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Hero,
    Showcase,
    Features,
    Platforms,
    Testimonials,
    Cta,
    Footer,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Hero,
        Section::Showcase,
        Section::Features,
        Section::Platforms,
        Section::Testimonials,
        Section::Cta,
        Section::Footer,
    ];

    /// Fragment identifier used by navbar links.
    pub fn anchor(&self) -> Option<&'static str> {
        match self {
            Section::Features => Some("features"),
            Section::Platforms => Some("platforms"),
            Section::Testimonials => Some("testimonials"),
            Section::Cta => Some("pricing"),
            _ => None,
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<Section> {
        let anchor = anchor.trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|section| section.anchor() == Some(anchor))
    }
}

/// Where a link goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "target")]
pub enum Href {
    /// The hosted web app.
    WebApp,
    /// A section on this page.
    Anchor(Section),
    /// Not wired up yet ("#").
    Placeholder,
}

impl Href {
    /// Resolve to something a browser can open, if anything.
    pub fn resolve<'a>(&self, web_app_url: &'a str) -> Option<&'a str> {
        match self {
            Href::WebApp => Some(web_app_url),
            Href::Anchor(_) | Href::Placeholder => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Target,
    ListTodo,
    Repeat,
    Timer,
    BarChart,
    Cloud,
    Smartphone,
    Monitor,
    Tablet,
    Check,
    Star,
}

impl Icon {
    /// Single-cell glyph for terminals without icon fonts.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Target => "◎",
            Icon::ListTodo => "☰",
            Icon::Repeat => "↻",
            Icon::Timer => "◷",
            Icon::BarChart => "▥",
            Icon::Cloud => "☁",
            Icon::Smartphone => "▯",
            Icon::Monitor => "▭",
            Icon::Tablet => "▢",
            Icon::Check => "✓",
            Icon::Star => "★",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub href: Href,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    /// Small caption above the store name ("Get it on").
    pub caption: &'static str,
    pub store: &'static str,
    pub href: Href,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub badge: &'static str,
    pub heading: &'static str,
    pub highlight: &'static str,
    pub tagline: &'static str,
    pub primary: Link,
    pub secondary: Link,
    pub download_caption: &'static str,
    pub downloads: &'static [DownloadLink],
    pub bullets: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionHeader {
    pub eyebrow: &'static str,
    pub heading: &'static str,
    pub highlight: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub icon: Icon,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Platform {
    pub icon: Icon,
    pub name: &'static str,
    pub description: &'static str,
    pub href: Option<Href>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub role: &'static str,
    pub rating: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub heading: &'static str,
    pub highlight: &'static str,
    pub body: &'static str,
    pub button: Link,
    pub footnote: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub links: &'static [Link],
    pub copyright: &'static str,
}

/// Everything the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageContent {
    pub brand: &'static str,
    pub nav: &'static [Link],
    pub nav_action: Link,
    pub hero: Hero,
    pub features_header: SectionHeader,
    pub features: &'static [Feature],
    pub platforms_header: SectionHeader,
    pub platforms: &'static [Platform],
    pub testimonials_header: SectionHeader,
    pub testimonials: &'static [Testimonial],
    pub cta: CallToAction,
    pub footer: Footer,
}

pub const NAV_LINKS: &[Link] = &[
    Link {
        label: "Features",
        href: Href::Anchor(Section::Features),
    },
    Link {
        label: "Platforms",
        href: Href::Anchor(Section::Platforms),
    },
    Link {
        label: "Testimonials",
        href: Href::Anchor(Section::Testimonials),
    },
    Link {
        label: "Pricing",
        href: Href::Anchor(Section::Cta),
    },
];

pub const DOWNLOADS: &[DownloadLink] = &[
    DownloadLink {
        caption: "Download on the",
        store: "App Store",
        href: Href::Placeholder,
    },
    DownloadLink {
        caption: "Get it on",
        store: "Google Play",
        href: Href::Placeholder,
    },
    DownloadLink {
        caption: "Download for",
        store: "Windows",
        href: Href::Placeholder,
    },
    DownloadLink {
        caption: "Download for",
        store: "macOS",
        href: Href::Placeholder,
    },
    DownloadLink {
        caption: "Download for",
        store: "Linux",
        href: Href::Placeholder,
    },
];

pub const FEATURES: &[Feature] = &[
    Feature {
        icon: Icon::ListTodo,
        title: "Smart Tasks",
        description: "Organize your tasks with subtasks, priorities, and due dates. Stay on top of everything.",
    },
    Feature {
        icon: Icon::Repeat,
        title: "Habit Tracking",
        description: "Build positive habits with streak tracking, flexible schedules, and progress insights.",
    },
    Feature {
        icon: Icon::Timer,
        title: "Focus Timer",
        description: "Stay productive with Pomodoro-style focus sessions and break reminders.",
    },
    Feature {
        icon: Icon::BarChart,
        title: "Smart Analytics",
        description: "Gain insights into your productivity patterns with beautiful charts and reports.",
    },
    Feature {
        icon: Icon::Cloud,
        title: "Cross-Platform Sync",
        description: "Your data syncs seamlessly across all devices. Start on your phone, continue on desktop.",
    },
    Feature {
        icon: Icon::Target,
        title: "Goal Achievement",
        description: "Built with Flutter for native performance on every platform. Beautiful and fast.",
    },
];

pub const PLATFORMS: &[Platform] = &[
    Platform {
        icon: Icon::Smartphone,
        name: "iOS & Android",
        description: "Native mobile experience",
        href: None,
    },
    Platform {
        icon: Icon::Monitor,
        name: "Windows & Mac",
        description: "Full desktop power",
        href: None,
    },
    Platform {
        icon: Icon::Tablet,
        name: "Web App",
        description: "Access anywhere",
        href: Some(Href::WebApp),
    },
];

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "Quest has completely transformed how I manage my daily tasks and habits. The focus timer keeps me productive.",
        author: "Sarah Chen",
        role: "Product Designer",
        rating: 5,
    },
    Testimonial {
        quote: "Finally, a productivity app that combines tasks, habits, and focus sessions. The Flutter performance is unmatched.",
        author: "Marcus Johnson",
        role: "Software Engineer",
        rating: 5,
    },
    Testimonial {
        quote: "The habit tracking feature helped me build a morning routine that stuck. My productivity increased by 40%.",
        author: "Elena Rodriguez",
        role: "Entrepreneur",
        rating: 5,
    },
];

pub const FOOTER_LINKS: &[Link] = &[
    Link {
        label: "Privacy",
        href: Href::Placeholder,
    },
    Link {
        label: "Terms",
        href: Href::Placeholder,
    },
    Link {
        label: "Contact",
        href: Href::Placeholder,
    },
    Link {
        label: "Blog",
        href: Href::Placeholder,
    },
];

pub const PAGE: PageContent = PageContent {
    brand: "Quest",
    nav: NAV_LINKS,
    nav_action: Link {
        label: "Get Started",
        href: Href::WebApp,
    },
    hero: Hero {
        badge: "Now available on all platforms",
        heading: "Master your day,",
        highlight: "achieve your goals",
        tagline: "The all-in-one productivity app with tasks, habits, and focus timer. \
                  Build better habits, stay focused, and accomplish more, all in one beautiful app.",
        primary: Link {
            label: "Try Live App",
            href: Href::WebApp,
        },
        secondary: Link {
            label: "Watch Demo",
            href: Href::Placeholder,
        },
        download_caption: "Download for your platform",
        downloads: DOWNLOADS,
        bullets: &["Free forever plan", "No credit card required", "Cancel anytime"],
    },
    features_header: SectionHeader {
        eyebrow: "FEATURES",
        heading: "Everything you need to",
        highlight: "stay productive",
        body: "Packed with powerful features designed to help you and your team accomplish more, together.",
    },
    features: FEATURES,
    platforms_header: SectionHeader {
        eyebrow: "CROSS-PLATFORM",
        heading: "One app,",
        highlight: "every device",
        body: "Built with Flutter, Quest delivers a truly native experience on every platform. \
               Your productivity stays consistent whether you're on your phone, tablet, or desktop.",
    },
    platforms: PLATFORMS,
    testimonials_header: SectionHeader {
        eyebrow: "TESTIMONIALS",
        heading: "Loved by",
        highlight: "thousands",
        body: "Join thousands of people who have already transformed their productivity with Quest.",
    },
    testimonials: TESTIMONIALS,
    cta: CallToAction {
        heading: "Ready to boost your",
        highlight: "productivity?",
        body: "Join thousands of people who are already achieving more with Quest. \
               Start free, upgrade when you're ready.",
        button: Link {
            label: "Get Started for Free",
            href: Href::WebApp,
        },
        footnote: "No credit card required • Free plan available forever",
    },
    footer: Footer {
        links: FOOTER_LINKS,
        copyright: "© 2026 BOOM Supersonic. All rights reserved.",
    },
};

/// The landing page content.
pub fn page() -> &'static PageContent {
    &PAGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinksConfig;

    #[test]
    fn test_counts() {
        let page = page();
        assert_eq!(page.nav.len(), 4);
        assert_eq!(page.hero.downloads.len(), 5);
        assert_eq!(page.hero.bullets.len(), 3);
        assert_eq!(page.features.len(), 6);
        assert_eq!(page.platforms.len(), 3);
        assert_eq!(page.testimonials.len(), 3);
        assert_eq!(page.footer.links.len(), 4);
    }

    #[test]
    fn test_only_web_app_platform_links_out() {
        let linked: Vec<_> = PLATFORMS
            .iter()
            .filter(|platform| platform.href.is_some())
            .map(|platform| platform.name)
            .collect();
        assert_eq!(linked, vec!["Web App"]);
    }

    #[test]
    fn test_nav_anchors_resolve() {
        for link in NAV_LINKS {
            let Href::Anchor(section) = link.href else {
                panic!("nav link {} is not an anchor", link.label);
            };
            let anchor = section.anchor().unwrap();
            assert_eq!(Section::from_anchor(&format!("#{}", anchor)), Some(section));
        }
        assert_eq!(Section::from_anchor("pricing"), Some(Section::Cta));
        assert_eq!(Section::from_anchor("nowhere"), None);
    }

    #[test]
    fn test_web_app_url_is_valid() {
        let links = LinksConfig::default();
        let resolved = Href::WebApp.resolve(&links.web_app_url).unwrap();
        let url = url::Url::parse(resolved).unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("boomsupersonic.quest"));
        assert!(Href::Placeholder.resolve(&links.web_app_url).is_none());
    }

    #[test]
    fn test_ratings_in_range() {
        assert!(TESTIMONIALS.iter().all(|t| (1..=5).contains(&t.rating)));
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(page()).unwrap();
        assert_eq!(json["features"][0]["title"], "Smart Tasks");
        assert_eq!(json["platforms"][2]["href"]["kind"], "web_app");
        assert_eq!(json["nav"][3]["href"]["target"], "cta");
    }
}
