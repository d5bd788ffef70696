//! Project records shown in the detail modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub image: &'static str,
    pub code_url: &'static str,
    pub live_url: &'static str,
}

pub const PROJECTS: [Project; 3] = [
    Project {
        id: "alpha",
        title: "Project Alpha",
        description: "A scalable real-time task manager enabling teams to collaborate instantly.",
        features: &[
            "WebSocket powered live updates",
            "Role-based access controls",
            "Optimistic UI with offline support",
        ],
        image: "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"500\" viewBox=\"0 0 800 500\"%3E%3Crect width=\"800\" height=\"500\" rx=\"24\" fill=\"%23222\"/%3E%3Ctext x=\"50%25\" y=\"52%25\" dominant-baseline=\"middle\" text-anchor=\"middle\" font-size=\"32\" font-family=\"Arial\" fill=\"%23fff\"%3EProject Alpha%3C/text%3E%3C/svg%3E",
        code_url: "https://github.com/",
        live_url: "#",
    },
    Project {
        id: "beta",
        title: "Project Beta",
        description: "Analytics dashboard with dynamic charts and granular filters for insights.",
        features: &[
            "Server-side rendering for SEO",
            "Lazy-loaded, accessible charts",
            "CSV export and scheduled reports",
        ],
        image: "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"500\" viewBox=\"0 0 800 500\"%3E%3Crect width=\"800\" height=\"500\" rx=\"24\" fill=\"%2300bcd4\"/%3E%3Ctext x=\"50%25\" y=\"52%25\" dominant-baseline=\"middle\" text-anchor=\"middle\" font-size=\"32\" font-family=\"Arial\" fill=\"white\"%3EProject Beta%3C/text%3E%3C/svg%3E",
        code_url: "https://github.com/",
        live_url: "#",
    },
    Project {
        id: "gamma",
        title: "Project Gamma",
        description: "High-performance landing page optimized for conversions with A/B tests.",
        features: &[
            "Edge-cached assets",
            "AB testing and analytics",
            "Accessibility-first components",
        ],
        image: "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"500\" viewBox=\"0 0 800 500\"%3E%3Crect width=\"800\" height=\"500\" rx=\"24\" fill=\"%239C27B0\"/%3E%3Ctext x=\"50%25\" y=\"52%25\" dominant-baseline=\"middle\" text-anchor=\"middle\" font-size=\"32\" font-family=\"Arial\" fill=\"white\"%3EProject Gamma%3C/text%3E%3C/svg%3E",
        code_url: "https://github.com/",
        live_url: "#",
    },
];

pub fn find(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|project| project.id == id)
}
