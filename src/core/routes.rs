//! Path-style routes between views.
//!
//! Parameters are optional: `/chat/` parses to `Route::Chat(None)` and the
//! chat view reports the missing id inline instead of failing navigation.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Products,
    ProductForm,
    Campaigns,
    CampaignDetail(Option<String>),
    Post {
        campaign_id: Option<String>,
        post_id: Option<String>,
    },
    /// Campaign wizard for a product. Also reached via `/campaign/{productId}`.
    CampaignCreate(Option<String>),
    Chat(Option<String>),
}

/// Top-level section highlighted in the navigation tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Campaigns,
    Products,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Home, Section::Campaigns, Section::Products];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Campaigns => "Campaigns",
            Section::Products => "Products",
        }
    }

    pub fn route(self) -> Route {
        match self {
            Section::Home => Route::Home,
            Section::Campaigns => Route::Campaigns,
            Section::Products => Route::Products,
        }
    }

    /// Derive the active section from a path prefix, defaulting to home.
    pub fn from_path(path: &str) -> Self {
        if path.starts_with("/campaigns") {
            Section::Campaigns
        } else if path.starts_with("/products") {
            Section::Products
        } else {
            Section::Home
        }
    }
}

fn param(segment: Option<&str>) -> Option<String> {
    segment
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let path_only = trimmed.split(['?', '#']).next().unwrap_or_default();
        let mut parts = path_only.trim_start_matches('/').splitn(4, '/');
        let head = parts.next().unwrap_or_default();
        let second = parts.next();
        let third = parts.next();
        let fourth = parts.next();

        let route = match (head, second) {
            ("" | "home", None | Some("")) => Route::Home,
            ("products", None | Some("")) => Route::Products,
            ("products", Some("add")) | ("productform" | "product-form", _) => Route::ProductForm,
            ("campaigns", None | Some("")) => Route::Campaigns,
            ("campaigns", Some("create")) => Route::CampaignCreate(param(third)),
            ("campaigns", Some(id)) if third == Some("posts") => Route::Post {
                campaign_id: param(Some(id)),
                post_id: param(fourth),
            },
            ("campaigns", Some(id)) if third.map_or(true, str::is_empty) => {
                Route::CampaignDetail(param(Some(id)))
            }
            ("campaign", id) => Route::CampaignCreate(param(id)),
            ("chat", id) => Route::Chat(param(id)),
            _ => return Err(RouteError::Unknown(trimmed.to_string())),
        };
        Ok(route)
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        let opt = |id: &Option<String>| id.clone().unwrap_or_default();
        match self {
            Route::Home => "/home".to_string(),
            Route::Products => "/products".to_string(),
            Route::ProductForm => "/products/add".to_string(),
            Route::Campaigns => "/campaigns".to_string(),
            Route::CampaignDetail(id) => format!("/campaigns/{}", opt(id)),
            Route::Post {
                campaign_id,
                post_id,
            } => format!("/campaigns/{}/posts/{}", opt(campaign_id), opt(post_id)),
            Route::CampaignCreate(id) => format!("/campaigns/create/{}", opt(id)),
            Route::Chat(id) => format!("/chat/{}", opt(id)),
        }
    }

    pub fn section(&self) -> Section {
        Section::from_path(&self.path())
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Products => "Products",
            Route::ProductForm => "Add Product",
            Route::Campaigns => "Campaigns",
            Route::CampaignDetail(_) => "Campaign",
            Route::Post { .. } => "Post",
            Route::CampaignCreate(_) => "Plan Campaign",
            Route::Chat(_) => "Product Chat",
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn id(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[rstest]
    #[case("/home", Route::Home)]
    #[case("/", Route::Home)]
    #[case("/products", Route::Products)]
    #[case("/products/add", Route::ProductForm)]
    #[case("/productform", Route::ProductForm)]
    #[case("/product-form", Route::ProductForm)]
    #[case("/campaigns", Route::Campaigns)]
    #[case("/campaigns/c1", Route::CampaignDetail(id("c1")))]
    #[case("/campaigns/c1/posts/s9", Route::Post { campaign_id: id("c1"), post_id: id("s9") })]
    #[case("/campaigns/c1/posts/", Route::Post { campaign_id: id("c1"), post_id: None })]
    #[case("/campaigns/create/p1", Route::CampaignCreate(id("p1")))]
    #[case("/campaigns/create/", Route::CampaignCreate(None))]
    #[case("/campaigns/create", Route::CampaignCreate(None))]
    #[case("/campaign/p1", Route::CampaignCreate(id("p1")))]
    #[case("/chat/p1", Route::Chat(id("p1")))]
    #[case("/chat", Route::Chat(None))]
    #[case("/chat/p1?from=home", Route::Chat(id("p1")))]
    fn test_parse(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::parse(path).unwrap(), expected);
    }

    #[rstest]
    #[case("/profile")]
    #[case("/campaigns/c1/edit")]
    #[case("/settings/advanced")]
    fn test_unknown_routes(#[case] path: &str) {
        assert!(matches!(Route::parse(path), Err(RouteError::Unknown(_))));
    }

    #[test]
    fn test_path_round_trip() {
        let routes = [
            Route::Home,
            Route::ProductForm,
            Route::CampaignDetail(id("c1")),
            Route::Post {
                campaign_id: id("c1"),
                post_id: id("s1"),
            },
            Route::CampaignCreate(id("p1")),
            Route::Chat(id("p1")),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()).unwrap(), route);
        }
    }

    #[rstest]
    #[case("/home", Section::Home)]
    #[case("/campaigns/c1/posts/s1", Section::Campaigns)]
    #[case("/campaigns/create/p1", Section::Campaigns)]
    #[case("/products/add", Section::Products)]
    #[case("/chat/p1", Section::Home)]
    #[case("/profile", Section::Home)]
    fn test_section_from_path(#[case] path: &str, #[case] expected: Section) {
        assert_eq!(Section::from_path(path), expected);
    }
}
