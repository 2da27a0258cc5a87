use super::SubPage;

/// Builds contract page paths for one route tree.
pub trait PathBuilder {
    /// Contract overview page, the redirect target for unsupported sub-pages.
    fn landing(&self, chain: &str, address: &str) -> String;

    fn sub_page(&self, chain: &str, address: &str, page: SubPage) -> String {
        let landing = self.landing(chain, address);
        match page {
            SubPage::Overview => landing,
            page => format!("{landing}/{}", page.slug()),
        }
    }
}

/// `/{chain}/{address}`
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectPaths;

impl PathBuilder for DirectPaths {
    fn landing(&self, chain: &str, address: &str) -> String { format!("/{chain}/{address}") }
}

/// `/team/{team}/{project}/contract/{chain}/{address}`
#[derive(Clone, Copy, Debug)]
pub struct ProjectPaths<'a> {
    team_slug: &'a str,
    project_slug: &'a str,
}

impl<'a> ProjectPaths<'a> {
    pub fn new(team_slug: &'a str, project_slug: &'a str) -> Self { Self { team_slug, project_slug } }
}

impl PathBuilder for ProjectPaths<'_> {
    fn landing(&self, chain: &str, address: &str) -> String {
        format!("/team/{}/{}/contract/{chain}/{address}", self.team_slug, self.project_slug)
    }
}
