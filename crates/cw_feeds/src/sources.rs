/// One configured RSS source.
#[derive(Debug, Clone)]
pub struct FeedSource {
    /// Short slug used in synthetic ids.
    pub slug: &'static str,
    /// Human-readable outlet/agency name.
    pub name: &'static str,
    /// Coverage label used when the gazetteer finds nothing more specific.
    pub location: &'static str,
    pub url: &'static str,
    /// Base for resolving relative item links.
    pub base_url: &'static str,
    pub enabled: bool,
    /// General-news feeds get the crime keyword screen; law-enforcement
    /// sources publish nothing else and skip it.
    pub filter_crime: bool,
}

/// The default source registry.
pub fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource {
            slug: "wral",
            name: "WRAL News",
            location: "Statewide, NC",
            url: "https://www.wral.com/news/rss/48",
            base_url: "https://www.wral.com",
            enabled: true,
            filter_crime: true,
        },
        FeedSource {
            slug: "charlotte-observer",
            name: "Charlotte Observer",
            location: "Charlotte Metro, NC",
            url: "https://rss.app/feeds/tvI8Yljaufh8bKGI.xml",
            base_url: "https://www.charlotteobserver.com",
            enabled: true,
            filter_crime: true,
        },
        FeedSource {
            slug: "news-observer",
            name: "News & Observer",
            location: "Triangle/Raleigh, NC",
            url: "https://rss.app/feeds/tDDgqBliLo6e3NdL.xml",
            base_url: "https://www.newsobserver.com",
            enabled: true,
            filter_crime: true,
        },
        FeedSource {
            slug: "spectrum",
            name: "Spectrum News",
            location: "Charlotte, NC",
            url: "https://rss.app/feeds/t96LtdAzAj7QgM23.xml",
            base_url: "https://spectrumlocalnews.com",
            enabled: true,
            filter_crime: true,
        },
        // Department feeds go live once their feed ids are provisioned.
        FeedSource {
            slug: "charlotte-pd",
            name: "Charlotte-Mecklenburg Police",
            location: "Charlotte, Mecklenburg County",
            url: "https://rss.app/feeds/PENDING.xml",
            base_url: "https://www.charlottenc.gov",
            enabled: false,
            filter_crime: false,
        },
        FeedSource {
            slug: "wake-sheriff",
            name: "Wake County Sheriff's Office",
            location: "Wake County",
            url: "https://rss.app/feeds/PENDING.xml",
            base_url: "https://www.wake.gov",
            enabled: false,
            filter_crime: false,
        },
    ]
}

/// Only the sources that should be fetched.
pub fn enabled_sources() -> Vec<FeedSource> {
    default_sources().into_iter().filter(|s| s.enabled).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_subset() {
        let all = default_sources();
        let enabled = enabled_sources();
        assert!(enabled.len() < all.len());
        assert!(enabled.iter().all(|s| s.enabled));
    }

    #[test]
    fn test_slugs_unique() {
        let all = default_sources();
        let mut slugs: Vec<_> = all.iter().map(|s| s.slug).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), all.len());
    }
}
