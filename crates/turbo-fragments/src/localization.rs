//! Localization root lookup.
//!
//! A page's localization root decides which branch of fragment storage is
//! searched. Lookups run in order and the first one that finds a non-empty
//! path wins:
//!
//! 1. the language root above the page
//! 2. the blueprint path, when the page is blueprint source content
//! 3. the live copy path, when the page lies inside a live copy

use crate::content::{ContentServices, Resource};

/// Where a localization root came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalizationRoot {
    LanguageRoot(String),
    Blueprint(String),
    LiveCopy(String),
}

impl LocalizationRoot {
    pub fn path(&self) -> &str {
        match self {
            LocalizationRoot::LanguageRoot(path)
            | LocalizationRoot::Blueprint(path)
            | LocalizationRoot::LiveCopy(path) => path,
        }
    }
}

/// One localization lookup strategy.
pub type LocalizationLookup = fn(&ContentServices<'_>, &Resource) -> Option<LocalizationRoot>;

/// Lookup strategies in priority order.
pub const LOCALIZATION_LOOKUPS: [LocalizationLookup; 3] = [language_root, blueprint_root, live_copy_root];

/// The localization root of the page at `page_path`, if any lookup finds one.
pub fn localization_root(services: &ContentServices<'_>, page_path: &str) -> Option<LocalizationRoot> {
    if page_path.is_empty() {
        return None;
    }
    let resource = services.resources.resource(page_path)?;
    LOCALIZATION_LOOKUPS
        .iter()
        .find_map(|lookup| lookup(services, &resource))
}

fn non_empty(path: String) -> Option<String> {
    (!path.is_empty()).then_some(path)
}

/// The language root page above the resource.
pub fn language_root(services: &ContentServices<'_>, resource: &Resource) -> Option<LocalizationRoot> {
    let page = services.languages.language_root(resource)?;
    non_empty(page.path().to_string()).map(LocalizationRoot::LanguageRoot)
}

/// The blueprint path of the first live relationship, for source content.
pub fn blueprint_root(services: &ContentServices<'_>, resource: &Resource) -> Option<LocalizationRoot> {
    let relationships = services.relationships;
    let lookup = relationships.is_source(resource).and_then(|is_source| {
        if !is_source {
            return Ok(None);
        }
        let found = relationships.live_relationships(resource)?;
        Ok(found
            .into_iter()
            .next()
            .and_then(|relationship| relationship.live_copy)
            .map(|live_copy| live_copy.blueprint_path))
    });

    match lookup {
        Ok(path) => path.and_then(non_empty).map(LocalizationRoot::Blueprint),
        Err(e) => {
            tracing::error!(path = resource.path(), error = %e, "blueprint lookup failed");
            None
        }
    }
}

/// The live copy path, for content inside a live copy.
pub fn live_copy_root(services: &ContentServices<'_>, resource: &Resource) -> Option<LocalizationRoot> {
    let relationships = services.relationships;
    let lookup = relationships.has_live_relationship(resource).and_then(|has_relationship| {
        if !has_relationship {
            return Ok(None);
        }
        let relationship = relationships.live_relationship(resource)?;
        Ok(relationship
            .and_then(|relationship| relationship.live_copy)
            .map(|live_copy| live_copy.path))
    });

    match lookup {
        Ok(path) => path.and_then(non_empty).map(LocalizationRoot::LiveCopy),
        Err(e) => {
            tracing::error!(path = resource.path(), error = %e, "live copy lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::LiveCopy;
    use crate::memory::InMemoryContentStore;

    #[test]
    fn test_language_root_wins() {
        let store = InMemoryContentStore::new()
            .with_page("/content/venia/us/en/products")
            .with_language_root("/content/venia/us/en")
            .with_live_copy(LiveCopy::new("/content/venia/us/en", "/content/venia/fr/fr"));
        let services = ContentServices::from_store(&store);

        assert_eq!(
            localization_root(&services, "/content/venia/us/en/products"),
            Some(LocalizationRoot::LanguageRoot("/content/venia/us/en".to_string()))
        );
    }

    #[test]
    fn test_blueprint_before_live_copy() {
        let store = InMemoryContentStore::new()
            .with_page("/content/blueprint/products")
            .with_live_copy(LiveCopy::new("/content/blueprint", "/content/copy"));
        let services = ContentServices::from_store(&store);

        assert_eq!(
            localization_root(&services, "/content/blueprint/products"),
            Some(LocalizationRoot::Blueprint("/content/blueprint".to_string()))
        );
    }

    #[test]
    fn test_live_copy_root() {
        let store = InMemoryContentStore::new()
            .with_page("/content/copy/products")
            .with_live_copy(LiveCopy::new("/content/blueprint", "/content/copy"));
        let services = ContentServices::from_store(&store);

        assert_eq!(
            localization_root(&services, "/content/copy/products"),
            Some(LocalizationRoot::LiveCopy("/content/copy".to_string()))
        );
    }

    #[test]
    fn test_no_root() {
        let store = InMemoryContentStore::new().with_page("/content/site/page");
        let services = ContentServices::from_store(&store);

        assert_eq!(localization_root(&services, "/content/site/page"), None);
        assert_eq!(localization_root(&services, ""), None);
        assert_eq!(localization_root(&services, "/content/missing"), None);
    }

    #[test]
    fn test_relationship_failure_is_absorbed() {
        let store = InMemoryContentStore::new()
            .with_page("/content/copy/products")
            .with_live_copy(LiveCopy::new("/content/blueprint", "/content/copy"))
            .failing_relationships("sync service unavailable");
        let services = ContentServices::from_store(&store);

        assert_eq!(localization_root(&services, "/content/copy/products"), None);
    }
}
