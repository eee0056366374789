//! The commerce experience fragment component model.

use turbo_data::GraphqlClient;

use crate::config::FragmentConfig;
use crate::content::{ContentServices, Resource};
use crate::localization::localization_root;
use crate::query::FragmentQuery;
use crate::resolver::{IdentifierResolver, PageKind, RenderRequest};

/// Component resource type of the commerce experience fragment.
pub const RESOURCE_TYPE: &str = "core/cif/components/commerce/experiencefragment/v1/experiencefragment";

/// The page a fragment is rendered on.
#[derive(Debug, Clone)]
pub struct CurrentPage {
    pub path: String,
    pub kind: PageKind,
}

impl CurrentPage {
    pub fn new(path: impl Into<String>, kind: PageKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Everything needed to resolve the fragment for one page render.
pub struct ResolutionContext<'a, C> {
    pub page: CurrentPage,
    pub request: RenderRequest,
    pub config: &'a FragmentConfig,
    pub identifiers: IdentifierResolver<'a, C>,
    pub services: ContentServices<'a>,
}

/// The fragment variation associated with the catalog entity of the current
/// page.
///
/// Resolution happens once, in [`CommerceExperienceFragment::resolve`]. Every
/// failure along the way leaves the model empty instead of failing the page.
#[derive(Debug, Clone, Default)]
pub struct CommerceExperienceFragment {
    resource: Option<Resource>,
    name: Option<String>,
    query: Option<FragmentQuery>,
}

impl CommerceExperienceFragment {
    pub fn resolve<C: GraphqlClient>(context: ResolutionContext<'_, C>) -> Self {
        let ResolutionContext {
            page,
            request,
            config,
            mut identifiers,
            services,
        } = context;

        let Some(identifier) = identifiers.resolve(page.kind, &request) else {
            return Self::default();
        };

        let root = localization_root(&services, &page.path);
        let scope = config.fragments_scope(root.as_ref());
        let query = FragmentQuery::new(scope, identifier, config.fragment_location.clone());

        let resource = find_fragments(&services, &query, &request).into_iter().next();
        let name = resource
            .as_ref()
            .and_then(|resource| fragment_name(&services, resource));

        Self {
            resource,
            name,
            query: Some(query),
        }
    }

    /// The content node of the selected fragment variation.
    pub fn fragment_resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    /// Name of the fragment page that owns the selected variation.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The query used for the lookup, when the page had a catalog entity.
    pub fn query(&self) -> Option<&FragmentQuery> {
        self.query.as_ref()
    }

    pub fn resource_type(&self) -> &'static str {
        RESOURCE_TYPE
    }
}

/// Run the fragment query and map result nodes to resources.
///
/// Query failures are logged and yield no fragments. More than one match is
/// logged and the repository's first match is kept first.
pub fn find_fragments(
    services: &ContentServices<'_>,
    query: &FragmentQuery,
    request: &RenderRequest,
) -> Vec<Resource> {
    tracing::debug!(
        statement = %query.statement(),
        language = query.language().as_str(),
        "looking up experience fragments"
    );

    let paths = match services.queries.execute(query) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::error!(error = %e, uri = %request.uri, "experience fragment query failed");
            return Vec::new();
        }
    };

    let resources: Vec<Resource> = paths
        .iter()
        .filter_map(|path| services.resources.resource(path))
        .collect();

    if resources.len() > 1 {
        tracing::warn!(
            uri = %request.uri,
            location = query.location().unwrap_or_default(),
            count = resources.len(),
            "multiple experience fragments match the current request, using the first one"
        );
    }

    resources
}

/// The fragment name: the page two levels above the variation content node.
pub fn fragment_name(services: &ContentServices<'_>, resource: &Resource) -> Option<String> {
    let variation = services.pages.page(resource.parent_path()?)?;
    let fragment = services.pages.page(variation.parent_path()?)?;
    Some(fragment.name().to_string())
}
