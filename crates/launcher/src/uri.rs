//! Request URI resolution.
//!
//! Every URI is produced from the immutable [`URI_TEMPLATE`] plus the
//! launcher's immutable configuration, into a fresh string. Nothing here
//! mutates shared state, so concurrent or repeated resolutions cannot bleed
//! into each other.

use queuebuild_core::error::LaunchError;
use queuebuild_core::mode::ConnectionMode;
use std::fmt;

/// `VERB {protocol}://{instance}/{collection}/{team-project}/_apis/{area}/{resource}?api-version={version}`
pub const URI_TEMPLATE: &str =
    "{protocol}://{instance}/{collection}/{team-project}/_apis/{area}/{resource}?api-version={version}";

/// API area for everything build related.
pub const BUILD_AREA: &str = "build";

/// Resource used to queue (POST) and list builds.
pub const BUILDS_RESOURCE: &str = "builds";

/// The leading part of [`URI_TEMPLATE`] a context-supplied collection URL replaces.
const BASE_SEGMENT: &str = "{protocol}://{instance}/{collection}";

/// A named hole in the URI template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Protocol,
    Instance,
    Collection,
    TeamProject,
    Area,
    Resource,
    Version,
}

impl Placeholder {
    pub const ALL: [Placeholder; 7] = [
        Self::Protocol,
        Self::Instance,
        Self::Collection,
        Self::TeamProject,
        Self::Area,
        Self::Resource,
        Self::Version,
    ];

    /// The leading placeholders a context collection URL stands in for.
    pub const BASE: [Placeholder; 3] = [Self::Protocol, Self::Instance, Self::Collection];

    fn index(self) -> usize {
        self as usize
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::Instance => "instance",
            Self::Collection => "collection",
            Self::TeamProject => "team-project",
            Self::Area => "area",
            Self::Resource => "resource",
            Self::Version => "version",
        }
    }

    /// The literal `{name}` token in the template.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Protocol => "{protocol}",
            Self::Instance => "{instance}",
            Self::Collection => "{collection}",
            Self::TeamProject => "{team-project}",
            Self::Area => "{area}",
            Self::Resource => "{resource}",
            Self::Version => "{version}",
        }
    }
}

/// A URI that may still contain placeholders.
///
/// Values are recorded per placeholder and the template is rendered in one
/// left-to-right pass, so a value is emitted exactly once and never scanned
/// for tokens again. Only [`PartialUri::into_uri`] turns it into something
/// that can be sent, and it refuses while any placeholder remains.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartialUri {
    values: [Option<String>; 7],
    base: Option<String>,
    rendered: String,
}

impl PartialUri {
    /// The untouched template.
    pub fn template() -> Self {
        Self::default().render()
    }

    /// Substitute a placeholder. A placeholder that is already filled
    /// keeps its first value.
    pub fn fill(&self, placeholder: Placeholder, value: &str) -> Self {
        let mut next = self.clone();
        if next.contains(placeholder) {
            next.values[placeholder.index()] = Some(value.to_string());
        }
        next.render()
    }

    /// Replace `{protocol}://{instance}/{collection}` with a full collection URL.
    pub fn splice_base(&self, collection_url: &str) -> Self {
        let mut next = self.clone();
        if Placeholder::BASE.iter().all(|p| next.contains(*p)) {
            next.base = Some(collection_url.trim_end_matches('/').to_string());
        }
        next.render()
    }

    pub fn contains(&self, placeholder: Placeholder) -> bool {
        let spliced = self.base.is_some() && Placeholder::BASE.contains(&placeholder);
        !spliced && self.values[placeholder.index()].is_none()
    }

    /// Whether protocol, instance and collection are all filled in.
    pub fn has_base(&self) -> bool {
        !Placeholder::BASE.iter().any(|p| self.contains(*p))
    }

    pub fn unresolved(&self) -> Vec<Placeholder> {
        Placeholder::ALL
            .into_iter()
            .filter(|p| self.contains(*p))
            .collect()
    }

    /// Finish resolution; fails if any placeholder is left.
    pub fn into_uri(self) -> Result<String, LaunchError> {
        let missing = self.unresolved();
        if missing.is_empty() {
            Ok(self.rendered)
        } else {
            let names: Vec<&str> = missing.iter().map(|p| p.name()).collect();
            Err(LaunchError::MissingParameter(names.join(", ")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    fn render(mut self) -> Self {
        let mut out = String::with_capacity(URI_TEMPLATE.len());
        let mut rest = URI_TEMPLATE;
        if let Some(base) = &self.base {
            out.push_str(base);
            rest = &URI_TEMPLATE[BASE_SEGMENT.len()..];
        }

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let close = rest[open..].find('}').map_or(rest.len(), |i| open + i + 1);
            let token = &rest[open..close];
            let value = Placeholder::from_token(token)
                .and_then(|p| self.values[p.index()].as_deref());
            out.push_str(value.unwrap_or(token));
            rest = &rest[close..];
        }
        out.push_str(rest);

        self.rendered = out;
        self
    }
}

impl fmt::Display for PartialUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// Resolves request URIs for one launcher.
#[derive(Debug, Clone)]
pub struct UriResolver {
    mode: ConnectionMode,
    api_version: String,
}

impl UriResolver {
    pub fn new(mode: ConnectionMode, api_version: impl Into<String>) -> Self {
        Self {
            mode,
            api_version: api_version.into(),
        }
    }

    pub fn mode(&self) -> &ConnectionMode {
        &self.mode
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Fully resolve the queue URI for an explicit collection and project.
    pub fn resolve(&self, collection: &str, project: &str) -> Result<String, LaunchError> {
        self.resolve_with_version(collection, project, &self.api_version)
    }

    pub fn resolve_with_version(
        &self,
        collection: &str,
        project: &str,
        version: &str,
    ) -> Result<String, LaunchError> {
        self.resolve_resource(collection, project, BUILDS_RESOURCE, version)
    }

    fn resolve_resource(
        &self,
        collection: &str,
        project: &str,
        resource: &str,
        version: &str,
    ) -> Result<String, LaunchError> {
        let (protocol, instance) = match &self.mode {
            ConnectionMode::Explicit { endpoint, .. } => (endpoint.protocol, endpoint.instance()),
            ConnectionMode::Context(_) => Default::default(),
        };

        for (name, value) in [
            (Placeholder::Instance, instance.as_str()),
            (Placeholder::Collection, collection),
            (Placeholder::TeamProject, project),
            (Placeholder::Resource, resource),
        ] {
            if value.is_empty() {
                return Err(LaunchError::MissingParameter(name.name().into()));
            }
        }

        PartialUri::template()
            .fill(Placeholder::Protocol, protocol.as_str())
            .fill(Placeholder::Instance, &instance)
            .fill(Placeholder::Collection, collection)
            .fill(Placeholder::TeamProject, project)
            .fill(Placeholder::Area, BUILD_AREA)
            .fill(Placeholder::Resource, resource)
            .fill(Placeholder::Version, version)
            .into_uri()
    }

    /// The template as the construction mode leaves it.
    ///
    /// In context mode the collection URL and team project from the
    /// environment are already substituted; `{area}`, `{resource}` and
    /// `{version}` remain. In explicit mode this is the bare template.
    pub fn base_uri(&self) -> PartialUri {
        let template = PartialUri::template();
        let ConnectionMode::Context(context) = &self.mode else {
            return template;
        };

        let uri = match &context.collection_uri {
            Some(url) => template.splice_base(url),
            None => template,
        };
        match &context.team_project {
            Some(project) => uri.fill(Placeholder::TeamProject, project),
            None => uri,
        }
    }

    /// URI for `POST` to queue a build.
    pub fn queue_request_uri(&self) -> Result<String, LaunchError> {
        self.request_uri(BUILDS_RESOURCE)
    }

    /// URI for `GET` of a single build.
    pub fn build_uri(&self, build_id: u64) -> Result<String, LaunchError> {
        self.request_uri(&format!("{BUILDS_RESOURCE}/{build_id}"))
    }

    fn request_uri(&self, resource: &str) -> Result<String, LaunchError> {
        let base = self.base_uri();

        if base.has_base() {
            let base = match self.stored_project() {
                Some(project) if base.contains(Placeholder::TeamProject) => {
                    base.fill(Placeholder::TeamProject, project)
                }
                _ => base,
            };
            return base
                .fill(Placeholder::Area, BUILD_AREA)
                .fill(Placeholder::Resource, resource)
                .fill(Placeholder::Version, &self.api_version)
                .into_uri();
        }

        self.resolve_resource(
            self.stored_collection().unwrap_or_default(),
            self.stored_project().unwrap_or_default(),
            resource,
            &self.api_version,
        )
    }

    fn stored_collection(&self) -> Option<&str> {
        match &self.mode {
            ConnectionMode::Explicit { target, .. } => {
                target.as_ref().map(|t| t.collection.as_str())
            }
            ConnectionMode::Context(_) => None,
        }
    }

    fn stored_project(&self) -> Option<&str> {
        match &self.mode {
            ConnectionMode::Explicit { target, .. } => {
                target.as_ref().map(|t| t.team_project.as_str())
            }
            ConnectionMode::Context(context) => context.team_project.as_deref(),
        }
    }
}
