use serde::Serialize;
use std::sync::Arc;

use super::error::RouteError;
use super::table::{RouteMatch, RouteParams, RouteTable, ViewId};

/// Where to navigate: a concrete path or a named route with params
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    Path(String),
    Named { name: String, params: RouteParams },
}

impl NavigationTarget {
    pub fn named(name: impl Into<String>, params: RouteParams) -> Self {
        NavigationTarget::Named {
            name: name.into(),
            params,
        }
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        NavigationTarget::Path(path.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        NavigationTarget::Path(path)
    }
}

/// A resolved history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Location {
    pub name: String,
    pub view: ViewId,
    pub path: String,
    pub params: RouteParams,
    pub query: Option<String>,
    pub hash: Option<String>,
}

impl Location {
    /// Path including query string and fragment, as shown in the address bar
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if let Some(query) = &self.query {
            full.push('?');
            full.push_str(query);
        }
        if let Some(hash) = &self.hash {
            full.push('#');
            full.push_str(hash);
        }
        full
    }
}

impl From<RouteMatch<'_>> for Location {
    fn from(m: RouteMatch<'_>) -> Self {
        Location {
            name: m.route.name().to_string(),
            view: m.route.view(),
            path: m.path,
            params: m.params,
            query: m.query,
            hash: m.hash,
        }
    }
}

/// Session navigation history over a shared route table
///
/// Owned by the application root and passed by reference to whatever needs
/// to read or trigger navigation. Moving through history never re-resolves
/// entries, so back/forward cannot fail.
#[derive(Debug, Clone)]
pub struct NavigationState {
    table: Arc<RouteTable>,
    entries: Vec<Location>,
    index: usize,
}

impl NavigationState {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            entries: Vec::new(),
            index: 0,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    fn resolve(&self, target: NavigationTarget) -> Result<Location, RouteError> {
        let path = match target {
            NavigationTarget::Path(path) => path,
            NavigationTarget::Named { name, params } => self.table.resolve_by_name(&name, &params)?,
        };
        self.table.resolve(&path).map(Location::from)
    }

    /// Push a new entry, discarding any forward history
    ///
    /// Navigating to the current location is a no-op that returns the current
    /// entry. On error the history is left untouched.
    pub fn navigate(&mut self, target: impl Into<NavigationTarget>) -> Result<&Location, RouteError> {
        let location = self.resolve(target.into())?;

        if self.current() == Some(&location) {
            tracing::debug!("Ignoring duplicate navigation to {}", location.full_path());
            return Ok(&self.entries[self.index]);
        }
        tracing::debug!("Navigating to {} ({:?})", location.full_path(), location.view);

        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
            self.index += 1;
        }
        self.entries.push(location);
        Ok(&self.entries[self.index])
    }

    /// Replace the current entry without growing history
    pub fn replace(&mut self, target: impl Into<NavigationTarget>) -> Result<&Location, RouteError> {
        let location = self.resolve(target.into())?;
        tracing::debug!("Replacing current entry with {}", location.full_path());

        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = location,
            None => self.entries.push(location),
        }
        Ok(&self.entries[self.index])
    }

    /// Move `delta` entries through history; `None` if out of range
    pub fn go(&mut self, delta: isize) -> Option<&Location> {
        let target = self.index.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.index = target;
        self.entries.get(self.index)
    }

    pub fn back(&mut self) -> Option<&Location> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Option<&Location> {
        self.go(1)
    }

    pub fn current(&self) -> Option<&Location> {
        self.entries.get(self.index)
    }

    pub fn can_go_back(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of entries in history
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
