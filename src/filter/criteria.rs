use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::catalog::OrbitClass;

/// What the catalog is filtered by. An unset bound or an empty set leaves that
/// dimension unconstrained.
///
/// Values are never modified in place; [`FilterCriteria::update`] builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    min_launch: Option<NaiveDate>,
    max_launch: Option<NaiveDate>,
    orbit_classes: BTreeSet<OrbitClass>,
    owners: BTreeSet<String>,
    user_types: BTreeSet<String>,
    purposes: BTreeSet<String>,
    active: Option<bool>,
}

impl FilterCriteria {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Copy of `self` with the dimensions named in `change` replaced.
    pub fn update(&self, change: CriteriaUpdate) -> Self {
        let current = self.clone();
        Self {
            min_launch: change.min_launch.unwrap_or(current.min_launch),
            max_launch: change.max_launch.unwrap_or(current.max_launch),
            orbit_classes: change.orbit_classes.unwrap_or(current.orbit_classes),
            owners: change.owners.unwrap_or(current.owners),
            user_types: change.user_types.unwrap_or(current.user_types),
            purposes: change.purposes.unwrap_or(current.purposes),
            active: change.active.unwrap_or(current.active),
        }
    }

    pub fn min_launch(&self) -> Option<NaiveDate> {
        self.min_launch
    }

    pub fn max_launch(&self) -> Option<NaiveDate> {
        self.max_launch
    }

    pub fn orbit_classes(&self) -> &BTreeSet<OrbitClass> {
        &self.orbit_classes
    }

    pub fn owners(&self) -> &BTreeSet<String> {
        &self.owners
    }

    pub fn user_types(&self) -> &BTreeSet<String> {
        &self.user_types
    }

    pub fn purposes(&self) -> &BTreeSet<String> {
        &self.purposes
    }

    /// `Some(true)`: active only, `Some(false)`: inactive only, `None`: either.
    pub fn active(&self) -> Option<bool> {
        self.active
    }
}

/// Partial criteria. Dimensions left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaUpdate {
    pub min_launch: Option<Option<NaiveDate>>,
    pub max_launch: Option<Option<NaiveDate>>,
    pub orbit_classes: Option<BTreeSet<OrbitClass>>,
    pub owners: Option<BTreeSet<String>>,
    pub user_types: Option<BTreeSet<String>>,
    pub purposes: Option<BTreeSet<String>>,
    pub active: Option<Option<bool>>,
}

impl CriteriaUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_launch(mut self, date: Option<NaiveDate>) -> Self {
        self.min_launch = Some(date);
        self
    }

    pub fn max_launch(mut self, date: Option<NaiveDate>) -> Self {
        self.max_launch = Some(date);
        self
    }

    pub fn orbit_classes(mut self, classes: impl IntoIterator<Item = OrbitClass>) -> Self {
        self.orbit_classes = Some(classes.into_iter().collect());
        self
    }

    pub fn owners<S: Into<String>>(mut self, owners: impl IntoIterator<Item = S>) -> Self {
        self.owners = Some(owners.into_iter().map(Into::into).collect());
        self
    }

    pub fn user_types<S: Into<String>>(mut self, users: impl IntoIterator<Item = S>) -> Self {
        self.user_types = Some(users.into_iter().map(Into::into).collect());
        self
    }

    pub fn purposes<S: Into<String>>(mut self, purposes: impl IntoIterator<Item = S>) -> Self {
        self.purposes = Some(purposes.into_iter().map(Into::into).collect());
        self
    }

    pub fn active(mut self, active: Option<bool>) -> Self {
        self.active = Some(active);
        self
    }
}
