use crate::{Error, Patch, PatchSet, Result};
use std::collections::BTreeSet;

/// Which patches a run applies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    All,
    Only(BTreeSet<String>),
    Except(BTreeSet<String>),
}

impl Selection {
    /// Builds a selection from `--enabled` and `--disabled` lists. An empty
    /// list counts as not given; giving both is an error.
    pub fn from_lists(enabled: Vec<String>, disabled: Vec<String>) -> Result<Self> {
        match (enabled.is_empty(), disabled.is_empty()) {
            (false, false) => Err(Error::ConflictingSelection),
            (false, true) => Ok(Self::Only(enabled.into_iter().collect())),
            (true, false) => Ok(Self::Except(disabled.into_iter().collect())),
            (true, true) => Ok(Self::All),
        }
    }

    pub fn only<I: IntoIterator<Item = S>, S: Into<String>>(ids: I) -> Self {
        Self::Only(ids.into_iter().map(Into::into).collect())
    }

    pub fn except<I: IntoIterator<Item = S>, S: Into<String>>(ids: I) -> Self {
        Self::Except(ids.into_iter().map(Into::into).collect())
    }

    /// Picks the selected patches out of `set`, keeping its order. Every id
    /// named in the selection must exist in `set`.
    pub fn resolve<'a>(&self, set: &'a PatchSet) -> Result<Vec<&'a Patch>> {
        match self {
            Self::All => Ok(set.iter().collect()),
            Self::Only(ids) => {
                Self::check_known(ids, set)?;
                Ok(set.iter().filter(|p| ids.contains(p.id)).collect())
            },
            Self::Except(ids) => {
                Self::check_known(ids, set)?;
                Ok(set.iter().filter(|p| !ids.contains(p.id)).collect())
            },
        }
    }

    fn check_known(ids: &BTreeSet<String>, set: &PatchSet) -> Result<()> {
        match ids.iter().find(|id| !set.contains(id)) {
            Some(id) => Err(Error::UnknownPatch(id.clone())),
            None => Ok(()),
        }
    }
}
