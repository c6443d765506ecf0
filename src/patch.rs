use crate::{Edit, Error, Result};
use itertools::Itertools;
use std::{
    io::{Seek, SeekFrom, Write},
    slice,
};

/// A named fix, made of one or more edits. Patches don't share state, so any
/// subset of them can be applied in any order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Patch {
    /// Stable name used on the command line and in progress output.
    pub id: &'static str,
    pub description: &'static str,
    pub edits: &'static [Edit],
}

impl Patch {
    pub fn check(&self, file_len: u64) -> Result<()> {
        self.edits.iter().try_for_each(|edit| edit.check(file_len))
    }

    /// Writes every edit. All of them are checked against the stream length
    /// first, so an invalid patch leaves the stream alone.
    pub fn apply<F: Write + Seek + ?Sized>(&self, fp: &mut F) -> Result<()> {
        let file_len = fp.seek(SeekFrom::End(0))?;
        self.check(file_len)?;
        for edit in self.edits {
            edit.write(fp)?;
        }
        Ok(())
    }
}

/// Patches sorted by id, with no id appearing twice.
#[derive(Clone, Debug, Default)]
pub struct PatchSet {
    patches: Vec<Patch>,
}

impl PatchSet {
    pub fn new(patches: impl IntoIterator<Item = Patch>) -> Result<Self> {
        let patches = patches.into_iter().sorted_by_key(|p| p.id).collect::<Vec<_>>();
        if let Some((dupe, _)) = patches.iter().tuple_windows().find(|(a, b)| a.id == b.id) {
            return Err(Error::DuplicatePatch(dupe.id))
        }
        Ok(Self { patches })
    }

    pub fn get(&self, id: &str) -> Option<&Patch> {
        self.patches.binary_search_by(|p| p.id.cmp(id)).ok().map(|i| &self.patches[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> slice::Iter<'_, Patch> {
        self.patches.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.patches.iter().map(|p| p.id)
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// One line per patch: id padded to a column, then the description.
    pub fn listing(&self) -> String {
        self.patches.iter().map(|p| format!("  {:<21} {}", p.id, p.description)).join("\n")
    }
}

impl<'a> IntoIterator for &'a PatchSet {
    type IntoIter = slice::Iter<'a, Patch>;
    type Item = &'a Patch;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
