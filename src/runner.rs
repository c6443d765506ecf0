use crate::{Error, Patch, PatchSet, Result, Selection};
use std::{
    fs::{File, OpenOptions},
    io::{Seek, Write},
    path::Path,
};

/// Applies patches from a set to a file, reporting progress to `out`.
pub struct Runner<'a, O: Write> {
    patches: &'a PatchSet,
    out: O,
}

impl<'a, O: Write> Runner<'a, O> {
    pub fn new(patches: &'a PatchSet, out: O) -> Self {
        Self { patches, out }
    }

    /// Resolves `selection` and patches `path` in place. The selection is
    /// checked before the file is opened. A failure stops the run, leaving
    /// earlier patches applied.
    pub fn run(&mut self, selection: &Selection, path: &Path) -> Result<()> {
        let selected = selection.resolve(self.patches)?;
        tracing::debug!("{} of {} patches selected", selected.len(), self.patches.len());
        let mut fp = open(path)?;
        self.apply(&selected, &mut fp)
    }

    pub fn apply<F: Write + Seek + ?Sized>(&mut self, selected: &[&Patch], fp: &mut F) -> Result<()> {
        for patch in selected {
            fp.rewind()?;
            writeln!(self.out, "Patching: {}: {}", patch.id, patch.description)?;
            tracing::info!("applying {} ({} edits)", patch.id, patch.edits.len());
            patch.apply(fp)?;
        }
        fp.flush()?;
        writeln!(self.out, "Done")?;
        Ok(())
    }

    pub fn into_output(self) -> O {
        self.out
    }
}

fn open(path: &Path) -> Result<File> {
    OpenOptions::new().read(true).write(true).open(path).map_err(|e| Error::FileIoError(e, path.to_path_buf()))
}
