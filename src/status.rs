//! Status loader contract.
//!
//! Loading and classifying the status listing is the front end's job; this
//! crate only consumes the result. The discarder re-queries with
//! `no_renames` set when it needs a rename split into its two halves.

use crate::file::File;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStatusOpts {
    /// Load with rename detection disabled, so a rename shows up as a
    /// delete plus an add.
    pub no_renames: bool,
}

pub trait StatusLoader {
    fn load(&self, opts: LoadStatusOpts) -> Vec<File>;
}
