use flate2::read::GzDecoder;
use indicatif::ProgressBar;
use reqwest::blocking;
use std::{
    fs,
    io::Read,
    path::{Component, Path},
};
use tar::{Archive, EntryType};
use tracing::{debug, info};

use crate::{error::FetchError, template::DirectRef};

/// Downloads the tree referenced by a [`DirectRef`] into `dest`.
///
/// One call is one terminal outcome. Nothing is retried and nothing already
/// written under `dest` is removed on failure.
pub trait Fetch {
    fn fetch(
        &self,
        reference: &DirectRef,
        dest: &Path,
        progress: &ProgressBar,
    ) -> Result<(), FetchError>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(
        &self,
        reference: &DirectRef,
        dest: &Path,
        progress: &ProgressBar,
    ) -> Result<(), FetchError> {
        (**self).fetch(reference, dest, progress)
    }
}

/// Fetches the branch tarball over HTTPS and unpacks it without history.
#[derive(Debug, Default, Clone)]
pub struct HttpFetcher;

impl Fetch for HttpFetcher {
    fn fetch(
        &self,
        reference: &DirectRef,
        dest: &Path,
        progress: &ProgressBar,
    ) -> Result<(), FetchError> {
        let url = reference.archive_url()?;
        debug!(%reference, %url, "requesting archive");
        let client = blocking::Client::new();
        let response = client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status, url });
        }
        let unpacked = extract(progress.wrap_read(response), dest)?;
        info!(entries = unpacked, dest = %dest.display(), "template extracted");
        Ok(())
    }
}

/// Unpacks a gzipped tarball into `dest`, dropping the archive's top-level
/// directory. Returns the number of entries written.
///
/// Entry paths and link targets must stay below `dest`: symlinks may only
/// point downwards and hard links are re-rooted at `dest`.
pub fn extract<R: Read>(reader: R, dest: &Path) -> Result<usize, FetchError> {
    let mut archive = Archive::new(GzDecoder::new(reader));
    fs::create_dir_all(dest)?;
    let mut unpacked = 0;
    for entry in archive.entries()? {
        let mut entry = entry?;
        let kind = entry.header().entry_type();
        if matches!(kind, EntryType::XGlobalHeader | EntryType::XHeader) {
            continue;
        }
        let path = entry.path()?.into_owned();
        let Some(relative) = strip_top_level(&path)? else {
            continue;
        };
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        if kind.is_hard_link() || kind.is_symlink() {
            let link = entry
                .link_name()?
                .ok_or_else(|| FetchError::UnsafeEntry(path.display().to_string()))?
                .into_owned();
            if kind.is_hard_link() {
                let source = strip_top_level(&link)?
                    .ok_or_else(|| FetchError::UnsafeEntry(link.display().to_string()))?;
                fs::hard_link(dest.join(source), &target)?;
                unpacked += 1;
                continue;
            }
            if link.as_os_str().is_empty() || !descends(&link) {
                return Err(FetchError::UnsafeEntry(format!(
                    "{} -> {}",
                    path.display(),
                    link.display()
                )));
            }
        }

        entry.unpack(&target)?;
        unpacked += 1;
    }
    Ok(unpacked)
}

/// `None` for the top-level directory itself.
fn strip_top_level(path: &Path) -> Result<Option<&Path>, FetchError> {
    let mut components = path.components();
    components.next();
    let relative = components.as_path();
    if relative.as_os_str().is_empty() {
        return Ok(None);
    }
    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(FetchError::UnsafeEntry(path.display().to_string()));
    }
    Ok(Some(relative))
}

fn descends(link: &Path) -> bool {
    link.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
