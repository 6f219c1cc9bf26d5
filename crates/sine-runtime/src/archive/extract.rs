//! Zip extraction.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use sine_core::{InstallError, InstallResult};
use zip::ZipArchive;
use zip::result::ZipError;

/// Unpack `archive` into `dest_dir` in archive order.
///
/// `created` is called for every directory and file this writes, including
/// `dest_dir` and any parent folders made along the way. Entries whose
/// names would escape `dest_dir` are skipped. There is no rollback: a
/// malformed archive leaves the entries written before the fault.
pub fn extract_archive(
    archive: &Path,
    dest_dir: &Path,
    mut created: impl FnMut(&Path),
) -> InstallResult<()> {
    tracing::info!(archive = %archive.display(), dest = %dest_dir.display(), "Extracting archive");

    make_dirs(dest_dir, &mut created)?;

    let file = File::open(archive).map_err(|e| InstallError::io(archive, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| corrupt(archive, e))?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| corrupt(archive, e))?;
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!(entry = entry.name(), "Skipping entry outside destination");
            continue;
        };
        let target = dest_dir.join(relative);

        if entry.is_dir() {
            make_dirs(&target, &mut created)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            make_dirs(parent, &mut created)?;
        }
        let mut out = File::create(&target).map_err(|e| InstallError::io(&target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                InstallError::corrupt(archive, e)
            }
            _ => InstallError::io(&target, e),
        })?;
        drop(out);
        created(&target);
    }

    tracing::debug!(archive = %archive.display(), entries = zip.len(), "Extraction complete");
    Ok(())
}

/// `create_dir_all`, reporting each directory that did not exist before.
fn make_dirs(dir: &Path, created: &mut impl FnMut(&Path)) -> InstallResult<()> {
    let missing: Vec<&Path> = dir.ancestors().take_while(|p| !p.exists()).collect();
    fs::create_dir_all(dir).map_err(|e| InstallError::io(dir, e))?;
    for path in missing.into_iter().rev() {
        created(path);
    }
    Ok(())
}

fn corrupt(archive: &Path, err: ZipError) -> InstallError {
    match err {
        ZipError::Io(e) if e.kind() != io::ErrorKind::InvalidData => InstallError::io(archive, e),
        other => InstallError::corrupt(archive, other),
    }
}
