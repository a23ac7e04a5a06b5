//! Writing download artifacts to disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use omniconvert_core::download::DownloadArtifact;

/// Candidate names for `file_name`: the name itself, then
/// `converted_a (1).png`, `converted_a (2).png`, and so on.
fn candidate_names(file_name: &str) -> impl Iterator<Item = String> + '_ {
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (file_name, None),
    };

    std::iter::once(file_name.to_string()).chain((1u32..).map(move |n| match ext {
        Some(ext) => format!("{stem} ({n}).{ext}"),
        None => format!("{stem} ({n})"),
    }))
}

/// Write `artifact` into `dir`, creating the directory if needed.
/// Returns the path written.
///
/// An existing file is never overwritten: each candidate name is opened
/// with `create_new`, so a file appearing between attempts moves the
/// write on to the next suffix.
pub async fn write_artifact(dir: &Path, artifact: &DownloadArtifact) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    for name in candidate_names(&artifact.file_name) {
        let path = dir.join(name);
        let opened = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;

        let mut file = match opened {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        };
        file.write_all(&artifact.bytes).await?;
        file.flush().await?;
        return Ok(path);
    }

    Err(std::io::Error::new(
        ErrorKind::AlreadyExists,
        format!("No free file name for {}", artifact.file_name),
    ))
}
