use async_std::fs;
use async_std::io::{ReadExt, stdin};
use async_walkdir::{DirEntry, WalkDir};
use futures::FutureExt;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use log::debug;
use std::io::{Error, ErrorKind, Result};
use std::path::Path;

/// Reads every file of a dir as one document each
fn dir_documents(dir: &str) -> impl Stream<Item = Result<String>> + use<> {
    WalkDir::new(dir).try_filter_map(|dir_entry: DirEntry| async move {
        let path = dir_entry.path();
        let filestem = path
            .file_stem()
            .ok_or_else(|| Error::new(ErrorKind::Other, "No file stem"))?
            .to_string_lossy();
        if path.is_dir() || filestem.starts_with('.') {
            return Ok(None);
        };
        debug!("Reading {}", path.display());
        fs::read_to_string(&path).await.map(Option::Some)
    })
}

/// Reads dir or file as documents
async fn dir_or_file_documents(pathstr: String) -> Result<impl Stream<Item = Result<String>>> {
    let path = Path::new(&pathstr);
    if path.exists() {
        let metadata = fs::metadata(path).await?;
        if metadata.is_file() {
            let doc = fs::read_to_string(&pathstr).await;
            Ok(stream::once(async move { doc }).left_stream())
        } else if metadata.is_dir() {
            Ok(dir_documents(&pathstr).right_stream())
        } else {
            Err(Error::new(
                ErrorKind::InvalidInput,
                "The path is neither a file nor a directory.",
            ))
        }
    } else {
        Err(Error::new(ErrorKind::NotFound, "The path does not exist."))
    }
}

async fn stdin_document() -> Result<String> {
    let mut doc = String::new();
    stdin().read_to_string(&mut doc).await?;
    Ok(doc)
}

/// Reads documents of given dir or file, or stdin if None
pub fn documents(path: Option<String>) -> impl Stream<Item = Result<String>> {
    if let Some(pathstr) = path {
        dir_or_file_documents(pathstr)
            .into_stream()
            .try_flatten()
            .left_stream()
    } else {
        stdin_document().into_stream().right_stream()
    }
}
