use std::collections::HashMap;
use std::io::Write;

use ipfs_core::{EndpointRequest, FileUpload, Result, decode_lines, require_as};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Client;

/// Outcome of adding one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedFile {
    /// Name the file was uploaded under.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Client {
    /// Writes the contents of the file at `path` (e.g. `/ipfs/<cid>/readme`)
    /// into `sink`.
    pub fn files_get(&self, path: &str, sink: &mut dyn Write) -> Result<()> {
        self.fetch_to_sink(EndpointRequest::new("cat").arg(path), sink)
    }

    /// Adds `files` and returns one record per name the daemon reported,
    /// in the order each name first appeared in its reply.
    pub fn files_add(&self, files: &[FileUpload]) -> Result<Vec<AddedFile>> {
        let request = EndpointRequest::new("add").flag("progress", true);
        let body = self.fetch_raw(request, files)?;
        merge_add_progress(&body)
    }

    pub fn files_ls(&self, path: &str) -> Result<Value> {
        self.fetch_json(EndpointRequest::new("file/ls").arg(path), &[])
    }
}

/// Folds the progress stream of `add` into one record per name.
///
/// Each line reports part of the outcome for one name, e.g.
///
/// ```text
/// {"Name":"foo.txt","Bytes":4}
/// {"Name":"foo.txt","Hash":"QmWPyMW2u7J2Zyzut7TcBMT8pG6F2cB4hmZk1vBJFBt1nP"}
/// ```
///
/// Lines for different names may interleave. Records come out in the order
/// their name first appeared; later lines overwrite earlier values.
fn merge_add_progress(body: &[u8]) -> Result<Vec<AddedFile>> {
    let mut files: Vec<AddedFile> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for line in decode_lines(body) {
        let (number, event) = line?;
        let name: String = require_as(&event, "Name", Some(number))?;

        let index = *by_name.entry(name.clone()).or_insert_with(|| {
            files.push(AddedFile {
                path: name,
                ..AddedFile::default()
            });
            files.len() - 1
        });
        let file = &mut files[index];

        if event.get("Hash").is_some() {
            file.hash = Some(require_as(&event, "Hash", Some(number))?);
        }
        if event.get("Bytes").is_some() {
            file.size = Some(require_as(&event, "Bytes", Some(number))?);
        }
    }

    Ok(files)
}
