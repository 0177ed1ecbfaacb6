use reqwest::blocking::multipart::{Form, Part};
use std::sync::mpsc::{sync_channel, Receiver};
use std::thread;
use std::time::Duration;

use crate::error::{EditorError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One multipart submission: the encoded image plus its metadata fields.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime: String,
    pub title: String,
    pub caption: String,
    pub folder: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome { Success, Failure }

impl UploadOutcome {
    /// Any 2xx is a success; the response body is never looked at.
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) { UploadOutcome::Success } else { UploadOutcome::Failure }
    }

    pub fn is_success(&self) -> bool { matches!(self, UploadOutcome::Success) }
}

impl UploadRequest {
    pub fn into_form(self) -> Result<Form> {
        let part: Part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .map_err(|e| {
                tracing::warn!(error = %e, "rejected upload content type");
                EditorError::Upload
            })?;
        Ok(Form::new()
            .part("file", part)
            .text("title", self.title)
            .text("caption", self.caption)
            .text("folder", self.folder))
    }
}

/// Posts the form and blocks until the server answers. Transport errors and
/// non-2xx statuses are the same failure to the caller.
pub fn submit(url: &str, request: UploadRequest) -> Result<()> {
    let form: Form = request.into_form()?;
    let client: reqwest::blocking::Client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| { tracing::warn!(error = %e, "http client unavailable"); EditorError::Upload })?;
    let status: u16 = client.post(url).multipart(form).send()
        .map_err(|e| { tracing::warn!(error = %e, url, "upload request failed"); EditorError::Upload })?
        .status()
        .as_u16();
    match UploadOutcome::from_status(status) {
        UploadOutcome::Success => Ok(()),
        UploadOutcome::Failure => {
            tracing::warn!(status, url, "upload rejected");
            Err(EditorError::Upload)
        }
    }
}

/// Runs [`submit`] on a worker thread. The receiver yields exactly one
/// outcome and is polled from the frame loop.
pub fn spawn_upload(url: String, request: UploadRequest) -> Receiver<UploadOutcome> {
    let (tx, rx) = sync_channel(1);
    thread::spawn(move || {
        let outcome: UploadOutcome = match submit(&url, request) {
            Ok(()) => UploadOutcome::Success,
            Err(_) => UploadOutcome::Failure,
        };
        let _ = tx.send(outcome);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_endpoint_is_a_plain_failure() {
        let req = UploadRequest {
            bytes: vec![1, 2, 3],
            file_name: "image.png".into(),
            mime: "image/png".into(),
            title: String::new(),
            caption: String::new(),
            folder: String::new(),
        };
        assert!(matches!(submit("not a url", req), Err(EditorError::Upload)));
    }
}
