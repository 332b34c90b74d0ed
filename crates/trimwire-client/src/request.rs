// crates/trimwire-client/src/request.rs
//
// One submission on the wire: a multipart POST carrying the file plus every
// parameter field, always all of them. The service is stateless and ignores
// fields irrelevant to the chosen action, so the form never varies in shape,
// only in values.
//
// Settlement rules:
//   - complete non-2xx response  → ProcessingFailed(body verbatim)
//   - anything short of a complete response (connect, send, body read)
//                                → NetworkFailure
// Exactly one of the two, or success, per submission.

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use trimwire_core::error::ProcessError;
use trimwire_core::job::ProcessJob;

/// Build the six-field form for `job`. Field names and the always-present
/// rule follow the processing endpoint's contract.
pub fn multipart_form(job: &ProcessJob) -> Result<Form, reqwest::Error> {
    let (start, end) = job.action.trim_bounds();

    let file = Part::bytes(job.clip.bytes.to_vec())
        .file_name(job.clip.name.clone())
        .mime_str(&job.clip.mime)?;

    Ok(Form::new()
        .part("file", file)
        .text("action", job.action.wire_name())
        .text("start", start.to_string())
        .text("end", end.to_string())
        .text("speed", format_speed(job.action.speed_factor()))
        .text("format", job.format.wire_name()))
}

/// Decimal encoding for the speed field: shortest round-trip ("1", "1.5",
/// "0.7"), matching how the field has always been populated.
fn format_speed(factor: f32) -> String {
    format!("{factor}")
}

/// POST `job` to `url` and settle it.
pub fn send_job(client: &Client, url: &str, job: &ProcessJob) -> Result<Vec<u8>, ProcessError> {
    let form = multipart_form(job).map_err(|e| {
        log::error!("could not assemble form for {}: {e}", job.clip.name);
        ProcessError::NetworkFailure
    })?;

    let response = match client.post(url).multipart(form).send() {
        Ok(r) => r,
        Err(e) => {
            log::warn!("transport failure for job {}: {e}", job.job_id);
            return Err(ProcessError::NetworkFailure);
        }
    };

    let status = response.status();
    if !status.is_success() {
        // The error body is the user-facing message, shown verbatim. A body
        // that cannot be read is an incomplete response.
        return match response.text() {
            Ok(body) => Err(ProcessError::ProcessingFailed(body)),
            Err(e) => {
                log::warn!("error body unreadable for job {} ({status}): {e}", job.job_id);
                Err(ProcessError::NetworkFailure)
            }
        };
    }

    match response.bytes() {
        Ok(bytes) => Ok(bytes.to_vec()),
        Err(e) => {
            log::warn!("response body truncated for job {}: {e}", job.job_id);
            Err(ProcessError::NetworkFailure)
        }
    }
}

/// GET the service root; any 2xx counts as online.
pub fn probe_health(client: &Client, url: &str) -> bool {
    match client.get(url).send() {
        Ok(r)  => r.status().is_success(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_encodes_like_the_form_always_did() {
        assert_eq!(format_speed(1.0), "1");
        assert_eq!(format_speed(1.5), "1.5");
        assert_eq!(format_speed(0.7), "0.7");
        assert_eq!(format_speed(2.0), "2");
    }
}
