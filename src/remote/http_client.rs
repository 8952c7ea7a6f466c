use super::*;

impl RemoteClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
        target: Option<&PersonId>,
    ) -> Result<reqwest::blocking::Response, TransportError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = target {
                return Err(TransportError::NotFound {
                    label: label.to_string(),
                    id: id.clone(),
                });
            }
        }
        Err(TransportError::Status {
            label: label.to_string(),
            status: status.as_u16(),
        })
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn person_url(&self, id: &PersonId) -> String {
        self.url(&format!("/persons/{}", encode_path_segment(id.as_str())))
    }
}

pub(super) fn unreachable(label: &str, err: reqwest::Error) -> TransportError {
    TransportError::Unreachable {
        label: label.to_string(),
        reason: err.to_string(),
    }
}

pub(super) fn malformed(label: &str, err: reqwest::Error) -> TransportError {
    TransportError::Malformed {
        label: label.to_string(),
        reason: err.to_string(),
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set. Ids are
/// opaque, so nothing may be assumed about their alphabet.
pub(super) fn encode_path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
