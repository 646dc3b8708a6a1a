use thiserror::Error;

/// PostgREST error code for "zero or many rows matched a single() request".
pub const NO_ROWS_CODE: &str = "PGRST116";

#[derive(Debug, Error)]
pub enum Error {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend error ({status}) {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

impl Error {
    /// True when the backend reported "no row found" for a single-row read.
    /// Callers translate this into an explicit absence instead of a failure.
    pub fn is_no_rows(&self) -> bool {
        matches!(self, Error::Api { code, .. } if code == NO_ROWS_CODE)
    }

    /// Build an [`Error::Api`] from a non-success response. PostgREST bodies
    /// carry `code`/`message`; the auth endpoints use `msg`, `error` and
    /// `error_description`, sometimes with a numeric `code`.
    pub(crate) async fn from_response(resp: reqwest::Response) -> Error {
        let status = resp.status().as_u16();
        let body: serde_json::Value = resp.json().await.unwrap_or(serde_json::Value::Null);

        let code = match body.get("code") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let message = ["message", "msg", "error_description", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
            .unwrap_or("unreadable error body")
            .to_string();

        Error::Api {
            status,
            code,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rows_is_detected_by_code() {
        let err = Error::Api {
            status: 406,
            code: NO_ROWS_CODE.to_string(),
            message: "JSON object requested, multiple (or no) rows returned".to_string(),
        };
        assert!(err.is_no_rows());
    }

    #[test]
    fn other_api_errors_are_not_no_rows() {
        let err = Error::Api {
            status: 403,
            code: "42501".to_string(),
            message: "permission denied".to_string(),
        };
        assert!(!err.is_no_rows());
    }
}
