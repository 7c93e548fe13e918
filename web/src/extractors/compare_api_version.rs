use super::RejectionType;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use log::*;
use semver::Version;
use service::config::ApiVersion;

/// Checks the `x-version` request header against the API versions this server
/// still supports. A request without the header is served by the default version.
pub(crate) struct CompareApiVersion(pub Version);

impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(ApiVersion::field_name()) else {
            return Ok(CompareApiVersion(ApiVersion::default().version));
        };

        let requested = header.to_str().map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid {} header", ApiVersion::field_name()),
            )
        })?;

        if !ApiVersion::versions().contains(&requested) {
            debug!("Rejecting unsupported API version: {requested}");
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version: {requested}"),
            ));
        }

        Version::parse(requested)
            .map(CompareApiVersion)
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<CompareApiVersion, RejectionType> {
        let (mut parts, _) = request.into_parts();
        CompareApiVersion::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn missing_header_uses_the_default_version() {
        let CompareApiVersion(version) = extract(Request::new(())).await.unwrap();

        assert_eq!(version.to_string(), ApiVersion::default_version());
    }

    #[tokio::test]
    async fn supported_versions_are_accepted() {
        let request = Request::builder()
            .header("x-version", ApiVersion::default_version())
            .body(())
            .unwrap();

        assert!(extract(request).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_versions_are_rejected() {
        let request = Request::builder()
            .header("x-version", "0.0.1")
            .body(())
            .unwrap();

        let Err((status, message)) = extract(request).await else {
            panic!("expected a rejection");
        };
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("0.0.1"));
    }
}
