//! Conversions from transport errors into domain errors.

use opbridge_domain::{ApiError, Error};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the client side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct ClientError(pub Error);

impl From<ClientError> for Error {
    fn from(value: ClientError) -> Self {
        value.0
    }
}

impl From<Error> for ClientError {
    fn from(value: Error) -> Self {
        ClientError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → Error */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for ClientError {
    fn from(value: HttpError) -> Self {
        // Transport failures never saw a response, so the structured error
        // carries no status code.
        ClientError(Error::Api(ApiError::bare(format!("Request failed: {value}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connection_failure_maps_to_statusless_api_error() {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        // Reserved port with nothing listening; connect fails immediately.
        let err = client.get("http://127.0.0.1:1/").send().await.unwrap_err();

        let mapped: Error = ClientError::from(err).into();
        match mapped {
            Error::Api(api) => {
                assert_eq!(api.status, None);
                assert!(api.message.starts_with("Request failed:"));
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }
}
