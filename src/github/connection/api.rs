//! Typed decoding and pagination over a [`Connection`].

use std::sync::Arc;

use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt, future};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::github::error::ApiError;
use crate::github::pagination::ApiOptions;

use super::{ApiRequest, Connection};

/// Shared request executor behind both client surfaces.
///
/// Every future-returning and stream-returning operation funnels through
/// these helpers, so both surfaces observe identical requests, results, and
/// errors.
#[derive(Clone)]
pub(crate) struct ApiConnection {
    connection: Arc<dyn Connection>,
}

impl ApiConnection {
    pub(crate) const fn new(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    /// Sends `request` and decodes the body as `W`, converting into `T`.
    pub(crate) async fn send_json<W, T>(&self, request: ApiRequest) -> Result<T, ApiError>
    where
        W: DeserializeOwned,
        T: From<W>,
    {
        let operation = request.describe();
        let response = self.connection.send(request).await?;
        decode::<W>(&operation, response.body).map(T::from)
    }

    /// Sends a request answered by an empty body.
    ///
    /// A successful status yields `true` and a `404` yields `false`; every
    /// other error is returned as-is.
    pub(crate) async fn no_content(&self, request: ApiRequest) -> Result<bool, ApiError> {
        match self.connection.send(request).await {
            Ok(_) => Ok(true),
            Err(ApiError::NotFound { .. }) => Ok(false),
            Err(error) => Err(error),
        }
    }

    /// Collects every item of a paginated listing.
    pub(crate) async fn get_all<W, T>(
        &self,
        request: ApiRequest,
        options: ApiOptions,
    ) -> Result<Vec<T>, ApiError>
    where
        W: DeserializeOwned + Send + 'static,
        T: From<W> + Send + 'static,
    {
        self.stream_all::<W, T>(request, options).try_collect().await
    }

    /// Single-result stream; nothing is sent until the stream is polled.
    pub(crate) fn stream_one<W, T>(
        &self,
        request: Result<ApiRequest, ApiError>,
    ) -> BoxStream<'static, Result<T, ApiError>>
    where
        W: DeserializeOwned + Send + 'static,
        T: From<W> + Send + 'static,
    {
        let api = self.clone();
        stream::once(async move { api.send_json::<W, T>(request?).await }).boxed()
    }

    /// Single-result stream for [`Self::no_content`].
    pub(crate) fn stream_no_content(
        &self,
        request: ApiRequest,
    ) -> BoxStream<'static, Result<bool, ApiError>> {
        let api = self.clone();
        stream::once(async move { api.no_content(request).await }).boxed()
    }

    /// Streams every item of a paginated listing, page by page.
    ///
    /// Pages are requested lazily by following the `Link` header, stopping
    /// after `options.page_count()` pages when set. Invalid options are
    /// reported as the only item without contacting GitHub. The stream ends
    /// after the first error.
    pub(crate) fn stream_all<W, T>(
        &self,
        request: ApiRequest,
        options: ApiOptions,
    ) -> BoxStream<'static, Result<T, ApiError>>
    where
        W: DeserializeOwned + Send + 'static,
        T: From<W> + Send + 'static,
    {
        if let Err(error) = options.validate() {
            return stream::once(future::ready(Err(error))).boxed();
        }

        let connection = Arc::clone(&self.connection);
        let first = request.with_query(options.query_parameters());

        stream::try_unfold((Some(first), 0_u32), move |(pending, fetched)| {
            let client = Arc::clone(&connection);
            async move {
                let Some(page_request) = pending else {
                    return Ok(None);
                };
                if !options.allows_another_page(fetched) {
                    return Ok(None);
                }

                let operation = page_request.describe();
                let response = client.send(page_request).await?;
                let items = decode::<Vec<W>>(&operation, response.body)?;
                let page = fetched.saturating_add(1);
                tracing::debug!(%operation, items = items.len(), page, "fetched page");

                let following = response.next_page.map(ApiRequest::follow);
                Ok::<_, ApiError>(Some((items, (following, page))))
            }
        })
        .map_ok(|items| {
            stream::iter(
                items
                    .into_iter()
                    .map(|item| Ok::<T, ApiError>(T::from(item))),
            )
        })
        .try_flatten()
        .boxed()
    }
}

fn decode<W: DeserializeOwned>(operation: &str, body: Value) -> Result<W, ApiError> {
    serde_json::from_value(body).map_err(|error| ApiError::Deserialisation {
        message: format!("{operation} response deserialisation failed: {error}"),
    })
}
