//! HTTP access to the data API.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use shared::{
    ApiQuery, ChartShape, DashboardConfig, Endpoint, FetchError, LineChartResponse, ListResponse,
    PageResult, PieChartResponse, SeriesResult,
};

#[derive(Clone, Debug)]
pub struct ApiClient {
    config: DashboardConfig,
}

impl ApiClient {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &ApiQuery,
    ) -> Result<T, FetchError> {
        let url = self.config.endpoint_url(endpoint);
        let response = Request::get(&url)
            .query(query.params().iter().map(|(key, value)| (*key, value.as_str())))
            .send()
            .await
            .map_err(|error| FetchError::Transport(error.to_string()))?;

        if !response.ok() {
            return Err(FetchError::Status {
                status: response.status(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|error| FetchError::Decode(error.to_string()))
    }

    /// Option list of one filter dimension.
    pub async fn list(&self, endpoint: Endpoint, query: &ApiQuery) -> Result<Vec<String>, FetchError> {
        let response: ListResponse = self.get_json(endpoint, query).await?;
        Ok(response.data)
    }

    pub async fn page(&self, endpoint: Endpoint, query: &ApiQuery) -> Result<PageResult, FetchError> {
        self.get_json(endpoint, query).await
    }

    pub async fn series(
        &self,
        endpoint: Endpoint,
        query: &ApiQuery,
        shape: ChartShape,
    ) -> Result<SeriesResult, FetchError> {
        match shape {
            ChartShape::Line => {
                let response: LineChartResponse = self.get_json(endpoint, query).await?;
                Ok(SeriesResult::Lines(response.data))
            }
            ChartShape::Pie => {
                let response: PieChartResponse = self.get_json(endpoint, query).await?;
                Ok(SeriesResult::Pie(response.data))
            }
        }
    }

    /// Same URL the request goes to, for console messages.
    pub fn describe(&self, endpoint: Endpoint, query: &ApiQuery) -> String {
        self.config.request_url(endpoint, query)
    }
}
