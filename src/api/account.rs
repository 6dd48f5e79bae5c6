//! Account service for the trading account, its configuration and activity.

use reqwest::Method;
use serde::Serialize;

use crate::client::paginated::{
    materialize, paginate, validate_pagination, Page, Paginated, PaginationType,
    DEFAULT_PAGE_SIZE,
};
use crate::client::{wrap, RestClient};
use crate::models::{
    AccountConfiguration, Activity, GetActivitiesRequest, PatchAccountConfiguration,
    TradeAccount,
};
use crate::Result;

const ACTIVITIES_PATH: &str = "/account/activities";

/// Service for account-related operations.
///
/// # Example
///
/// ```no_run
/// use paca_rs::models::{ActivityType, GetActivitiesRequest};
/// use paca_rs::PaginationType;
///
/// # async fn example(client: paca_rs::TradingClient) -> paca_rs::Result<()> {
/// let account = client.account().get().await?;
/// println!("Buying power: {:?}", account.buying_power);
///
/// // Every fill, across all pages
/// let query = GetActivitiesRequest {
///     activity_types: Some(vec![ActivityType::Fill]),
///     ..Default::default()
/// };
/// let fills = client
///     .account()
///     .activities(query, Some(PaginationType::Full), None)
///     .await?
///     .into_items()
///     .await?;
/// println!("{} fills", fills.len());
/// # Ok(())
/// # }
/// ```
pub struct AccountService {
    client: RestClient,
}

/// Activity filters plus the paging fields for one request.
#[derive(Serialize)]
struct ActivitiesPageQuery {
    #[serde(flatten)]
    filters: GetActivitiesRequest,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<String>,
}

impl AccountService {
    pub(crate) fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Get the trading account.
    pub async fn get(&self) -> Result<TradeAccount> {
        self.client.get("/account").await
    }

    /// Get the account configuration.
    pub async fn configurations(&self) -> Result<AccountConfiguration> {
        self.client.get("/account/configurations").await
    }

    /// Update the account configuration. Fields left `None` are unchanged.
    ///
    /// Returns the configuration after the update.
    pub async fn set_configurations(
        &self,
        patch: &PatchAccountConfiguration,
    ) -> Result<AccountConfiguration> {
        self.client.patch("/account/configurations", patch).await
    }

    /// Get account activities.
    ///
    /// Pages are requested with `page_token` set to the id of the last
    /// activity of the previous page. Pagination stops at the first page
    /// shorter than the page size. `mode` defaults to
    /// [`PaginationType::Full`]; `max_items_limit` is only valid with `Full`.
    pub async fn activities(
        &self,
        query: GetActivitiesRequest,
        mode: Option<PaginationType>,
        max_items_limit: Option<usize>,
    ) -> Result<Paginated<Activity>> {
        let mode = validate_pagination(max_items_limit, mode)?;

        let mut filters = query;
        let page_size = filters.page_size.take().unwrap_or(DEFAULT_PAGE_SIZE);
        let client = self.client.clone();

        let pages = paginate(move |page_token: Option<String>| {
            let client = client.clone();
            let query = ActivitiesPageQuery {
                filters: filters.clone(),
                page_size,
                page_token,
            };
            async move { fetch_activities_page(&client, &query).await }
        });

        materialize(pages, mode, max_items_limit).await
    }
}

async fn fetch_activities_page(
    client: &RestClient,
    query: &ActivitiesPageQuery,
) -> Result<Page<Activity>> {
    let data = serde_json::to_value(query)?;
    let items: Vec<Activity> = wrap(client.request(Method::GET, ACTIVITIES_PATH, Some(data)).await?)?;

    let next_page_token = if items.len() < query.page_size as usize {
        None
    } else {
        items.last().map(|activity| activity.id.clone())
    };
    tracing::debug!(
        items = items.len(),
        has_next = next_page_token.is_some(),
        "Fetched activities page"
    );

    Ok(Page {
        items,
        next_page_token,
    })
}
