use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::{Result, SpacewalkError};
use crate::client::{ContentSource, Query, RawDocument, RawSearchResponse};
use crate::config::ApiConfig;

/// HTTP implementation of [`ContentSource`] against a Prismic-style
/// repository API.
///
/// Queries that are not pinned to a preview ref resolve the published
/// ("master") ref from the API root first. Pagination cursors returned in
/// `next_page` are complete URLs and are fetched verbatim.
pub struct HttpContentSource {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
}

impl HttpContentSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("spacewalk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Validate early so a bad endpoint fails at startup, not on the
        // first query.
        let endpoint = Url::parse(&config.endpoint)?;

        Ok(Self {
            client,
            endpoint: endpoint.as_str().trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn search_url(&self) -> Result<Url> {
        Ok(Url::parse(&format!("{}/documents/search", self.endpoint))?)
    }

    /// Resolve the ref every query must carry: the pinned preview ref when
    /// present, the repository's published ref otherwise.
    async fn resolve_ref(&self, pinned: Option<&str>) -> Result<String> {
        match pinned {
            Some(r) => Ok(r.to_string()),
            None => self.master_ref().await,
        }
    }

    async fn master_ref(&self) -> Result<String> {
        let mut url = Url::parse(&self.endpoint)?;
        if let Some(token) = &self.access_token {
            url.query_pairs_mut().append_pair("access_token", token);
        }

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let api: RefsResponse = response.json().await?;

        api.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.ref_id)
            .ok_or_else(|| SpacewalkError::Api("repository exposes no master ref".into()))
    }

    async fn run_search(
        &self,
        q: &str,
        query: &Query,
        content_ref: &str,
    ) -> Result<RawSearchResponse> {
        let mut url = self.search_url()?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("ref", content_ref);
            pairs.append_pair("q", q);
            pairs.append_pair("pageSize", &query.page_size.to_string());
            if !query.fetch.is_empty() {
                let fields: Vec<String> = query
                    .fetch
                    .iter()
                    .map(|f| format!("{}.{}", query.doc_type, f))
                    .collect();
                pairs.append_pair("fetch", &fields.join(","));
            }
            if let Some(ordering) = &query.ordering {
                pairs.append_pair("orderings", &ordering.to_expression());
            }
            if let Some(after) = &query.after {
                pairs.append_pair("after", after);
            }
            if let Some(token) = &self.access_token {
                pairs.append_pair("access_token", token);
            }
        }

        tracing::debug!(url = %url, "content query");
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn search(&self, query: &Query) -> Result<RawSearchResponse> {
        let content_ref = self.resolve_ref(query.content_ref.as_deref()).await?;
        let q = format!("[[at(document.type,\"{}\")]]", query.doc_type);
        self.run_search(&q, query, &content_ref).await
    }

    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        content_ref: Option<&str>,
    ) -> Result<RawDocument> {
        let content_ref = self.resolve_ref(content_ref).await?;
        let query = Query::documents_of_type(doc_type).page_size(1);
        let q = format!("[[at(my.{}.uid,\"{}\")]]", doc_type, uid);

        let response = self.run_search(&q, &query, &content_ref).await?;
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| SpacewalkError::DocumentNotFound(uid.to_string()))
    }

    async fn fetch_page(&self, url: &str) -> Result<RawSearchResponse> {
        tracing::debug!(url, "fetching pagination cursor");
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[derive(Debug, Deserialize)]
struct RefsResponse {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    ref_id: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}
