//! Static site generation: the listing page plus one detail page per
//! article, written to an output directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::app::{Result, SpacewalkError};
use crate::article;
use crate::client::{ContentSource, Query};
use crate::config::Config;
use crate::listing;
use crate::normalizer::Normalizer;
use crate::render::pages;

pub const DEFAULT_BUILD_WORKERS: usize = 4;

#[derive(Debug)]
pub struct BuildReport {
    /// Article pages written, not counting the index.
    pub articles: usize,
    pub out_dir: PathBuf,
}

pub struct SiteBuilder {
    source: Arc<dyn ContentSource>,
    normalizer: Normalizer,
    config: Config,
    preview_ref: Option<String>,
    workers: usize,
}

impl SiteBuilder {
    pub fn new(source: Arc<dyn ContentSource>, config: Config, preview_ref: Option<String>) -> Self {
        Self {
            source,
            normalizer: Normalizer::new(),
            config,
            preview_ref,
            workers: DEFAULT_BUILD_WORKERS,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Generate the whole site into `out_dir`: `index.html` plus
    /// `post/<uid>.html` for every article. Any failed page fails the
    /// build; there is no retry.
    pub async fn build(&self, out_dir: &Path) -> Result<BuildReport> {
        std::fs::create_dir_all(out_dir.join("post"))?;

        let preview = self.preview_ref.is_some();
        let doc_type = self.config.api.document_type.clone();

        let initial = listing::initial_page(
            &*self.source,
            &self.normalizer,
            &doc_type,
            self.config.site.page_size,
            self.preview_ref.as_deref(),
        )
        .await?;
        let index_html = pages::listing_page(&self.config, &initial, preview);
        std::fs::write(out_dir.join("index.html"), index_html)?;
        tracing::info!(posts = initial.results.len(), "wrote index.html");

        let uids = self.all_uids(&doc_type).await?;

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut handles = Vec::new();

        for uid in uids {
            let source = self.source.clone();
            let normalizer = self.normalizer.clone();
            let config = self.config.clone();
            let preview_ref = self.preview_ref.clone();
            let doc_type = doc_type.clone();
            let semaphore = semaphore.clone();
            let path = out_dir.join("post").join(format!("{uid}.html"));

            let handle = tokio::spawn(async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .map_err(|e| SpacewalkError::Other(e.to_string()))?;

                let article = article::assemble(
                    &*source,
                    &normalizer,
                    &doc_type,
                    &uid,
                    preview_ref.as_deref(),
                )
                .await?;
                let html = pages::article_page(&config, &article, preview_ref.is_some());
                std::fs::write(&path, html)?;
                tracing::info!(uid = %uid, "wrote article page");
                Ok::<(), SpacewalkError>(())
            });

            handles.push(handle);
        }

        let mut articles = 0;
        for handle in handles {
            handle
                .await
                .map_err(|e| SpacewalkError::Other(format!("build task failed: {e}")))??;
            articles += 1;
        }

        Ok(BuildReport {
            articles,
            out_dir: out_dir.to_path_buf(),
        })
    }

    /// Enumerate every article uid by walking the full cursor chain.
    async fn all_uids(&self, doc_type: &str) -> Result<Vec<String>> {
        let query = Query::documents_of_type(doc_type)
            .fetch(&["title"])
            .page_size(self.config.site.page_size)
            .content_ref(self.preview_ref.clone());

        let mut response = self.source.search(&query).await?;
        let mut uids: Vec<String> = Vec::new();

        loop {
            uids.extend(response.results.iter().filter_map(|d| d.uid.clone()));
            match response.next_page {
                Some(url) => response = self.source.fetch_page(&url).await?,
                None => break,
            }
        }

        Ok(uids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{doc, section, MockSource};
    use crate::client::RawDocument;

    fn corpus() -> Vec<RawDocument> {
        let mut docs = vec![
            doc("T1", "post-a", "2024-01-01T00:00:00Z", "Post A"),
            doc("T2", "post-b", "2024-02-01T00:00:00Z", "Post B"),
            doc("T3", "post-c", "2024-03-01T00:00:00Z", "Post C"),
        ];
        docs[0].data.content = vec![section(Some("Intro"), &["Just a few words."])];
        docs
    }

    fn builder(source: Arc<MockSource>) -> SiteBuilder {
        let mut config = Config::default();
        config.site.page_size = 2;
        SiteBuilder::new(source, config, None)
    }

    #[tokio::test]
    async fn test_build_writes_index_and_article_pages() {
        let source = Arc::new(MockSource::new(corpus()));
        let out = tempfile::tempdir().unwrap();

        let report = builder(source.clone()).build(out.path()).await.unwrap();
        assert_eq!(report.articles, 3);

        let index = std::fs::read_to_string(out.path().join("index.html")).unwrap();
        // The index shows the first page only, with the load-more control.
        assert!(index.contains("Post A"));
        assert!(index.contains("Post B"));
        assert!(!index.contains("Post C"));
        assert!(index.contains("load-more"));

        for uid in ["post-a", "post-b", "post-c"] {
            assert!(out.path().join("post").join(format!("{uid}.html")).exists());
        }

        let page_a = std::fs::read_to_string(out.path().join("post/post-a.html")).unwrap();
        assert!(page_a.contains("<h1>Post A</h1>"));
        assert!(page_a.contains("1 min"));
        assert!(page_a.contains("Next post"));
    }

    #[tokio::test]
    async fn test_build_walks_the_whole_cursor_chain() {
        let source = Arc::new(MockSource::new(corpus()));
        let out = tempfile::tempdir().unwrap();

        builder(source.clone()).build(out.path()).await.unwrap();

        // Page size 2 over 3 articles: the uid walk fetches one cursor.
        assert!(source.fetch_count() >= 1);
    }

    #[tokio::test]
    async fn test_build_in_preview_mode_pins_every_query() {
        let source = Arc::new(MockSource::new(corpus()));
        let out = tempfile::tempdir().unwrap();

        let mut config = Config::default();
        config.site.page_size = 10;
        SiteBuilder::new(source.clone(), config, Some("preview-ref".to_string()))
            .build(out.path())
            .await
            .unwrap();

        let refs = source.logged_refs();
        assert!(!refs.is_empty());
        assert!(refs.iter().all(|r| r.as_deref() == Some("preview-ref")));

        let index = std::fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(index.contains("preview-mode"));
    }
}
