//! Page navigation by node title
//!
//! The browser page is an opaque capability; these helpers only resolve node
//! ids and paths through drush and then ask the page to navigate.

use async_trait::async_trait;

use crate::channel::ExecutionChannel;
use crate::config::BridgeConfig;
use crate::error::{E2eError, E2eResult};
use crate::fixtures::FixtureBridge;

/// Browser page handle
#[async_trait]
pub trait Page: Send + Sync {
    type Response: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Navigate to `url`, absolute or relative to the page's base URL
    async fn goto(&self, url: &str) -> Result<Self::Response, Self::Error>;
}

fn lang_prefix(langcode: Option<&str>) -> String {
    match langcode {
        Some(lang) if !lang.is_empty() => format!("/{}", lang),
        _ => String::new(),
    }
}

/// Node edit form, returning to the content overview on save
pub fn node_edit_url(nid: &str, langcode: Option<&str>) -> String {
    format!("{}/node/{}/edit?destination=/admin/content", lang_prefix(langcode), nid)
}

pub fn node_layout_url(nid: &str) -> String {
    format!("/node/{}/layout", nid)
}

/// Layout preview; the backend redirects this to the frontend
pub fn node_layout_preview_url(nid: &str) -> String {
    format!("/node/{}/layout-preview?auth=1", nid)
}

async fn goto<P: Page>(page: &P, url: String) -> E2eResult<P::Response> {
    let result = page.goto(&url).await;
    result.map_err(|e| E2eError::Page {
        url,
        source: Box::new(e),
    })
}

impl<C: ExecutionChannel> FixtureBridge<C> {
    /// Visit the edit page of a node.
    ///
    /// `title` is the original-language title. With a langcode the page edits
    /// that translation if it exists, otherwise the original in that UI
    /// language.
    pub async fn visit_node_edit_page<P: Page>(
        &self,
        page: &P,
        title: &str,
        langcode: Option<&str>,
    ) -> E2eResult<P::Response> {
        let nid = self.node_id(title).await?;
        goto(page, node_edit_url(&nid, langcode)).await
    }

    pub async fn visit_node_layout_page<P: Page>(&self, page: &P, title: &str) -> E2eResult<P::Response> {
        let nid = self.node_id(title).await?;
        goto(page, node_layout_url(&nid)).await
    }

    pub async fn visit_node_layout_preview_page<P: Page>(&self, page: &P, title: &str) -> E2eResult<P::Response> {
        let nid = self.node_id(title).await?;
        goto(page, node_layout_preview_url(&nid)).await
    }

    pub async fn visit_node_by_title<P: Page>(&self, page: &P, title: &str) -> E2eResult<P::Response> {
        let path = self.node_path(title).await?;
        goto(page, path).await
    }

    /// Visit the content API for a node, addressed by its path alias
    pub async fn visit_node_api_by_title<P: Page>(
        &self,
        page: &P,
        config: &BridgeConfig,
        title: &str,
        langcode: Option<&str>,
    ) -> E2eResult<P::Response> {
        let alias = self.node_path_alias(title, langcode).await?;
        goto(page, config.api_url(&alias)?).await
    }
}
