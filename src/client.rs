use std::fmt::Debug;
use std::sync::Arc;

use crate::models::{LoginRequest, NewTagBuild, Token};
use crate::{error, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use snafu::ResultExt;
use url::Url;

/// A trait for a client implementing requests to the docker hub api. Everything above this
/// layer only deals with urls and decoded bodies.
#[async_trait]
pub(crate) trait HubClientImpl: Send + Sync + Debug {
    /// POST {uri}/v2/users/login
    async fn login(&self, uri: &Url, credentials: &LoginRequest<'_>) -> Result<Response>;
    /// GET {uri}/v2/repositories/{repository}/autobuild/tags/?page={page}
    async fn get_tag_builds(&self, uri: &Url, repository: &str, page: u64) -> Result<Response>;
    /// POST {uri}/v2/repositories/{repository}/autobuild/tags/
    async fn post_tag_build(
        &self,
        uri: &Url,
        repository: &str,
        body: &NewTagBuild,
    ) -> Result<Response>;
    /// DELETE {uri}/v2/repositories/{repository}/autobuild/tags/{id}/
    async fn del_tag_build(&self, uri: &Url, repository: &str, id: u64) -> Result<Response>;
}

/// Implements a simple docker hub client using reqwest
#[derive(Debug)]
pub struct SimpleHubClient {
    client: reqwest::Client,
    auth: Option<Token>,
}

impl SimpleHubClient {
    pub fn new(auth: Option<Token>) -> Self {
        Self {
            client: reqwest::Client::new(),
            auth,
        }
    }

    pub(crate) fn auth(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.auth.as_ref() {
            request.header(reqwest::header::AUTHORIZATION, token.header())
        } else {
            request
        }
    }
}

/// Resolve an api path below `uri`, keeping any path prefix the base carries
fn api_url(uri: &Url, path: &str) -> Result<Url> {
    let mut base = uri.clone();
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    base.join(path).context(error::UrlSnafu)
}

fn tag_builds_url(uri: &Url, repository: &str) -> Result<Url> {
    api_url(uri, &format!("v2/repositories/{}/autobuild/tags/", repository))
}

#[async_trait]
impl HubClientImpl for SimpleHubClient {
    async fn login(&self, uri: &Url, credentials: &LoginRequest<'_>) -> Result<Response> {
        let request = self.client.post(api_url(uri, "v2/users/login")?);
        request
            .json(credentials)
            .send()
            .await
            .context(error::LoginSnafu)
    }

    async fn get_tag_builds(&self, uri: &Url, repository: &str, page: u64) -> Result<Response> {
        let mut uri = tag_builds_url(uri, repository)?;
        uri.set_query(Some(format!("page={page}").as_str()));
        let request = self.client.get(uri);
        self.auth(request).send().await.context(error::RequestSnafu)
    }

    async fn post_tag_build(
        &self,
        uri: &Url,
        repository: &str,
        body: &NewTagBuild,
    ) -> Result<Response> {
        let request = self.client.post(tag_builds_url(uri, repository)?);
        self.auth(request)
            .json(body)
            .send()
            .await
            .context(error::RequestSnafu)
    }

    async fn del_tag_build(&self, uri: &Url, repository: &str, id: u64) -> Result<Response> {
        let request = self.client.delete(api_url(
            uri,
            &format!("v2/repositories/{}/autobuild/tags/{}/", repository, id),
        )?);
        self.auth(request)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .context(error::RequestSnafu)
    }
}

/// Handle to a docker hub client. Cheap to clone, every clone shares the same token.
#[derive(Clone, Debug)]
pub struct HubClient {
    client: Arc<dyn HubClientImpl>,
}

impl HubClient {
    pub fn new(auth: Option<Token>) -> Self {
        Self {
            client: Arc::new(SimpleHubClient::new(auth)),
        }
    }

    pub(crate) async fn login(&self, uri: &Url, username: &str, password: &str) -> Result<Response> {
        self.client
            .login(uri, &LoginRequest { username, password })
            .await
    }

    pub async fn get_tag_builds(&self, uri: &Url, repository: &str, page: u64) -> Result<Response> {
        self.client.get_tag_builds(uri, repository, page).await
    }

    pub async fn post_tag_build(
        &self,
        uri: &Url,
        repository: &str,
        body: &NewTagBuild,
    ) -> Result<Response> {
        self.client.post_tag_build(uri, repository, body).await
    }

    pub async fn del_tag_build(&self, uri: &Url, repository: &str, id: u64) -> Result<Response> {
        self.client.del_tag_build(uri, repository, id).await
    }
}
