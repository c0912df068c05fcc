use crate::client::HubClient;
use crate::models::{Credentials, LoginResponse, NewTagBuild, TagBuildPage, Token};
use crate::name::RepositoryName;
use crate::{error, Result};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use snafu::{ensure, OptionExt, ResultExt};
use url::Url;

pub const DEFAULT_HUB_URL: &str = "https://hub.docker.com";

/// An authenticated connection to docker hub. All requests made through this
/// structure carry the JWT obtained at login.
#[derive(Clone, Debug)]
pub struct Hub {
    /// Base url of the docker hub api
    uri: Url,
    pub(crate) client: HubClient,
}

impl Hub {
    /// Log in to docker hub at `uri` and return a client holding the issued token.
    pub async fn login(uri: &Url, credentials: &Credentials) -> Result<Self> {
        let response = HubClient::new(None)
            .login(uri, &credentials.username, &credentials.password)
            .await?;
        trace!(target: "hub", "login: {:?}", response);
        ensure!(
            response.status().is_success(),
            error::LoginStatusSnafu {
                username: credentials.username.as_str(),
                status: response.status(),
            }
        );
        let login: LoginResponse = response
            .json()
            .await
            .context(error::LoginDeserializeSnafu)?;
        let token = login
            .token
            .filter(|token| !token.is_empty())
            .context(error::TokenMissingSnafu)?;
        let hub = Self::with_token(uri, Token::new(token));
        debug!(target: "hub", "logged in to {} as {}", hub.uri(), credentials.username);
        Ok(hub)
    }

    /// Build a client around a token obtained elsewhere
    pub fn with_token(uri: &Url, token: Token) -> Self {
        Self {
            uri: uri.clone(),
            client: HubClient::new(Some(token)),
        }
    }

    /// Return the base url for this client
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Fetch a single page of tag builds
    pub(crate) async fn tag_build_page(
        &self,
        repository: &RepositoryName,
        page: u64,
    ) -> Result<TagBuildPage> {
        let repository = repository.to_string();
        let response = self
            .client
            .get_tag_builds(&self.uri, &repository, page)
            .await?;
        trace!(target: "hub", "get_tag_builds: {:?}", response);
        ensure!(
            response.status().is_success(),
            error::ListTagBuildsSnafu {
                repository,
                status: response.status(),
            }
        );
        Self::body(response).await
    }

    /// Create a tag build, docker hub answers 201 on success
    pub(crate) async fn create_tag_build(
        &self,
        repository: &RepositoryName,
        body: &NewTagBuild,
    ) -> Result<()> {
        let response = self
            .client
            .post_tag_build(&self.uri, &repository.to_string(), body)
            .await?;
        trace!(target: "hub", "post_tag_build: {:?}", response);
        ensure!(
            response.status() == StatusCode::CREATED,
            error::CreateTagBuildSnafu {
                name: body.name.as_str(),
                status: response.status(),
            }
        );
        Ok(())
    }

    /// Delete a tag build by id, docker hub answers 204 on success
    pub(crate) async fn delete_tag_build(&self, repository: &RepositoryName, id: u64) -> Result<()> {
        let response = self
            .client
            .del_tag_build(&self.uri, &repository.to_string(), id)
            .await?;
        trace!(target: "hub", "del_tag_build: {:?}", response);
        ensure!(
            response.status() == StatusCode::NO_CONTENT,
            error::DeleteTagBuildSnafu {
                id,
                status: response.status(),
            }
        );
        Ok(())
    }

    /// Handles deserialization of responses with proper logging
    pub(crate) async fn body<T>(response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value: serde_json::Value = response
            .json()
            .await
            .context(error::ResponseDeserializeSnafu)?;
        trace!(target: "hub", "RESPONSE BODY: {}", value);
        serde_json::from_value(value).context(error::BodyDeserializeSnafu)
    }
}
