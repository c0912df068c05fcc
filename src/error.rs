use reqwest::StatusCode;
use snafu::Snafu;

use crate::models::NewTagBuildBuilderError;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("failed to parse response body from docker hub: {source}"))]
    BodyDeserialize { source: serde_json::Error },
    #[snafu(display("failed to create tag build '{name}': docker hub returned {status}"))]
    CreateTagBuild { name: String, status: StatusCode },
    #[snafu(display("failed to delete tag build {id}: docker hub returned {status}"))]
    DeleteTagBuild { id: u64, status: StatusCode },
    #[snafu(display("failed to list tag builds of '{repository}': docker hub returned {status}"))]
    ListTagBuilds {
        repository: String,
        status: StatusCode,
    },
    #[snafu(display("failed to log in to docker hub: {source}"))]
    Login { source: reqwest::Error },
    #[snafu(display("failed to parse docker hub login response: {source}"))]
    LoginDeserialize { source: reqwest::Error },
    #[snafu(display("docker hub rejected login for '{username}': {status}"))]
    LoginStatus {
        username: String,
        status: StatusCode,
    },
    #[snafu(display("malformed repository '{repository}', expected 'namespace/name'"))]
    MalformedRepository { repository: String },
    #[snafu(display("missing credential: set {variable} or pass --{flag}"))]
    MissingCredential {
        variable: &'static str,
        flag: &'static str,
    },
    #[snafu(display("invalid tag build definition: {source}"))]
    NewTagBuild { source: NewTagBuildBuilderError },
    #[snafu(display("failed to make request to docker hub: {source}"))]
    Request { source: reqwest::Error },
    #[snafu(display("failed to read response from docker hub: {source}"))]
    ResponseDeserialize { source: reqwest::Error },
    #[snafu(display("docker hub login response did not contain a token"))]
    TokenMissing,
    #[snafu(display("invalid url detected: {source}"))]
    Url { source: url::ParseError },
}
