use derive_builder::Builder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Credentials used to log in to docker hub
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of POST /v2/users/login
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Short lived JWT handed out by the login endpoint
#[derive(Clone)]
pub struct Token(pub(crate) String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Value of the Authorization header docker hub expects
    pub(crate) fn header(&self) -> String {
        format!("JWT {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// What kind of git reference triggers a tag build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceType {
    Branch,
    Tag,
    Other(String),
}

impl SourceType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Branch => "Branch",
            Self::Tag => "Tag",
            Self::Other(other) => other.as_str(),
        }
    }
}

impl From<&str> for SourceType {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("branch") {
            Self::Branch
        } else if value.eq_ignore_ascii_case("tag") {
            Self::Tag
        } else {
            Self::Other(value.to_string())
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SourceType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Ok(SourceType::from(string.as_str()))
    }
}

/// A single automated build configured on a repository
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagBuild {
    #[serde(rename = "Id", alias = "id")]
    pub id: u64,
    /// Image tag produced by the build
    #[serde(
        rename = "Name",
        alias = "name",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub name: String,
    #[serde(rename = "Source_type", alias = "source_type")]
    pub source_type: SourceType,
    /// Git branch or tag the build is triggered from
    #[serde(
        rename = "Source_name",
        alias = "source_name",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub source_name: String,
    #[serde(
        rename = "Dockerfile_location",
        alias = "dockerfile_location",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub dockerfile_location: String,
}

/// One page of GET /v2/repositories/{repository}/autobuild/tags/
#[derive(Debug, Deserialize)]
pub struct TagBuildPage {
    #[serde(default, alias = "Count")]
    pub count: u64,
    #[serde(default, alias = "Next", deserialize_with = "empty_as_none")]
    pub next: Option<String>,
    #[serde(default, alias = "Previous", deserialize_with = "empty_as_none")]
    pub previous: Option<String>,
    #[serde(default, alias = "Results")]
    pub results: Vec<TagBuild>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Body of POST /v2/repositories/{repository}/autobuild/tags/
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into))]
pub struct NewTagBuild {
    #[builder(default = "SourceType::Tag")]
    pub source_type: SourceType,
    pub source_name: String,
    pub dockerfile_location: String,
    pub name: String,
    #[serde(rename = "isNew")]
    #[builder(default = "\"true\".to_string()")]
    pub is_new: String,
    pub namespace: String,
    #[serde(rename = "repoName")]
    pub repo_name: String,
}
