use std::collections::HashSet;

use snafu::ResultExt;
use url::Url;

use crate::hub::Hub;
use crate::models::{NewTagBuildBuilder, SourceType, TagBuild};
use crate::name::RepositoryName;
use crate::{error, Result};

/// Represents a single repository on docker hub and handles
/// all of its automated build operations
#[derive(Clone, Debug)]
pub struct Repository {
    pub hub: Hub,
    pub name: RepositoryName,
}

impl Repository {
    /// Create a handler to a given repository
    pub fn new(hub: &Hub, name: &RepositoryName) -> Self {
        Self {
            hub: hub.clone(),
            name: name.clone(),
        }
    }

    /// Call `visit` once for every tag build configured on this repository,
    /// walking the listing pages front to back.
    pub async fn for_each_tag_build<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&TagBuild),
    {
        let mut seen = HashSet::new();
        let mut page = 1;
        loop {
            seen.insert(page);
            let listing = self.hub.tag_build_page(&self.name, page).await?;
            debug!(target: "hub", "page {}: {} of {} automated builds", page, listing.results.len(), listing.count);
            listing.results.iter().for_each(&mut visit);

            let Some(next) = listing.next.as_deref() else {
                return Ok(());
            };
            let Some(next_page) = next_page(next) else {
                return Ok(());
            };
            if seen.contains(&next_page) {
                warn!("pagination found, but page {} was already listed: {}", next_page, next);
                return Ok(());
            }
            debug!(target: "hub", "pagination found, next page: {}", next_page);
            page = next_page;
        }
    }

    /// List all the tag builds configured on this repository
    pub async fn tag_builds(&self) -> Result<Vec<TagBuild>> {
        let mut builds = Vec::new();
        self.for_each_tag_build(|build| builds.push(build.clone()))
            .await?;
        Ok(builds)
    }

    /// Create a tag build producing `image_tag` from the git tag `source_ref`
    pub async fn create(&self, image_tag: &str, source_ref: &str, location: &str) -> Result<()> {
        let body = NewTagBuildBuilder::default()
            .source_type(SourceType::Tag)
            .source_name(source_ref)
            .dockerfile_location(location)
            .name(image_tag)
            .namespace(self.name.namespace())
            .repo_name(self.name.name())
            .build()
            .context(error::NewTagBuildSnafu)?;
        self.hub.create_tag_build(&self.name, &body).await?;
        info!("tag build created: {}:{} from git tag {} ({})", self.name, image_tag, source_ref, location);
        Ok(())
    }

    /// Delete every tag build that is not triggered by a branch, then create
    /// the given one. Branch builds are left alone.
    pub async fn replace_all(&self, image_tag: &str, source_ref: &str, location: &str) -> Result<()> {
        let builds = self.tag_builds().await?;
        for build in builds.iter() {
            if build.source_type == SourceType::Branch {
                debug!("ignore branch: {}", build.name);
                continue;
            }
            info!("deleting: {:8} {:<20}", build.id, build.name);
            self.delete_by_id(build.id).await?;
        }
        self.create(image_tag, source_ref, location).await
    }

    /// Delete every tag build whose image tag is exactly `image_tag`.
    /// Returns how many were deleted.
    pub async fn delete_by_name(&self, image_tag: &str) -> Result<usize> {
        let builds = self.tag_builds().await?;
        let mut deleted = 0;
        for build in builds.iter().filter(|build| build.name == image_tag) {
            info!(
                "deleting [{}] {}:{} git-ref: {}/{} dockerfile location: {}",
                build.id,
                self.name,
                build.name,
                build.source_type,
                build.source_name,
                build.dockerfile_location
            );
            self.delete_by_id(build.id).await?;
            deleted += 1;
        }
        if deleted == 0 {
            debug!("no tag build named {} on {}", image_tag, self.name);
        }
        Ok(deleted)
    }

    /// Delete a single tag build. Images already pushed for it stay on the
    /// registry, they just stop being rebuilt.
    pub async fn delete_by_id(&self, id: u64) -> Result<()> {
        self.hub.delete_tag_build(&self.name, id).await
    }
}

/// Pull the `page` query parameter out of a listing's next link
fn next_page(next: &str) -> Option<u64> {
    let url = match Url::parse(next) {
        Ok(url) => url,
        Err(e) => {
            warn!("pagination found, but couldn't parse next url {}: {}", next, e);
            return None;
        }
    };
    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok());
    if page.is_none() {
        warn!("pagination found, but couldn't get next page from {}", next);
    }
    page
}
