use clap::Parser;

use hubtag::error;

use super::context::Ctx;

#[derive(Parser, Debug)]
#[clap(version, about = "Create an automated build for a git tag", long_about = None)]
pub struct Add {
    /// Repository as namespace/name
    repository: String,
    /// Image tag to build, e.g. the `v1` in namespace/name:v1
    image_tag: String,
    /// Git tag the build is triggered from
    source_ref: String,
    /// Dockerfile location inside the git repo, "/" for the root
    location: String,
}

impl Add {
    pub async fn run(&self, ctx: &Ctx) -> Result<(), error::Error> {
        let repository = ctx.repository(&self.repository).await?;
        repository
            .create(&self.image_tag, &self.source_ref, &self.location)
            .await
    }
}
