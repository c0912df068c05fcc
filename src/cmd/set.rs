use clap::Parser;

use hubtag::error;

use super::context::Ctx;

#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Replace every git tag triggered automated build with a single new one",
    long_about = "Delete every automated build that is not triggered by a branch, then create \
                  the given one. Branch triggered builds are kept."
)]
pub struct Set {
    /// Repository as namespace/name
    repository: String,
    /// Image tag to build
    image_tag: String,
    /// Git tag the build is triggered from
    source_ref: String,
    /// Dockerfile location inside the git repo, "/" for the root
    location: String,
}

impl Set {
    pub async fn run(&self, ctx: &Ctx) -> Result<(), error::Error> {
        let repository = ctx.repository(&self.repository).await?;
        repository
            .replace_all(&self.image_tag, &self.source_ref, &self.location)
            .await
    }
}
