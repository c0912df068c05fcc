use clap::Parser;

use hubtag::error;

use super::context::Ctx;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Delete the automated builds producing an image tag",
    long_about = "Delete the automated builds producing an image tag. Images already pushed \
                  for that tag stay on docker hub, they are just not rebuilt anymore."
)]
pub struct Delete {
    /// Repository as namespace/name
    repository: String,
    /// Image tag whose builds are deleted
    image_tag: String,
}

impl Delete {
    pub async fn run(&self, ctx: &Ctx) -> Result<(), error::Error> {
        let repository = ctx.repository(&self.repository).await?;
        let deleted = repository.delete_by_name(&self.image_tag).await?;
        info!("deleted {} automated build(s) for {}", deleted, self.image_tag);
        Ok(())
    }
}
