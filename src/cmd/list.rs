use clap::Parser;

use hubtag::error;
use hubtag::models::TagBuild;
use hubtag::name::RepositoryName;

use super::context::Ctx;

#[derive(Parser, Debug)]
#[clap(version, about = "List the automated builds of a repo", long_about = None)]
pub struct List {
    /// Repository as namespace/name
    repository: String,
}

impl List {
    pub async fn run(&self, ctx: &Ctx) -> Result<(), error::Error> {
        let repository = ctx.repository(&self.repository).await?;
        println!("{}", header());
        repository
            .for_each_tag_build(|build| println!("{}", row(&repository.name, build)))
            .await
    }
}

fn header() -> String {
    format!(
        "{:>7} {:<30} {:<10} {:<6} {:<10} {:<10}",
        "ID", "REPOSITORY", "TAG", "TYPE", "GIT_REF", "DOCKERFILE"
    )
}

fn row(repository: &RepositoryName, build: &TagBuild) -> String {
    format!(
        "{:>7} {:<30} {:<10} {:<6} {:<10} {:<10}",
        build.id,
        repository.to_string(),
        build.name,
        build.source_type.as_str(),
        build.source_name,
        build.dockerfile_location
    )
}
