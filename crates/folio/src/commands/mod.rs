//! CLI command implementations.

mod args;
pub(crate) mod generate;
pub(crate) mod openapi;
pub(crate) mod page;
pub(crate) mod params;
pub(crate) mod tree;

pub(crate) use args::SourceArgs;
pub(crate) use generate::GenerateArgs;
pub(crate) use openapi::OpenApiArgs;
pub(crate) use page::PageArgs;
pub(crate) use params::ParamsArgs;
pub(crate) use tree::TreeArgs;
