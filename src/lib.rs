pub mod cli;
pub mod config;
pub mod gallery;
pub mod processing;
pub mod request;
pub mod runtime;
pub mod source;
pub mod tools;
pub mod transport;
pub mod workflow;

#[cfg(test)]
mod test_support;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
