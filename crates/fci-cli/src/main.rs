use std::fs::File;
use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use fci_spider::{FciSpider, SpiderConfig};
use serde::Serialize;
use tokio::runtime;

/// FCI dog breeds nomenclature extractor
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Args {
    /// Optional spider yaml configuration file
    #[clap(env = "FCI_SPIDER_CONFIG", parse(from_os_str), long)]
    pub config: Option<PathBuf>,
    /// Override crawler's user agent
    #[clap(long, global = true)]
    pub user_agent: Option<String>,
    /// Override crawler's maximum concurrent page downloads
    #[clap(long, global = true)]
    pub concurrent_downloads: Option<usize>,
    /// Download every page again instead of reusing listings
    #[clap(long, global = true)]
    pub no_cache: bool,
    /// When quiet no logs are outputted
    #[clap(long, short, global = true)]
    pub quiet: bool,
    /// Write JSON to this file instead of stdout
    #[clap(parse(from_os_str), long, short, global = true)]
    pub output_file: Option<PathBuf>,
    #[clap(subcommand)]
    pub cmd: SubCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    /// List breed groups
    #[clap(name = "groups")]
    Groups,
    /// List sections of every group
    #[clap(name = "sections")]
    Sections,
    #[clap(name = "breeds")]
    Breeds(BreedsArgs),
    #[clap(hide = true)]
    Completion,
}

/// List breeds, definitive then provisional ones by default
#[derive(Debug, clap::Args)]
pub struct BreedsArgs {
    /// Only breeds recognized on a definitive basis
    #[clap(long, conflicts_with = "provisional")]
    pub definitive: bool,
    /// Only breeds recognized on a provisional basis
    #[clap(long)]
    pub provisional: bool,
}

impl TryFrom<&Args> for SpiderConfig {
    type Error = anyhow::Error;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let mut conf = if let Some(file) = args.config.as_ref().map(File::open) {
            serde_yaml::from_reader(file?)?
        } else {
            SpiderConfig::default()
        };
        if let Some(user_agent) = &args.user_agent {
            conf.crawler.user_agent = user_agent.to_string();
        }
        if let Some(concurrent_downloads) = args.concurrent_downloads {
            conf.crawler.concurrent_downloads = concurrent_downloads;
        }
        if args.no_cache {
            conf.cache = false;
        }
        Ok(conf)
    }
}

fn write_json<T: Serialize>(value: &T, output_file: Option<&PathBuf>) -> anyhow::Result<()> {
    match output_file {
        Some(path) => {
            let mut file = File::create(path)?;
            serde_json::to_writer_pretty(&mut file, value)?;
            writeln!(file)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn spider(args: &Args) -> anyhow::Result<FciSpider> {
    let conf = SpiderConfig::try_from(args)?;
    Ok(FciSpider::new(conf)?)
}

fn block_on<F: Future>(fut: F) -> anyhow::Result<F::Output> {
    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
    Ok(rt.block_on(fut))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !args.quiet {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("fci_spider=info,fci_crawler=warn"),
        )
        .init();
    }

    let output_file = args.output_file.as_ref();
    match &args.cmd {
        SubCommand::Groups => {
            let spider = spider(&args)?;
            let groups = block_on(spider.list_groups())??;
            write_json(&groups, output_file)
        }
        SubCommand::Sections => {
            let spider = spider(&args)?;
            let sections = block_on(spider.list_sections())??;
            write_json(&sections, output_file)
        }
        SubCommand::Breeds(breeds) => {
            let spider = spider(&args)?;
            let listing = if breeds.definitive {
                block_on(spider.list_definitive_breeds())?
            } else if breeds.provisional {
                block_on(spider.list_provisional_breeds())?
            } else {
                block_on(spider.list_all_breeds())?
            };
            write_json(&listing?, output_file)
        }
        SubCommand::Completion => {
            generate(Shell::Bash, &mut Args::command(), "fci", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides_defaults() {
        let args = Args::parse_from([
            "fci",
            "--user-agent",
            "breeds-test",
            "--concurrent-downloads",
            "2",
            "--no-cache",
            "breeds",
            "--definitive",
        ]);
        let conf = SpiderConfig::try_from(&args).unwrap();
        assert_eq!(conf.crawler.user_agent, "breeds-test");
        assert_eq!(conf.crawler.concurrent_downloads, 2);
        assert!(!conf.cache);
        assert!(matches!(
            args.cmd,
            SubCommand::Breeds(BreedsArgs {
                definitive: true,
                provisional: false
            })
        ));
    }

    #[test]
    fn breed_filters_are_exclusive() {
        let res = Args::try_parse_from(["fci", "breeds", "--definitive", "--provisional"]);
        assert!(res.is_err());
    }

    #[test]
    fn cli_is_consistent() {
        Args::command().debug_assert();
    }
}
