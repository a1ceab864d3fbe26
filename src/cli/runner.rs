//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, ScanArgs};
use crate::config::ClientConfig;
use crate::decode::SearchHit;
use crate::error::{Error, Result};
use crate::scroll::{ScanConfig, ScanConfigDef, ScrollClient, ScrollStep};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing documents to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out).await
    }

    /// Run the CLI command, writing documents to `out`
    pub async fn run_with_output<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Scan {
                scan,
                format,
                max_pages,
            } => self.scan(scan, *format, *max_pages, out).await,
            Commands::Count { scan } => self.count(scan, out).await,
        }
    }

    /// Build the client from the config file and `--url`
    fn client(&self) -> Result<ScrollClient> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        if let Some(url) = &self.cli.url {
            config.base_url = url.clone();
        }
        config.validate()?;
        ScrollClient::connect(config.transport_config())
    }

    async fn scan<W: Write>(
        &self,
        args: &ScanArgs,
        format: OutputFormat,
        max_pages: Option<usize>,
        out: &mut W,
    ) -> Result<()> {
        let client = self.client()?;
        let config = scan_config(args)?;
        let start = Instant::now();

        let mut cursor = client.scan(config).await?;
        info!("Scan opened: {} total hits", cursor.total_hits());

        let mut pages = 0usize;
        let mut documents = 0usize;
        loop {
            if max_pages.is_some_and(|max| pages >= max) {
                info!("Stopping after {} pages (--max-pages)", pages);
                break;
            }
            match cursor.next().await? {
                ScrollStep::Page(page) => {
                    pages += 1;
                    for hit in page.documents() {
                        writeln!(out, "{}", render_hit(hit, format)?)?;
                        documents += 1;
                    }
                }
                ScrollStep::EndOfStream => break,
            }
        }
        out.flush()?;

        info!(
            "Scan finished: {} documents in {} pages ({:.2?})",
            documents,
            pages,
            start.elapsed()
        );
        Ok(())
    }

    async fn count<W: Write>(&self, args: &ScanArgs, out: &mut W) -> Result<()> {
        let client = self.client()?;
        let config = scan_config(args)?;

        let cursor = client.scan(config).await?;
        writeln!(out, "{}", serde_json::json!({ "total": cursor.total_hits() }))?;
        Ok(())
    }
}

/// Merge the optional scan file with the command-line flags
pub(crate) fn scan_config(args: &ScanArgs) -> Result<ScanConfig> {
    let mut def = match &args.scan_file {
        Some(path) => load_scan_def(path)?,
        None => ScanConfigDef::default(),
    };

    def.indices.extend(args.indices.iter().cloned());
    def.types.extend(args.types.iter().cloned());

    if let Some(path) = &args.query_file {
        let content = fs::read_to_string(path)?;
        def.query = Some(serde_json::from_str(&content)?);
    }
    if let Some(json) = &args.query_json {
        def.query = Some(serde_json::from_str(json)?);
    }
    if args.size.is_some() {
        def.size = args.size;
    }
    if args.scroll.is_some() {
        def.keep_alive.clone_from(&args.scroll);
    }
    def.pretty |= args.pretty;
    def.debug |= args.debug;

    ScanConfig::try_from(def)
}

fn load_scan_def(path: &Path) -> Result<ScanConfigDef> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}

fn render_hit(hit: &SearchHit, format: OutputFormat) -> Result<String> {
    let value = match (format, &hit.source) {
        (OutputFormat::Source, Some(source)) => source.clone(),
        _ => serde_json::to_value(hit)?,
    };
    Ok(value.to_string())
}
