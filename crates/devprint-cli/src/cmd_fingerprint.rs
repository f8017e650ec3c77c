use anyhow::Context;
use clap::Args;
use devprint_collect::HostProfile;
use devprint_core::{FingerprintOptions, FingerprintResult};
use devprint_pipeline::Fingerprinter;
use std::path::{Path, PathBuf};

// ── CLI Schema ──

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Recorded host profile (JSON or YAML)
    #[arg(long)]
    pub profile: PathBuf,
    /// Options file (JSON or YAML); flags below override it
    #[arg(long)]
    pub options: Option<PathBuf>,
    /// Skip the 2D-surface signal
    #[arg(long)]
    pub no_canvas: bool,
    /// Skip GPU vendor/renderer
    #[arg(long)]
    pub no_webgl: bool,
    /// Skip the audio signal
    #[arg(long)]
    pub no_audio: bool,
    /// Skip installed-font detection
    #[arg(long)]
    pub no_fonts: bool,
    /// Requested audio wait in milliseconds (capped at 500)
    #[arg(long)]
    pub timeout: Option<f64>,
}

impl RunArgs {
    /// Options file first, then command-line flags on top.
    pub fn resolve_options(&self) -> anyhow::Result<FingerprintOptions> {
        let base = match &self.options {
            Some(path) => read_options(path)?,
            None => FingerprintOptions::default(),
        };
        Ok(base.merge(&self.overrides()))
    }

    fn overrides(&self) -> FingerprintOptions {
        FingerprintOptions {
            canvas: self.no_canvas.then_some(false),
            webgl: self.no_webgl.then_some(false),
            audio: self.no_audio.then_some(false),
            fonts: self.no_fonts.then_some(false),
            timeout: self.timeout,
        }
    }

    fn fingerprinter(&self) -> anyhow::Result<Fingerprinter> {
        let profile = HostProfile::load(&self.profile)
            .with_context(|| format!("loading host profile {}", self.profile.display()))?;
        Ok(Fingerprinter::new(profile.into_environment()))
    }
}

/// Read an options file. Any shape is accepted; YAML parsing also covers
/// JSON.
pub fn read_options(path: &Path) -> anyhow::Result<FingerprintOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading options file {}", path.display()))?;
    let value: serde_json::Value = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing options file {}", path.display()))?;
    Ok(FingerprintOptions::from_value(&value))
}

// ── Command Implementations ──

pub fn run(args: &RunArgs) -> anyhow::Result<FingerprintResult> {
    let fingerprinter = args.fingerprinter()?;
    let options = args.resolve_options()?;
    let result = tokio::runtime::Runtime::new()?.block_on(fingerprinter.generate_fingerprint(&options))?;
    Ok(result)
}

pub fn fingerprint(args: &RunArgs, pretty: bool) -> anyhow::Result<()> {
    let result = run(args)?;
    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");
    Ok(())
}

pub fn device_id(args: &RunArgs) -> anyhow::Result<()> {
    let fingerprinter = args.fingerprinter()?;
    let options = args.resolve_options()?;
    let id = tokio::runtime::Runtime::new()?.block_on(fingerprinter.generate_device_id(&options))?;
    println!("{id}");
    Ok(())
}
