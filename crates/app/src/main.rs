mod telemetry;

use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock};
use storage::SupabaseConfig;
use tracing::info;
use ui::{App, DesktopLinkOpener, LinkOpenerRef, UiApp, build_app_context};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBackend { raw: String },
    MissingSupabase { what: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBackend { raw } => {
                write!(f, "invalid --backend value: {raw} (expected supabase or demo)")
            }
            ArgsError::MissingSupabase { what } => {
                write!(f, "the supabase backend needs {what}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Demo,
    Supabase,
}

impl Backend {
    fn parse(raw: &str) -> Result<Self, ArgsError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "demo" => Ok(Self::Demo),
            "supabase" => Ok(Self::Supabase),
            _ => Err(ArgsError::InvalidBackend {
                raw: raw.to_string(),
            }),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Supabase => "supabase",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Args {
    Help,
    Run {
        backend: Backend,
        supabase: Option<SupabaseConfig>,
    },
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--backend <supabase|demo>] [--supabase-url <url>] [--supabase-key <key>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --backend supabase when a project URL is configured, demo otherwise");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PORTAL_BACKEND, PORTAL_SUPABASE_URL, PORTAL_SUPABASE_ANON_KEY");
    eprintln!("  PORTAL_LOG (default {}), PORTAL_LOG_FORMAT=json", telemetry::DEFAULT_FILTER);
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut backend = non_empty(env("PORTAL_BACKEND"))
            .map(|raw| Backend::parse(&raw))
            .transpose()?;
        let mut url = non_empty(env("PORTAL_SUPABASE_URL"));
        let mut key = non_empty(env("PORTAL_SUPABASE_ANON_KEY"));

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--backend" => {
                    let value = require_value(args, "--backend")?;
                    backend = Some(Backend::parse(&value)?);
                }
                "--supabase-url" => {
                    url = non_empty(Some(require_value(args, "--supabase-url")?));
                }
                "--supabase-key" => {
                    key = non_empty(Some(require_value(args, "--supabase-key")?));
                }
                "--help" | "-h" => return Ok(Self::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let backend = backend.unwrap_or(if url.is_some() {
            Backend::Supabase
        } else {
            Backend::Demo
        });
        let supabase = match backend {
            Backend::Demo => None,
            Backend::Supabase => {
                let url = url.ok_or(ArgsError::MissingSupabase {
                    what: "--supabase-url or PORTAL_SUPABASE_URL",
                })?;
                let key = key.ok_or(ArgsError::MissingSupabase {
                    what: "--supabase-key or PORTAL_SUPABASE_ANON_KEY",
                })?;
                Some(SupabaseConfig::new(url, key))
            }
        };

        Ok(Self::Run { backend, supabase })
    }
}

struct DesktopApp {
    services: AppServices,
    backend: Backend,
}

impl UiApp for DesktopApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::new(DesktopLinkOpener)
    }

    fn backend_label(&self) -> &'static str {
        self.backend.label()
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |name| std::env::var(name).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let (backend, supabase) = match parsed {
        Args::Help => {
            print_usage();
            return Ok(());
        }
        Args::Run { backend, supabase } => (backend, supabase),
    };

    telemetry::init_tracing();

    let clock = Clock::default_clock();
    let services = match supabase {
        Some(config) => {
            info!(url = %config.url, "using supabase backend");
            AppServices::supabase(config, clock)?
        }
        None => {
            info!("using bundled demo catalog");
            AppServices::demo(clock)?
        }
    };

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services, backend });
    let context = build_app_context(&app);

    // Some dev setups default the window to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Learning Portal")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter, |name| {
            env.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn defaults_to_demo_without_a_project_url() {
        assert_eq!(
            parse(&[], &[]),
            Ok(Args::Run {
                backend: Backend::Demo,
                supabase: None
            })
        );
    }

    #[test]
    fn project_url_in_env_selects_supabase() {
        let parsed = parse(
            &[],
            &[
                ("PORTAL_SUPABASE_URL", "https://demo.supabase.co/"),
                ("PORTAL_SUPABASE_ANON_KEY", "anon"),
            ],
        );
        assert_eq!(
            parsed,
            Ok(Args::Run {
                backend: Backend::Supabase,
                supabase: Some(SupabaseConfig::new("https://demo.supabase.co", "anon")),
            })
        );
    }

    #[test]
    fn flags_override_env() {
        let parsed = parse(
            &["--backend", "demo"],
            &[("PORTAL_SUPABASE_URL", "https://demo.supabase.co")],
        );
        assert!(matches!(
            parsed,
            Ok(Args::Run {
                backend: Backend::Demo,
                ..
            })
        ));
    }

    #[test]
    fn supabase_without_key_is_an_error() {
        let parsed = parse(&["--backend", "supabase", "--supabase-url", "https://x.co"], &[]);
        assert!(matches!(parsed, Err(ArgsError::MissingSupabase { .. })));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse(&["--backend"], &[]),
            Err(ArgsError::MissingValue { flag: "--backend" })
        );
        assert!(matches!(
            parse(&["--backend", "sqlite"], &[]),
            Err(ArgsError::InvalidBackend { .. })
        ));
        assert_eq!(
            parse(&["--db"], &[]),
            Err(ArgsError::UnknownArg("--db".to_string()))
        );
        assert_eq!(parse(&["--help"], &[]), Ok(Args::Help));
    }
}
