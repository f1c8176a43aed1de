//! Command-line interface.
//!
//! Running `gobarber` with no command starts the TUI. The subcommands cover
//! the booking flows non-interactively, for scripts and quick checks.

mod common;

pub use common::*;

use crate::appointment::{build_request, format_confirmation};
use crate::availability::{DayAvailability, DayPeriod};
use crate::models::{AvailabilitySlot, Provider};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

/// Book salon and barber appointments from the terminal
#[derive(Parser, Debug)]
#[command(name = "gobarber", version, about = "Book salon and barber appointments from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Disable colors in the TUI (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_colors: bool,

    /// Sign in with this email; the password is read from GOBARBER_PASSWORD
    #[arg(long, global = true)]
    pub email: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List hairdressers
    Providers,
    /// Show a hairdresser's free hours for a day
    Availability {
        /// Provider id
        #[arg(short, long)]
        provider: String,
        /// Day to check as YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Book an appointment
    Book {
        /// Provider id
        #[arg(short, long)]
        provider: String,
        /// Day as YYYY-MM-DD
        #[arg(short, long)]
        date: NaiveDate,
        /// Hour of the day, 0-23
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
        hour: u8,
    },
    /// Show the config file location and effective settings
    Config,
    /// Show the log file location
    Logs,
}

impl Cli {
    /// Execute the CLI command. Returns `false` when there is none and the
    /// TUI should start instead.
    pub fn execute(&self) -> Result<bool> {
        let Some(command) = &self.command else {
            return Ok(false);
        };
        match command {
            Commands::Providers => self.cmd_providers()?,
            Commands::Availability { provider, date } => {
                let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
                self.cmd_availability(provider, date)?;
            }
            Commands::Book { provider, date, hour } => self.cmd_book(provider, *date, *hour)?,
            Commands::Config => Self::cmd_config()?,
            Commands::Logs => Self::cmd_logs(),
        }
        Ok(true)
    }

    fn signed_in(&self) -> Result<(CliContext, crate::api::ApiClient)> {
        let ctx = CliContext::load()?;
        let credentials = Credentials::from_env(self.email.as_deref())?;
        let api = ctx.authenticate(credentials)?;
        Ok((ctx, api))
    }

    fn cmd_providers(&self) -> Result<()> {
        let (ctx, api) = self.signed_in()?;
        let providers = ctx.block_on(api.providers()).context("Could not load providers")?;
        print!("{}", format_providers(&providers));
        Ok(())
    }

    fn cmd_availability(&self, provider: &str, date: NaiveDate) -> Result<()> {
        let (ctx, api) = self.signed_in()?;
        let slots = ctx
            .block_on(api.day_availability(provider, date))
            .context("Could not load availability")?;
        print!("{}", format_availability(date, &slots));
        Ok(())
    }

    fn cmd_book(&self, provider: &str, date: NaiveDate, hour: u8) -> Result<()> {
        let request = build_request(provider, date, hour).context("Invalid appointment hour")?;
        let (ctx, api) = self.signed_in()?;
        info!("Booking provider {} at {}", provider, request.date);
        ctx.block_on(api.create_appointment(&request))
            .context("Error creating appointment")?;
        print_success(&format!("Appointment scheduled for {}", format_confirmation(&request.date)));
        Ok(())
    }

    fn cmd_config() -> Result<()> {
        let ctx = CliContext::load()?;
        let config = &ctx.config;
        println!("{}", ctx.config_path.display());
        println!("  api_url:   {}", config.effective_api_url());
        println!("  timeout:   {}s", config.request_timeout_secs);
        println!("  theme:     {:?}", config.effective_theme());
        println!("  keymap:    {}", config.keymap.preset.name());
        if let Some(email) = &config.last_email {
            println!("  last user: {}", email);
        }
        Ok(())
    }

    fn cmd_logs() {
        let log_file = crate::utils::get_log_dir().join("gobarber.log");
        println!("{}", log_file.display());
        print_info(&format!("Follow with: tail -f {}", log_file.display()));
    }
}

pub fn format_providers(providers: &[Provider]) -> String {
    if providers.is_empty() {
        return "No hairdressers available.\n".to_string();
    }
    let width = providers.iter().map(|p| p.id.len()).max().unwrap_or(0);
    providers
        .iter()
        .map(|p| format!("  {:<width$}  {}\n", p.id, p.name, width = width))
        .collect()
}

/// Morning and afternoon sections, one line per slot.
pub fn format_availability(date: NaiveDate, slots: &[AvailabilitySlot]) -> String {
    let day = DayAvailability::from_slots(slots);
    let mut out = format!("{}\n", date.format("%A, %B %-d, %Y"));
    for (period, hours) in [(DayPeriod::Morning, &day.morning), (DayPeriod::Afternoon, &day.afternoon)] {
        out.push_str(&format!("{}\n", period.title()));
        if hours.is_empty() {
            out.push_str("  (none)\n");
        }
        for slot in hours {
            let status = if slot.available { "free" } else { "taken" };
            out.push_str(&format!("  {}  {}\n", slot.label, status));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_book() {
        let cli = Cli::try_parse_from([
            "gobarber", "book", "--provider", "p1", "--date", "2024-03-10", "--hour", "9",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Book { provider, date, hour }) => {
                assert_eq!(provider, "p1");
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
                assert_eq!(hour, 9);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_book_rejects_bad_hour() {
        let result = Cli::try_parse_from([
            "gobarber", "book", "--provider", "p1", "--date", "2024-03-10", "--hour", "24",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_command_starts_tui() {
        let cli = Cli::try_parse_from(["gobarber", "--no-colors"]).unwrap();
        assert!(cli.no_colors);
        assert!(!cli.execute().unwrap());
    }

    #[test]
    fn test_format_availability() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let slots = [
            AvailabilitySlot { hour: 8, available: true },
            AvailabilitySlot { hour: 14, available: false },
        ];
        assert_eq!(
            format_availability(date, &slots),
            "Sunday, March 10, 2024\nMorning\n  08:00  free\nAfternoon\n  14:00  taken\n"
        );
    }

    #[test]
    fn test_format_availability_empty_section() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let out = format_availability(date, &[AvailabilitySlot { hour: 15, available: true }]);
        assert!(out.contains("Morning\n  (none)\n"));
    }

    #[test]
    fn test_format_providers() {
        let providers = vec![
            Provider { id: "p1".into(), name: "Ana".into(), avatar_url: None },
            Provider { id: "p22".into(), name: "Bia".into(), avatar_url: None },
        ];
        assert_eq!(format_providers(&providers), "  p1   Ana\n  p22  Bia\n");
        assert_eq!(format_providers(&[]), "No hairdressers available.\n");
    }
}
