//! Desktop entry point for the reimbursement request desk.

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use form_core::CurrencyLocale;

use crate::backend_bridge::commands::BackendCommand;
use crate::backend_bridge::runtime;
use crate::controller::events::UiEvent;
use crate::ui::{FormApp, StartupConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum LocaleArg {
    /// Indonesian digit grouping ("150.000").
    Id,
    /// English digit grouping ("150,000").
    En,
}

impl From<LocaleArg> for CurrencyLocale {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::Id => CurrencyLocale::Id,
            LocaleArg::En => CurrencyLocale::En,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "reimburse-desk",
    about = "Desktop form for filing reimbursement requests"
)]
struct Cli {
    /// Tracing filter directive, e.g. "info" or "form_core=debug".
    #[arg(long, default_value = "info")]
    log_filter: String,

    /// Thousands-separator locale for the amount field.
    #[arg(long, value_enum, default_value = "id")]
    locale: LocaleArg,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter.as_str())
        .init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    runtime::launch(cmd_rx, ui_tx);

    let startup = StartupConfig {
        locale: cli.locale.into(),
        ..StartupConfig::default()
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Reimbursement Request Desk")
            .with_inner_size([560.0, 860.0])
            .with_min_inner_size([480.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Reimbursement Request Desk",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(FormApp::new(cmd_tx, ui_rx, startup)))
        }),
    )
}
