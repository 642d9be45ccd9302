//! Demo runner.
//!
//! Brings the terminal interface up, binds a few color pairs, draws a window
//! and waits for a key. Bootstrap failure is fatal: it is logged and the
//! process exits non-zero.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tui_console::term::{init_interface, init_pair, Backend, CrosstermBackend, Interface};
use tui_console::types::{BaseColor, InterfaceConfig, Rect};

const PAIR_TITLE: i16 = 1;
const PAIR_BODY: i16 = 2;
const PAIR_SWATCH_BASE: i16 = 8;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tui_console=info,tui_console_term=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let iface = match init_interface(CrosstermBackend::stdout(), &InterfaceConfig::default()) {
        Ok(iface) => iface,
        Err(err) => {
            let err = anyhow::Error::from(err);
            tracing::error!(error = ?err, "cannot start");
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = run(&iface);
    let restored = iface.shutdown().context("restoring terminal");

    match result.and(restored) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = ?err, "demo failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(iface: &Interface<CrosstermBackend<io::Stdout>>) -> Result<()> {
    init_pair(iface, PAIR_TITLE, BaseColor::Yellow, BaseColor::Blue);
    init_pair(iface, PAIR_BODY, BaseColor::White, BaseColor::Black);
    for color in BaseColor::ALL {
        init_pair(iface, PAIR_SWATCH_BASE + color.code(), BaseColor::Black, color);
    }

    let win = iface
        .new_window(Rect::new(2, 1, 40, 12))
        .context("opening demo window")?;

    win.with_backend(|b, id| -> Result<()> {
        b.put_str(id, 0, 0, &format!("{:^40}", "tui-console"), PAIR_TITLE)?;
        b.put_str(id, 1, 2, "Base colors:", PAIR_BODY)?;
        for (row, color) in (3u16..).zip(BaseColor::ALL) {
            b.put_str(id, 2, row, "    ", PAIR_SWATCH_BASE + color.code())?;
            b.put_str(id, 7, row, color.name(), PAIR_BODY)?;
        }
        b.put_str(id, 1, 11, "press any key to exit", PAIR_BODY)?;
        b.refresh(id)?;
        Ok(())
    })
    .unwrap_or(Ok(()))?;

    loop {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    break;
                }
            }
        }
    }

    Ok(())
}
