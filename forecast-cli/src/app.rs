//! Interactive dashboard loop.
//!
//! Input lines and fetch completions are the only event sources. Fetches run
//! as spawned tasks so the unit toggle keeps working while one is in flight.

use anyhow::Context;
use forecast_core::{
    Completion, DashboardState, FetchError, Forecast, RequestTicket, WeatherFetcher,
};
use std::sync::Arc;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::debug;

use crate::render;

type FetchDone = (RequestTicket, Result<Forecast, FetchError>);

/// One line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Place(&'a str),
    ToggleUnit,
    Help,
    Quit,
    Blank,
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => Input::Blank,
            ":unit" | ":u" => Input::ToggleUnit,
            ":help" | ":h" | ":?" => Input::Help,
            ":quit" | ":q" => Input::Quit,
            place => Input::Place(place),
        }
    }
}

const HELP: &str = "Type a place and press Enter to search. :unit toggles °C/°F, :quit exits.";

/// Run the dashboard on stdin.
pub async fn run(fetcher: Arc<dyn WeatherFetcher>, state: DashboardState) -> anyhow::Result<()> {
    run_with(fetcher, state, BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}

/// Drive the dashboard from `input` until `:quit`, or until input ends and
/// the latest request has completed. Returns the final state.
pub async fn run_with<R>(
    fetcher: Arc<dyn WeatherFetcher>,
    mut state: DashboardState,
    input: R,
) -> anyhow::Result<DashboardState>
where
    R: AsyncBufRead + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchDone>();
    let mut lines = input.lines();
    let mut input_open = true;

    println!("{HELP}");
    let start = state.place().to_string();
    if let Some(ticket) = state.request(&start) {
        spawn_fetch(&fetcher, ticket, &tx);
    }

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("Failed to read input")? {
                    None => {
                        debug!(loading = state.is_loading(), "input closed");
                        input_open = false;
                        if !state.is_loading() {
                            break;
                        }
                    }
                    Some(line) => match Input::parse(&line) {
                        Input::Quit => break,
                        Input::Blank => {}
                        Input::Help => println!("{HELP}"),
                        Input::ToggleUnit => {
                            let unit = state.toggle_unit();
                            debug!(%unit, "unit toggled");
                            redraw(&state)?;
                        }
                        Input::Place(text) => {
                            state.set_input(text);
                            if let Some(ticket) = state.submit() {
                                println!("Searching for {}...", ticket.query().place);
                                spawn_fetch(&fetcher, ticket, &tx);
                            }
                        }
                    },
                }
            }
            Some((ticket, result)) = rx.recv() => {
                match state.complete(&ticket, result) {
                    Completion::Applied => redraw(&state)?,
                    Completion::Failed { notice } => eprintln!("{notice}"),
                    Completion::Stale => {}
                }

                if !input_open && !state.is_loading() {
                    break;
                }
            }
        }
    }

    Ok(state)
}

fn spawn_fetch(
    fetcher: &Arc<dyn WeatherFetcher>,
    ticket: RequestTicket,
    tx: &mpsc::UnboundedSender<FetchDone>,
) {
    let fetcher = Arc::clone(fetcher);
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = fetcher.fetch(ticket.query()).await;
        // The receiver only goes away when the loop has exited.
        let _ = tx.send((ticket, result));
    });
}

fn redraw(state: &DashboardState) -> anyhow::Result<()> {
    let text = render::dashboard(&state.view(), chrono::Local::now())
        .context("Failed to render dashboard")?;
    print!("{text}");
    Ok(())
}
