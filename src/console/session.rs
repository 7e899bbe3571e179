//! Interactive console session
//!
//! Reads command lines, forwards dashboard commands to the controller,
//! serves marketplace commands from its own view, and writes replies and
//! dashboard notices through a single writer.

use anyhow::{Context, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::catalog::MarketplaceView;
use crate::config::OutputFormat;
use crate::events::DashboardEvent;
use crate::state::{DashboardCommand, DashboardStatus, StatusReply};

use super::protocol::{parse_line, Request, Response};
use super::render::{event_line, render, HELP};

/// What the session should do after a request
#[derive(Debug)]
pub enum Flow {
    Reply(Response),
    Quit,
}

/// A console bound to one dashboard controller
pub struct Console {
    view: MarketplaceView,
    command_tx: mpsc::Sender<DashboardCommand>,
    event_rx: broadcast::Receiver<DashboardEvent>,
    format: OutputFormat,
}

impl Console {
    pub fn new(
        view: MarketplaceView,
        command_tx: mpsc::Sender<DashboardCommand>,
        event_rx: broadcast::Receiver<DashboardEvent>,
        format: OutputFormat,
    ) -> Self {
        Self {
            view,
            command_tx,
            event_rx,
            format,
        }
    }

    #[cfg(test)]
    pub fn view(&self) -> &MarketplaceView {
        &self.view
    }

    /// Handle lines until the input closes or `quit`, printing dashboard
    /// events as they arrive
    pub async fn run<W>(&mut self, mut lines: mpsc::Receiver<String>, mut output: W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let mut events_open = true;

        loop {
            tokio::select! {
                line = lines.recv() => {
                    let Some(line) = line else {
                        debug!("console input closed");
                        break;
                    };
                    match self.handle_line(&line).await? {
                        Some(Flow::Reply(response)) => {
                            self.write(&mut output, &response).await?;
                            // Notices caused by this command follow its reply
                            self.flush_events(&mut output).await?;
                        }
                        Some(Flow::Quit) => {
                            info!("quit requested");
                            break;
                        }
                        None => {}
                    }
                }
                event = self.event_rx.recv(), if events_open => match event {
                    Ok(event) => self.write_event(&mut output, &event).await?,
                    Err(RecvError::Lagged(n)) => {
                        warn!(skipped = n, "event receiver lagged");
                    }
                    Err(RecvError::Closed) => {
                        debug!("event channel closed");
                        events_open = false;
                    }
                },
            }
        }

        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> Result<Option<Flow>> {
        match parse_line(line) {
            Ok(None) => Ok(None),
            Ok(Some(request)) => self.process(request).await.map(Some),
            Err(e) => {
                warn!(error = %e, "rejected command");
                Ok(Some(Flow::Reply(Response::from(e))))
            }
        }
    }

    /// Handle one parsed request
    pub async fn process(&mut self, request: Request) -> Result<Flow> {
        debug!(?request, "console request");

        let response = match request {
            Request::Start => self.forward(DashboardCommand::Start, "start").await?,
            Request::Stop => self.forward(DashboardCommand::Stop, "stop").await?,
            Request::Reset => self.forward(DashboardCommand::Reset, "reset").await?,
            Request::Status => Response::Status(self.request(DashboardCommand::Snapshot).await?),
            Request::Products => self.products(),
            Request::FilterCategory { value } => {
                self.view.filters_mut().category = value;
                self.products()
            }
            Request::FilterCondition { value } => {
                self.view.filters_mut().condition = value;
                self.products()
            }
            Request::Search { text } => {
                self.view.filters_mut().search = text;
                self.products()
            }
            Request::Sort { by } => {
                self.view.filters_mut().sort_by = by;
                self.products()
            }
            Request::ClearFilters => {
                self.view.reset_filters();
                Response::Filters {
                    filters: self.view.filters().clone(),
                }
            }
            Request::ToggleFilters => Response::FilterPanel {
                shown: self.view.toggle_filters(),
            },
            Request::Show { id } => match self.view.select(&id) {
                Some(product) => Response::Detail {
                    product: product.clone(),
                },
                None => Response::Error {
                    code: "not_found".to_string(),
                    message: format!("no product with id '{}'", id),
                },
            },
            Request::Close => {
                self.view.close();
                Response::Closed
            }
            Request::Options => Response::options(),
            Request::Help => Response::Help { commands: HELP },
            Request::Quit => return Ok(Flow::Quit),
        };

        Ok(Flow::Reply(response))
    }

    /// Send a command and wait until the controller has applied it
    async fn request(&self, command: fn(StatusReply) -> DashboardCommand) -> Result<DashboardStatus> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(command(reply_tx))
            .await
            .context("dashboard controller is gone")?;
        reply_rx
            .await
            .context("dashboard controller dropped the reply")
    }

    async fn forward(
        &self,
        command: fn(StatusReply) -> DashboardCommand,
        name: &'static str,
    ) -> Result<Response> {
        self.request(command).await?;
        Ok(Response::Accepted { command: name })
    }

    fn products(&self) -> Response {
        Response::Products {
            filters: self.view.filters().clone(),
            filter_panel: self.view.filters_shown(),
            selected: self.view.selected().map(|p| p.id.clone()),
            products: self.view.visible(),
        }
    }

    async fn flush_events<W: AsyncWrite + Unpin>(&mut self, output: &mut W) -> Result<()> {
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => self.write_event(output, &event).await?,
                Err(TryRecvError::Lagged(n)) => {
                    warn!(skipped = n, "event receiver lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(()),
            }
        }
    }

    async fn write_event<W: AsyncWrite + Unpin>(
        &self,
        output: &mut W,
        event: &DashboardEvent,
    ) -> Result<()> {
        match event_line(event, self.format) {
            Some(line) => self.write_line(output, line).await,
            None => Ok(()),
        }
    }

    async fn write<W: AsyncWrite + Unpin>(&self, output: &mut W, response: &Response) -> Result<()> {
        let text = match self.format {
            OutputFormat::Text => render(response),
            OutputFormat::Json => serde_json::to_string(response)?,
        };
        self.write_line(output, text).await
    }

    async fn write_line<W: AsyncWrite + Unpin>(&self, output: &mut W, mut text: String) -> Result<()> {
        text.push('\n');
        output.write_all(text.as_bytes()).await?;
        output.flush().await?;
        Ok(())
    }
}
