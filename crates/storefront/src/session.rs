//! One live catalog page.
//!
//! A [`CatalogSession`] owns the page document, the input controller and a
//! handle to the render strategy. The WebSocket loop feeds it client
//! messages and debounce wake-ups; it answers with the messages that bring
//! the browser in line with the page.

use std::sync::Arc;
use std::time::Duration;

use askama::Template;
use uuid::Uuid;

use crate::catalog::CatalogContext;
use crate::controller::{Dispatch, InputController};
use crate::page::Page;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::render::{RenderMode, Renderer, run_pass};
use crate::routes::catalog::GridTemplate;

pub struct CatalogSession {
    id: Uuid,
    page: Page,
    renderer: Arc<dyn Renderer>,
    controller: InputController,
}

impl CatalogSession {
    /// Open a session on a fresh copy of the page with the default pass
    /// applied.
    #[must_use]
    pub fn start(context: &CatalogContext, search_debounce: Duration) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            page: context.first_paint(),
            renderer: context.renderer(),
            controller: InputController::new(search_debounce),
        };
        tracing::debug!(session_id = %session.id, mode = %session.renderer.mode(), "Session started");
        session
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn controller(&self) -> &InputController {
        &self.controller
    }

    /// Process one client message.
    ///
    /// Returns `None` when nothing has to be sent back yet: a debounced search,
    /// or an activation of a control that is hidden, disabled or unknown.
    pub fn handle(&mut self, message: ClientMessage) -> Option<ServerMessage> {
        match message {
            ClientMessage::Activate { key } => {
                let notice = self.page.activate(&key);
                if notice.is_none() {
                    tracing::debug!(session_id = %self.id, key = %key, "Ignored activation");
                }
                notice.map(|n| ServerMessage::Notice { message: n.message })
            }
            ClientMessage::Ping => Some(ServerMessage::Pong),
            other => {
                let event = other.into_filter_event()?;
                match self.controller.handle(event) {
                    Dispatch::Now => Some(self.pass()),
                    Dispatch::Deferred => None,
                }
            }
        }
    }

    /// Wait until a debounced pass is due. Pending forever when none is.
    pub async fn debounce_elapsed(&mut self) {
        self.controller.deferred().await;
    }

    /// Run the pass a debounce timer was holding back.
    pub fn debounced_pass(&mut self) -> ServerMessage {
        self.pass()
    }

    /// The message that syncs a freshly connected page with this session.
    #[must_use]
    pub fn snapshot(&self) -> ServerMessage {
        self.sync_message()
    }

    fn pass(&mut self) -> ServerMessage {
        let count = run_pass(self.renderer.as_ref(), &mut self.page, self.controller.state());
        tracing::debug!(
            session_id = %self.id,
            count,
            search = %self.controller.state().search_text,
            category = %self.controller.state().category,
            sort = %self.controller.state().sort_order,
            "Render pass"
        );
        self.sync_message()
    }

    fn sync_message(&self) -> ServerMessage {
        let status = self.page.status().to_string();
        let empty = self.page.empty_indicator().visible;

        match self.renderer.mode() {
            RenderMode::DataDriven => {
                let template = GridTemplate {
                    units: self.page.units(),
                };
                match template.render() {
                    Ok(html) => ServerMessage::Grid {
                        html,
                        status,
                        empty,
                    },
                    Err(error) => {
                        tracing::error!(session_id = %self.id, error = %error, "Failed to render grid");
                        ServerMessage::Error {
                            message: "Could not render products".to_string(),
                        }
                    }
                }
            }
            RenderMode::MarkupDriven => ServerMessage::Arrange {
                order: self.page.visible_units().map(|u| u.key.clone()).collect(),
                hidden: self.page.hidden_units().map(|u| u.key.clone()).collect(),
                status,
                empty,
            },
        }
    }
}
