//! WebSocket messages between the catalog page and its session.
//!
//! Every message is a JSON object tagged by `type`.

use serde::{Deserialize, Serialize};
use showcase_core::CategoryFilter;

use crate::catalog::engine::SortOrder;
use crate::controller::FilterEvent;
use crate::page::UnitKey;

/// Messages sent by the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Search input changed.
    Search { value: String },
    /// Category select changed.
    Category { value: CategoryFilter },
    /// Sort select changed.
    Sort { value: SortOrder },
    /// An action control was activated.
    Activate { key: String },
    Ping,
}

impl ClientMessage {
    /// The filter event carried by this message, if any.
    #[must_use]
    pub fn into_filter_event(self) -> Option<FilterEvent> {
        match self {
            Self::Search { value } => Some(FilterEvent::Search(value)),
            Self::Category { value } => Some(FilterEvent::Category(value)),
            Self::Sort { value } => Some(FilterEvent::Sort(value)),
            Self::Activate { .. } | Self::Ping => None,
        }
    }
}

/// Messages sent to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Replace the grid contents (data-driven).
    Grid {
        html: String,
        status: String,
        empty: bool,
    },
    /// Reorder and hide existing units (markup-driven).
    Arrange {
        order: Vec<UnitKey>,
        hidden: Vec<UnitKey>,
        status: String,
        empty: bool,
    },
    /// Acknowledgment for an activated control.
    Notice { message: String },
    Pong,
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ClientMessage {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_client_messages() {
        assert_eq!(
            parse(json!({"type": "search", "value": "Phone"})),
            ClientMessage::Search {
                value: "Phone".to_string()
            }
        );
        assert_eq!(
            parse(json!({"type": "category", "value": "all"})),
            ClientMessage::Category {
                value: CategoryFilter::All
            }
        );
        assert_eq!(
            parse(json!({"type": "sort", "value": "high-to-low"})),
            ClientMessage::Sort {
                value: SortOrder::HighToLow
            }
        );
        assert_eq!(parse(json!({"type": "ping"})), ClientMessage::Ping);
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let result: Result<ClientMessage, _> =
            serde_json::from_value(json!({"type": "sort", "value": "by-rating"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_activate_carries_no_filter_event() {
        let message = parse(json!({"type": "activate", "key": "3"}));
        assert_eq!(message.into_filter_event(), None);
    }

    #[test]
    fn test_server_message_shape() {
        let message = ServerMessage::Arrange {
            order: vec![UnitKey::new("3"), UnitKey::new("4")],
            hidden: vec![UnitKey::new("1")],
            status: "Showing 2 products".to_string(),
            empty: false,
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "arrange",
                "order": ["3", "4"],
                "hidden": ["1"],
                "status": "Showing 2 products",
                "empty": false
            })
        );
        assert_eq!(
            serde_json::to_value(ServerMessage::Pong).unwrap(),
            json!({"type": "pong"})
        );
    }
}
