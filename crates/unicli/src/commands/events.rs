//! Event command handler.

use tabled::Tabled;
use unicli_api::{EventQuery, LegacyClient, LegacyEvent};

use crate::cli::{EventsArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util::or_dash;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Subsystem")]
    subsystem: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl From<&LegacyEvent> for EventRow {
    fn from(e: &LegacyEvent) -> Self {
        Self {
            time: or_dash(e.datetime.as_deref()),
            subsystem: or_dash(e.subsystem.as_deref()),
            key: or_dash(e.key.as_deref()),
            message: e.msg.clone().unwrap_or_default(),
        }
    }
}

/// `{datetime}\t{msg}`
fn event_line(e: &LegacyEvent) -> String {
    format!(
        "{}\t{}",
        e.datetime.as_deref().unwrap_or("-"),
        e.msg.as_deref().unwrap_or_default()
    )
}

impl From<&EventsArgs> for EventQuery {
    fn from(args: &EventsArgs) -> Self {
        Self {
            limit: args.limit,
            start: args.start,
            within: args.within,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &LegacyClient,
    query: &EventQuery,
    format: OutputFormat,
) -> Result<String, CliError> {
    let events = client.list_events(query).await?;
    output::render_list(format, &events, |e| EventRow::from(e), event_line)
}
