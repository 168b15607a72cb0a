//! Command dispatch: bridges CLI args -> controller session -> output formatting.

pub mod clients;
pub mod config_cmd;
pub mod devices;
pub mod events;
pub mod util;

use tracing::debug;
use unicli_api::{EventQuery, LegacyClient, MacAddress, Session, SessionConfig};

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use self::clients::StationAction;

/// A controller-bound command with its arguments validated.
#[derive(Debug)]
enum Request {
    Events(EventQuery),
    Devices,
    Clients,
    Station(StationAction, MacAddress),
}

impl Request {
    fn station(action: StationAction, raw_mac: &str) -> Result<Self, CliError> {
        Ok(Self::Station(action, MacAddress::parse(raw_mac)?))
    }
}

impl TryFrom<Command> for Request {
    type Error = CliError;

    fn try_from(cmd: Command) -> Result<Self, CliError> {
        match cmd {
            Command::Events(args) => Ok(Self::Events(EventQuery::from(&args))),
            Command::Devices => Ok(Self::Devices),
            Command::Clients => Ok(Self::Clients),
            Command::Block(arg) => Self::station(StationAction::Block, &arg.mac),
            Command::Unblock(arg) => Self::station(StationAction::Unblock, &arg.mac),
            Command::Reconnect(arg) => Self::station(StationAction::Reconnect, &arg.mac),
            Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
                field: "command".into(),
                reason: "does not talk to a controller".into(),
            }),
        }
    }
}

/// Dispatch a controller-bound command.
///
/// Arguments are validated before anything touches the network.
pub async fn dispatch(cmd: Command, global: &GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    let request = Request::try_from(cmd)?;
    let format = config::output_format(global, cfg)?;
    let session_config = config::resolve_session(global, cfg)?;

    let out = run(&session_config, request, format).await?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Log in, run one request, and log out whether or not the request succeeded.
async fn run(
    session_config: &SessionConfig,
    request: Request,
    format: OutputFormat,
) -> Result<String, CliError> {
    debug!(?request, url = %session_config.url, "dispatching command");
    let session = Session::connect(session_config).await?;
    debug!(platform = ?session.platform(), site = %session_config.site, "session open");
    let result = execute(session.client(), request, format).await;
    session.close().await;
    result
}

async fn execute(
    client: &LegacyClient,
    request: Request,
    format: OutputFormat,
) -> Result<String, CliError> {
    match request {
        Request::Events(query) => events::handle(client, &query, format).await,
        Request::Devices => devices::handle(client, format).await,
        Request::Clients => clients::list(client, format).await,
        Request::Station(action, mac) => clients::station(client, action, &mac, format).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use pretty_assertions::assert_eq;
    use secrecy::SecretString;
    use serde_json::json;
    use unicli_api::{ControllerPlatform, PlatformSelection, TransportConfig};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::cli::Cli;

    fn transport() -> TransportConfig {
        TransportConfig {
            timeout: Duration::from_secs(5),
            ..TransportConfig::default()
        }
    }

    fn classic_client(server: &MockServer) -> LegacyClient {
        LegacyClient::new(
            server.uri().parse().unwrap(),
            "default".into(),
            ControllerPlatform::ClassicController,
            &transport(),
        )
        .unwrap()
    }

    fn session_config(server: &MockServer) -> SessionConfig {
        SessionConfig {
            url: server.uri().parse().unwrap(),
            site: "default".into(),
            username: "ubnt".into(),
            password: SecretString::from("secret".to_owned()),
            platform: PlatformSelection::Classic,
            transport: transport(),
        }
    }

    fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
        json!({ "meta": { "rc": "ok" }, "data": data })
    }

    async fn mount_get(server: &MockServer, suffix: &str, data: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/s/default/{suffix}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(data)))
            .mount(server)
            .await;
    }

    fn request(args: &[&str]) -> Result<Request, CliError> {
        let mut argv = vec!["unicli"];
        argv.extend_from_slice(args);
        Request::try_from(Cli::parse_from(argv).command)
    }

    #[test]
    fn station_commands_normalize_mac() {
        let Ok(Request::Station(action, mac)) = request(&["block", "00-11-22-AA-BB-CC"]) else {
            panic!("expected a station request");
        };
        assert_eq!(action, StationAction::Block);
        assert_eq!(mac.as_str(), "00:11:22:aa:bb:cc");

        assert!(matches!(
            request(&["reconnect", "001122aabbcc"]),
            Ok(Request::Station(StationAction::Reconnect, _))
        ));
    }

    #[test]
    fn bad_mac_is_rejected_before_connecting() {
        let err = request(&["unblock", "not-a-mac"]).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "mac"));
    }

    #[tokio::test]
    async fn events_are_fetched_with_the_requested_window() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/s/default/stat/event"))
            .and(body_json(json!({ "_limit": 10, "_start": 0, "within": 24 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
                {
                    "_id": "e1",
                    "datetime": "2016-05-01T10:00:00Z",
                    "msg": "AP[f0:9f:c2:00:00:01] was restarted"
                }
            ]))))
            .expect(1)
            .mount(&server)
            .await;

        let query = EventQuery {
            limit: 10,
            start: 0,
            within: 24,
        };
        let out = events::handle(&classic_client(&server), &query, OutputFormat::Plain)
            .await
            .unwrap();
        assert_eq!(out, "2016-05-01T10:00:00Z\tAP[f0:9f:c2:00:00:01] was restarted");
    }

    #[tokio::test]
    async fn devices_render_station_counts() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "stat/device",
            json!([{
                "_id": "d1",
                "mac": "f0:9f:c2:00:00:01",
                "name": "Lobby AP",
                "adopt_ip": "192.168.1.20",
                "num_sta": 4,
                "guest-num_sta": 1
            }]),
        )
        .await;

        let out = devices::handle(&classic_client(&server), OutputFormat::Plain)
            .await
            .unwrap();
        assert_eq!(out, "Lobby AP 192.168.1.20 (4 users, 1 guests)");
    }

    #[tokio::test]
    async fn clients_are_joined_with_their_access_point() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "stat/device",
            json!([{ "_id": "d1", "mac": "f0:9f:c2:00:00:01", "hostname": "ap-lobby" }]),
        )
        .await;
        mount_get(
            &server,
            "stat/sta",
            json!([{
                "_id": "c1",
                "mac": "00:11:22:33:44:55",
                "hostname": "laptop",
                "oui": "Apple",
                "ap_mac": "f0:9f:c2:00:00:01",
                "channel": 36,
                "signal": -58
            }]),
        )
        .await;

        let out = clients::list(&classic_client(&server), OutputFormat::Plain)
            .await
            .unwrap();
        assert_eq!(
            out,
            "laptop (00:11:22:33:44:55 Apple) AP: ap-lobby, CH: 36, SG: -58dBm"
        );
    }

    #[tokio::test]
    async fn station_reply_is_printed_verbatim() {
        let server = MockServer::start().await;
        let reply = r#"{"meta":{"rc":"ok"},"data":[{"mac":"00:11:22:33:44:55","blocked":true}]}"#;
        Mock::given(method("POST"))
            .and(path("/api/s/default/cmd/stamgr"))
            .and(body_json(json!({ "cmd": "block-sta", "mac": "00:11:22:33:44:55" })))
            .respond_with(ResponseTemplate::new(200).set_body_string(reply))
            .expect(1)
            .mount(&server)
            .await;

        let mac = MacAddress::parse("00-11-22-33-44-55").unwrap();
        let out = clients::station(
            &classic_client(&server),
            StationAction::Block,
            &mac,
            OutputFormat::Plain,
        )
        .await
        .unwrap();
        assert_eq!(out, reply);
    }

    #[tokio::test]
    async fn session_is_closed_when_the_command_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/s/default/stat/device"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": { "rc": "error", "msg": "api.err.NoSiteContext" }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let err = run(&session_config(&server), Request::Devices, OutputFormat::Plain)
            .await
            .unwrap_err();
        assert!(
            matches!(err, CliError::ApiError { ref message } if message.contains("NoSiteContext")),
            "unexpected error: {err:?}"
        );
        server.verify().await;
    }

    #[tokio::test]
    async fn session_runs_request_between_login_and_logout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
            .expect(1)
            .mount(&server)
            .await;
        mount_get(&server, "stat/device", json!([])).await;
        mount_get(&server, "stat/sta", json!([])).await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let out = run(&session_config(&server), Request::Clients, OutputFormat::JsonCompact)
            .await
            .unwrap();
        assert_eq!(out, "[]");
        server.verify().await;
    }
}
