//! End-to-end tests for `run_triage`.
//!
//! Each test writes a connection listing and a country table to scratch files,
//! points the RDAP resolver at a `wiremock` server and checks the report and
//! the written redlist.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use netstat_redlist::geo::GeoRecord;
use netstat_redlist::initialization::init_client;
use netstat_redlist::netstat::Ipv4Token;
use netstat_redlist::{
    run_triage, run_triage_with, Config, GeoResolver, LookupError, NoProgress, OutputLayout,
    RdapResolver, TriageError,
};
use serde_json::json;
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = "\
Active Internet connections (servers and established)
Proto Recv-Q Send-Q Local Address           Foreign Address         State
tcp        0      0 0.0.0.0:22              0.0.0.0:*               LISTEN
tcp        0      0 192.168.1.5:51000       203.0.113.9:443         ESTABLISHED
tcp        0      0 192.168.1.5:51002       198.51.100.2:443        ESTABLISHED
tcp        0      0 192.168.1.5:51004       192.0.2.8:443           CLOSE_WAIT
tcp        0      0 192.168.1.5:51006       203.0.113.9:80          ESTABLISHED
tcp6       0      0 :::22                   :::*                    LISTEN
";

/// Helper function to write text to a temporary file (sync I/O)
fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush file");
    file
}

fn country_table() -> NamedTempFile {
    write_temp("China,CN\nUnited States,US\nGermany,DE\n")
}

/// Helper function to create a basic Config for testing
fn create_test_config(
    input: PathBuf,
    country_codes: PathBuf,
    output_dir: &TempDir,
    server: &MockServer,
) -> Config {
    Config {
        input,
        output: output_dir.path().join("redlist.txt"),
        country_codes,
        timeout_seconds: 1,
        rdap_url: server.uri(),
        ..Default::default()
    }
}

async fn mount_network(server: &MockServer, address: &str, country: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/ip/{address}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "country": country, "name": name })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_foreign_addresses_are_redlisted_in_input_order() {
    let server = MockServer::start().await;
    mount_network(&server, "203.0.113.9", "CN", "Example ISP").await;
    mount_network(&server, "198.51.100.2", "US", "Domestic Carrier").await;
    mount_network(&server, "192.0.2.8", "DE", "Hosting").await;

    let input = write_temp(LISTING);
    let table = country_table();
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        input.path().to_path_buf(),
        table.path().to_path_buf(),
        &out_dir,
        &server,
    );

    let report = run_triage(config, Arc::new(NoProgress))
        .await
        .expect("run should succeed");

    // The listening socket's `0.0.0.0:*` peer is not an address
    assert_eq!(report.lines_read, 8);
    assert_eq!(report.addresses_extracted, 4);
    assert_eq!(report.unique_addresses, 3);
    assert_eq!(report.classified, 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.foreign, 2);

    let written = std::fs::read_to_string(&report.output).expect("redlist should exist");
    assert_eq!(written, "203.0.113.9,CN,China\n192.0.2.8,DE,Germany\n");
}

#[tokio::test]
async fn test_timeout_skips_address_and_run_continues() {
    let server = MockServer::start().await;
    mount_network(&server, "203.0.113.9", "CN", "Example ISP").await;
    Mock::given(method("GET"))
        .and(path("/ip/198.51.100.2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "country": "RU" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let input = write_temp(
        "tcp 0 0 10.0.0.2:50000 198.51.100.2:443 ESTABLISHED\n\
         tcp 0 0 10.0.0.2:50001 203.0.113.9:443 ESTABLISHED\n",
    );
    let table = country_table();
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        input.path().to_path_buf(),
        table.path().to_path_buf(),
        &out_dir,
        &server,
    );

    let report = run_triage(config, Arc::new(NoProgress))
        .await
        .expect("run should succeed");

    assert_eq!(report.skipped, 1);
    assert_eq!(report.foreign, 1);
    let written = std::fs::read_to_string(&report.output).unwrap();
    assert_eq!(written, "203.0.113.9,CN,China\n");
}

#[tokio::test]
async fn test_slow_first_lookup_does_not_reorder_redlist() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ip/192.0.2.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "country": "DE", "name": "Slow" }))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    mount_network(&server, "192.0.2.2", "CN", "Fast").await;
    mount_network(&server, "192.0.2.3", "FR", "Fast").await;

    let input = write_temp(
        "  TCP    10.0.0.2:49712         192.0.2.1:443      ESTABLISHED\n\
         \x20 TCP    10.0.0.2:49713         192.0.2.2:443      ESTABLISHED\n\
         \x20 TCP    10.0.0.2:49714         192.0.2.3:443      LISTENING\n",
    );
    let table = country_table();
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        input.path().to_path_buf(),
        table.path().to_path_buf(),
        &out_dir,
        &server,
    );

    let report = run_triage(config, Arc::new(NoProgress))
        .await
        .expect("run should succeed");

    let written = std::fs::read_to_string(&report.output).unwrap();
    assert_eq!(
        written,
        "192.0.2.1,DE,Germany\n192.0.2.2,CN,China\n192.0.2.3,FR,<not listed>\n"
    );
}

#[tokio::test]
async fn test_all_domestic_writes_placeholder() {
    let server = MockServer::start().await;
    mount_network(&server, "203.0.113.9", "US", "Domestic").await;

    let input = write_temp("tcp 0 0 192.168.1.5:51000 203.0.113.9:443 ESTABLISHED\n");
    let table = country_table();
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(
        input.path().to_path_buf(),
        table.path().to_path_buf(),
        &out_dir,
        &server,
    );
    config.output_layout = OutputLayout::Concatenated;

    let report = run_triage(config, Arc::new(NoProgress))
        .await
        .expect("run should succeed");

    assert!(report.redlist.is_empty());
    let written = std::fs::read_to_string(&report.output).unwrap();
    assert_eq!(written, "No external addresses found.");
}

#[tokio::test]
async fn test_concatenated_layout_has_no_separators() {
    let server = MockServer::start().await;
    mount_network(&server, "203.0.113.9", "CN", "Example ISP").await;
    mount_network(&server, "192.0.2.8", "DE", "Hosting").await;

    let input = write_temp(
        "tcp 0 0 10.0.0.2:50000 203.0.113.9:443 ESTABLISHED\n\
         tcp 0 0 10.0.0.2:50001 192.0.2.8:443 ESTABLISHED\n",
    );
    let table = country_table();
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(
        input.path().to_path_buf(),
        table.path().to_path_buf(),
        &out_dir,
        &server,
    );
    config.output_layout = OutputLayout::Concatenated;

    let report = run_triage(config, Arc::new(NoProgress))
        .await
        .expect("run should succeed");

    let written = std::fs::read_to_string(&report.output).unwrap();
    assert_eq!(written, "203.0.113.9,CN,China192.0.2.8,DE,Germany");
}

#[tokio::test]
async fn test_missing_country_table_is_not_fatal() {
    let server = MockServer::start().await;
    mount_network(&server, "203.0.113.9", "CN", "Example ISP").await;

    let input = write_temp("tcp 0 0 10.0.0.2:50000 203.0.113.9:443 ESTABLISHED\n");
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        input.path().to_path_buf(),
        out_dir.path().join("no_country_codes.txt"),
        &out_dir,
        &server,
    );

    let report = run_triage(config, Arc::new(NoProgress))
        .await
        .expect("run should succeed");

    let written = std::fs::read_to_string(&report.output).unwrap();
    assert_eq!(written, "203.0.113.9,CN,<not listed>\n");
}

#[tokio::test]
async fn test_missing_input_fails_before_any_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "country": "CN" })))
        .expect(0)
        .mount(&server)
        .await;

    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let table = country_table();
    let config = create_test_config(
        out_dir.path().join("does_not_exist.txt"),
        table.path().to_path_buf(),
        &out_dir,
        &server,
    );
    let output = config.output.clone();

    let err = run_triage(config, Arc::new(NoProgress))
        .await
        .unwrap_err();

    assert!(matches!(err, TriageError::InputNotFound(_)));
    assert!(err.to_string().starts_with("Address file does not exist: "));
    assert!(!output.exists(), "no redlist should be written");
}

#[tokio::test]
async fn test_unwritable_output_is_an_error() {
    let server = MockServer::start().await;
    let input = write_temp("no records here\n");
    let table = country_table();
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(
        input.path().to_path_buf(),
        table.path().to_path_buf(),
        &out_dir,
        &server,
    );
    config.output = out_dir.path().join("missing_dir").join("redlist.txt");

    let err = run_triage(config, Arc::new(NoProgress))
        .await
        .unwrap_err();
    assert!(matches!(err, TriageError::OutputWrite { .. }));
}

/// Origin lookup keyed by address, standing in for the ASN-origin zone.
struct OriginTable(Vec<(&'static str, &'static str)>);

#[async_trait]
impl GeoResolver for OriginTable {
    async fn lookup(
        &self,
        address: &Ipv4Token,
        _timeout: Duration,
    ) -> Result<GeoRecord, LookupError> {
        self.0
            .iter()
            .find(|(ip, _)| *ip == address.as_str())
            .map(|(_, cc)| GeoRecord {
                country_code: cc.to_string(),
                description: String::new(),
            })
            .ok_or(LookupError::MissingField("country"))
    }
}

#[tokio::test]
async fn test_networks_without_rdap_country_are_classified_by_origin() {
    let server = MockServer::start().await;
    for (address, name) in [("142.250.0.1", "GOOGLE"), ("192.0.2.20", "EXAMPLE-CA")] {
        Mock::given(method("GET"))
            .and(path(format!("/ip/{address}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "objectClassName": "ip network",
                "handle": format!("NET-{address}"),
                "name": name,
                "entities": [{ "objectClassName": "entity", "roles": ["registrant"] }]
            })))
            .mount(&server)
            .await;
    }

    let input = write_temp(
        "tcp 0 0 10.0.0.2:50000 142.250.0.1:443 ESTABLISHED\n\
         tcp 0 0 10.0.0.2:50001 192.0.2.20:443 ESTABLISHED\n",
    );
    let table = write_temp("United States,US\nCanada,CA\n");
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        input.path().to_path_buf(),
        table.path().to_path_buf(),
        &out_dir,
        &server,
    );

    let client = init_client(config.lookup_timeout()).expect("Failed to build client");
    let resolver = RdapResolver::new(client, server.uri()).with_country_fallback(Arc::new(
        OriginTable(vec![("142.250.0.1", "US"), ("192.0.2.20", "CA")]),
    ));

    let report = run_triage_with(config, Arc::new(resolver), Arc::new(NoProgress))
        .await
        .expect("run should succeed");

    assert_eq!(report.classified, 2);
    assert_eq!(report.skipped, 0);
    let written = std::fs::read_to_string(&report.output).unwrap();
    assert_eq!(written, "192.0.2.20,CA,Canada\n");
}
