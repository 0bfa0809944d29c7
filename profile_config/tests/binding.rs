//! End-to-end binding of nested schemas from a layered store.

use anyhow::{Result, ensure};
use figment::value::{Dict, Tag, Value};
use profile_config::{
    EnvLayer, FlagLayer, LayeredStore, Precedence, Profile, ProfileError, Source, bind,
};
use rstest::{fixture, rstest};

#[derive(Debug, Default, Profile)]
#[profile(rename_all = "camelCase")]
struct Eureka {
    #[profile(default = "primary")]
    zone: String,
    #[profile(default = "30")]
    fetch_interval: u32,
    #[profile(default = "[\"eureka-1\"]")]
    peers: Vec<String>,
}

#[derive(Debug, Default, Profile)]
struct DataSource {
    #[profile(default = "localhost")]
    host: String,
    #[profile(default = "5432")]
    port: u16,
    #[profile(key = "pool.max", default = "10")]
    max_connections: u8,
}

#[derive(Debug, Default, Profile)]
#[profile(rename_all = "camelCase")]
struct Service {
    eureka: Eureka,
    data_source: DataSource,
    #[profile(default = "false")]
    debug: bool,
}

fn document(entries: Vec<(&str, Value)>) -> Dict {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

fn section(entries: Vec<(&str, Value)>) -> Value {
    Value::Dict(Tag::Default, document(entries))
}

fn text(value: &str) -> Value {
    Value::String(Tag::Default, value.to_owned())
}

#[fixture]
fn store() -> LayeredStore {
    LayeredStore::new(document(vec![
        ("eureka", section(vec![("zone", text("A"))])),
        (
            "dataSource",
            section(vec![
                ("host", text("db.internal")),
                ("pool", section(vec![("max", text("25"))])),
            ]),
        ),
    ]))
}

#[rstest]
fn environment_overrides_document_zone(store: LayeredStore) -> Result<()> {
    let layered = store
        .with_env(EnvLayer::new().with("EUREKA_ZONE", "B"))
        .with_precedence(Precedence::EnvOverFlags);
    let mut service = Service::default();
    let report = bind(&layered, &mut service)?;
    ensure!(service.eureka.zone == "B", "zone was {}", service.eureka.zone);
    ensure!(report.source_of("eureka.zone") == Some(Source::Environment));
    Ok(())
}

#[rstest]
fn nested_paths_concatenate(store: LayeredStore) -> Result<()> {
    let mut service = Service::default();
    let report = bind(&store, &mut service)?;
    ensure!(service.data_source.host == "db.internal");
    ensure!(service.data_source.max_connections == 25);
    let paths: Vec<_> = report.iter().map(|field| field.path.as_str()).collect();
    ensure!(
        paths
            == [
                "eureka.zone",
                "eureka.fetchInterval",
                "eureka.peers",
                "dataSource.host",
                "dataSource.port",
                "dataSource.pool.max",
                "debug",
            ],
        "paths were {paths:?}"
    );
    Ok(())
}

#[rstest]
fn defaults_fill_every_miss(store: LayeredStore) -> Result<()> {
    let mut service = Service::default();
    let report = bind(&store, &mut service)?;
    ensure!(service.eureka.fetch_interval == 30);
    ensure!(service.eureka.peers == ["eureka-1"]);
    ensure!(service.data_source.port == 5432);
    ensure!(!service.debug);
    ensure!(report.source_of("dataSource.port") == Some(Source::Default));
    ensure!(report.source_of("dataSource.host") == Some(Source::Document));
    Ok(())
}

#[derive(Debug, Default, Profile)]
struct Small {
    #[profile(default = "10")]
    retries: u8,
}

#[derive(Debug, Default, Profile)]
struct Overflowing {
    #[profile(default = "300")]
    retries: u8,
}

#[rstest]
fn eight_bit_default_binds() -> Result<()> {
    let mut small = Small::default();
    bind(&LayeredStore::default(), &mut small)?;
    ensure!(small.retries == 10);
    Ok(())
}

#[rstest]
fn eight_bit_default_overflow_fails() {
    let mut overflowing = Overflowing::default();
    let err = bind(&LayeredStore::default(), &mut overflowing).expect_err("300 does not fit");
    let ProfileError::DefaultParse { path, literal, .. } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(path, "retries");
    assert_eq!(literal, "300");
    assert_eq!(overflowing.retries, 0);
}

#[derive(Debug, Default, Profile)]
struct Host {
    #[profile(default = "localhost")]
    host: String,
}

#[rstest]
#[case(LayeredStore::default(), "localhost")]
#[case(
    LayeredStore::new(document(vec![("host", text("  db.example.com  "))])),
    "  db.example.com  "
)]
#[case(
    LayeredStore::default().with_flags(FlagLayer::parse(["--host", "flagged"])),
    "flagged"
)]
fn string_default_only_on_miss(#[case] store: LayeredStore, #[case] expected: &str) -> Result<()> {
    let mut host = Host::default();
    bind(&store, &mut host)?;
    ensure!(host.host == expected, "host was {:?}", host.host);
    Ok(())
}

#[derive(Debug, Default, Profile)]
struct Required {
    first: String,
    second: String,
}

#[rstest]
fn missing_default_aborts_after_earlier_fields() {
    let store = LayeredStore::default().with_env(EnvLayer::new().with("FIRST", "one"));
    let mut required = Required::default();
    let err = bind(&store, &mut required).expect_err("second has no value");
    assert_eq!(err.path(), Some("second"));
    assert!(err.to_string().contains("second"));
    assert_eq!(required.first, "one");
    assert!(required.second.is_empty());
}

#[rstest]
fn overlay_values_coerce_by_field_type() -> Result<()> {
    let store = LayeredStore::default().with_env(
        EnvLayer::new()
            .with("EUREKA_FETCHINTERVAL", "45")
            .with("EUREKA_PEERS", "[\"a\",\"b\"]")
            .with("DATASOURCE_PORT", "6543")
            .with("DEBUG", "TRUE"),
    );
    let mut service = Service::default();
    bind(&store, &mut service)?;
    ensure!(service.eureka.fetch_interval == 45);
    ensure!(service.eureka.peers == ["a", "b"]);
    ensure!(service.data_source.port == 6543);
    ensure!(service.debug);
    Ok(())
}

#[rstest]
fn malformed_overlay_falls_back_to_default() -> Result<()> {
    let store = LayeredStore::default().with_env(EnvLayer::new().with("DATASOURCE_PORT", "70000"));
    let mut service = Service::default();
    let report = bind(&store, &mut service)?;
    ensure!(service.data_source.port == 5432);
    ensure!(report.source_of("dataSource.port") == Some(Source::Default));
    Ok(())
}
