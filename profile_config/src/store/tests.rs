//! Unit tests for the layered store and its overlays.

use anyhow::{Result, ensure};
use figment::value::{Dict, Num, Tag, Value};
use rstest::{fixture, rstest};
use test_helpers::with_jail;

use super::*;

fn string(text: &str) -> Value {
    Value::String(Tag::Default, text.to_owned())
}

fn section(entries: &[(&str, Value)]) -> Value {
    Value::Dict(
        Tag::Default,
        entries
            .iter()
            .map(|(key, value)| ((*key).to_owned(), value.clone()))
            .collect(),
    )
}

#[fixture]
fn document() -> Dict {
    let mut root = Dict::new();
    root.insert(
        "dev".to_owned(),
        section(&[(
            "eureka",
            section(&[
                ("zone", string("A")),
                ("fetchInterval", Value::Num(Tag::Default, Num::U8(30))),
            ]),
        )]),
    );
    root.insert("name".to_owned(), string("orders"));
    root
}

#[rstest]
#[case("zone", "ZONE")]
#[case("dev.eureka.zone", "DEV_EUREKA_ZONE")]
#[case("log-level", "LOG_LEVEL")]
#[case("eureka.fetchInterval", "EUREKA_FETCHINTERVAL")]
fn flatten_key_upper_snakes(#[case] path: &str, #[case] expected: &str) {
    assert_eq!(flatten_key(path), expected);
}

#[rstest]
#[case("DEV_EUREKA_ZONE")]
#[case("dev_eureka_zone")]
#[case("Dev_Eureka_Zone")]
fn env_names_match_case_insensitively(#[case] name: &str) {
    let env = EnvLayer::new().with(name, "B");
    assert_eq!(env.get("dev.eureka.zone"), Some("B"));
}

#[rstest]
fn empty_env_value_is_unset(document: Dict) -> Result<()> {
    let store = LayeredStore::new(document).with_env(EnvLayer::new().with("NAME", ""));
    let hit = store.lookup("name").ok_or_else(|| anyhow::anyhow!("name missing"))?;
    ensure!(hit.source == Source::Document);
    Ok(())
}

#[rstest]
fn env_layer_collects_pairs() {
    let env: EnvLayer = [("A", "1"), ("B", "2")].into_iter().collect();
    assert_eq!(env.len(), 2);
    assert!(!env.is_empty());
    assert_eq!(env.get("b"), Some("2"));
}

#[rstest]
fn flag_layer_counts_flags() {
    assert!(FlagLayer::new().is_empty());
    let flags = FlagLayer::parse(["--debug", "--port=80"]);
    assert_eq!(flags.len(), 2);
    assert!(!flags.is_empty());
}

#[rstest]
fn prefixed_env_strips_the_prefix() -> Result<()> {
    let env = with_jail(|jail| {
        jail.set_env("ORDERS_EUREKA_ZONE", "C");
        jail.set_env("OTHER_EUREKA_ZONE", "D");
        Ok(EnvLayer::prefixed("orders_"))
    })?;
    ensure!(env.get("eureka.zone") == Some("C"));
    ensure!(env.len() == 1, "captured {env:?}");
    Ok(())
}

#[rstest]
#[case(&["--eureka-zone", "B"], "eureka.zone", Some("B"))]
#[case(&["--eureka.zone=B"], "eureka.zone", Some("B"))]
#[case(&["--EUREKA_ZONE", "B"], "eureka.zone", Some("B"))]
#[case(&["-v"], "v", Some("true"))]
#[case(&["--verbose", "--port", "8080"], "verbose", Some("true"))]
#[case(&["--verbose", "--port", "8080"], "port", Some("8080"))]
#[case(&["--offset=-3"], "offset", Some("-3"))]
#[case(&["--port", "1", "--port", "2"], "port", Some("2"))]
#[case(&["serve", "--port", "1"], "serve", None)]
#[case(&["--", "--port", "1"], "port", None)]
#[case(&["--=x"], "", None)]
fn flag_shapes(#[case] args: &[&str], #[case] path: &str, #[case] expected: Option<&str>) {
    let flags = FlagLayer::parse(args);
    assert_eq!(flags.get(path), expected, "flags were {flags:?}");
}

#[rstest]
fn lookup_falls_through_to_document(document: Dict) -> Result<()> {
    let store = LayeredStore::new(document);
    let hit = store
        .lookup("dev.eureka.zone")
        .ok_or_else(|| anyhow::anyhow!("zone missing"))?;
    ensure!(hit.source == Source::Document);
    ensure!(matches!(hit.entry, Entry::Document(value) if value == &string("A")));
    ensure!(store.lookup("dev.eureka.region").is_none());
    Ok(())
}

#[rstest]
fn overlays_supply_keys_absent_from_document(document: Dict) -> Result<()> {
    let flags = FlagLayer::parse(["--dev-eureka-region=eu"]);
    let store = LayeredStore::new(document).with_flags(flags);
    let hit = store
        .lookup("dev.eureka.region")
        .ok_or_else(|| anyhow::anyhow!("region missing"))?;
    ensure!(hit.source == Source::Flags);
    ensure!(matches!(hit.entry, Entry::Raw("eu")));
    Ok(())
}

#[rstest]
#[case(Precedence::EnvOverFlags, "env")]
#[case(Precedence::FlagsOverEnv, "flag")]
fn precedence_orders_overlays(
    document: Dict,
    #[case] precedence: Precedence,
    #[case] expected: &str,
) {
    let store = LayeredStore::new(document)
        .with_env(EnvLayer::new().with("NAME", "env"))
        .with_flags(FlagLayer::new().with("name", "flag"))
        .with_precedence(precedence);
    assert_eq!(store.precedence(), precedence);
    assert_eq!(store.get_string("name").as_deref(), Some(expected));
}

#[rstest]
fn get_coerces_to_the_requested_kind(document: Dict) -> Result<()> {
    let store = LayeredStore::new(document);
    let found = store
        .get("dev.eureka.fetchInterval", &FieldKind::unsigned(16))
        .ok_or_else(|| anyhow::anyhow!("fetchInterval missing"))?;
    ensure!(found.value == Value::Num(Tag::Default, Num::U64(30)));
    ensure!(store.get_string("dev.eureka.fetchInterval").as_deref() == Some("30"));
    Ok(())
}

#[rstest]
fn incompatible_value_reads_as_absent(document: Dict) {
    let store = LayeredStore::new(document).with_env(EnvLayer::new().with("NAME", "many"));
    assert!(store.get("dev", &FieldKind::String).is_none());
    assert!(store.get("name", &FieldKind::unsigned(8)).is_none());
}

#[rstest]
fn focus_scopes_document_and_overlays(document: Dict) -> Result<()> {
    let store = LayeredStore::new(document).with_env(EnvLayer::new().with("DEV_EUREKA_ZONE", "B"));
    let dev = store
        .focus("dev")
        .ok_or_else(|| anyhow::anyhow!("dev is a section"))?;
    ensure!(dev.scope() == Some("dev"));
    ensure!(dev.full_path("eureka.zone") == "dev.eureka.zone");
    ensure!(dev.get_string("eureka.zone").as_deref() == Some("B"));
    ensure!(dev.get_string("name").is_none());

    let eureka = dev
        .focus("eureka")
        .ok_or_else(|| anyhow::anyhow!("eureka is a section"))?;
    ensure!(eureka.scope() == Some("dev.eureka"));
    ensure!(eureka.get_string("fetchInterval").as_deref() == Some("30"));
    Ok(())
}

#[rstest]
#[case("name")]
#[case("production")]
fn focus_requires_a_mapping(document: Dict, #[case] name: &str) {
    assert!(LayeredStore::new(document).focus(name).is_none());
}

#[rstest]
fn source_displays_layer_name() {
    assert_eq!(Source::Environment.to_string(), "environment");
    assert_eq!(Source::Default.to_string(), "default");
}
