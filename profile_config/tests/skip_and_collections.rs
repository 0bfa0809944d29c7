//! Skipped fields, collection kinds and hand-written schemas.

use std::collections::{BTreeMap, HashMap};

use anyhow::{Result, ensure};
use profile_config::schema::{Bind, FieldDescriptor, FieldKind, FieldMeta, leaf_paths};
use profile_config::{
    EnvLayer, FlagLayer, LayeredStore, Profile, ProfileError, ProfileResult, Source, Walker, bind,
};
use rstest::rstest;

#[derive(Debug, Default, PartialEq, Profile, serde::Deserialize)]
struct Credentials {
    #[profile(default = "admin")]
    user: String,
    #[profile(default = "secret")]
    password: String,
}

#[derive(Debug, Default, Profile)]
struct Settings {
    #[profile(default = "orders")]
    name: String,
    #[profile(skip)]
    credentials: Credentials,
    #[profile(key = "_")]
    cache: Credentials,
}

#[rstest]
fn skipped_subtrees_are_never_written() -> Result<()> {
    let store = LayeredStore::default().with_env(
        EnvLayer::new()
            .with("CREDENTIALS_USER", "intruder")
            .with("__USER", "intruder")
            .with("_", "intruder"),
    );
    let mut settings = Settings {
        credentials: Credentials {
            user: "kept".to_owned(),
            password: "kept".to_owned(),
        },
        ..Settings::default()
    };
    let report = bind(&store, &mut settings)?;
    ensure!(settings.name == "orders");
    ensure!(settings.credentials.user == "kept");
    ensure!(settings.cache == Credentials::default());
    ensure!(report.len() == 1, "report was {report:?}");
    ensure!(leaf_paths::<Settings>() == ["name"]);
    Ok(())
}

#[derive(Debug, Default, Profile)]
struct Collections {
    #[profile(default = "[\"admin\",\"test\",\"root\"]")]
    users: Vec<String>,
    #[profile(default = "[1, 2, 3]")]
    ports: Vec<u16>,
    #[profile(default = "{\"consul\":\"debug\"}")]
    levels: BTreeMap<String, String>,
    #[profile(default = "{}")]
    limits: HashMap<String, u32>,
    #[profile(default = "{\"any\":[1,\"two\",true]}")]
    extra: serde_json::Value,
}

#[rstest]
fn structured_defaults_parse_as_json() -> Result<()> {
    let mut collections = Collections::default();
    bind(&LayeredStore::default(), &mut collections)?;
    ensure!(collections.users == ["admin", "test", "root"]);
    ensure!(collections.ports == [1, 2, 3]);
    ensure!(collections.levels.get("consul").map(String::as_str) == Some("debug"));
    ensure!(collections.limits.is_empty());
    ensure!(collections.extra == serde_json::json!({"any": [1, "two", true]}));
    Ok(())
}

#[rstest]
fn collection_elements_are_range_checked() {
    let store = LayeredStore::default().with_env(EnvLayer::new().with("PORTS", "[1, 70000]"));
    let mut collections = Collections::default();
    let report = bind(&store, &mut collections).expect("falls back to the default");
    assert_eq!(collections.ports, [1, 2, 3]);
    assert_eq!(report.source_of("ports"), Some(Source::Default));
}

#[rstest]
#[case(EnvLayer::new().with("USERS", "admin"), FlagLayer::new())]
#[case(EnvLayer::new(), FlagLayer::parse(["--users", "admin"]))]
fn single_overlay_item_is_a_one_element_list(
    #[case] env: EnvLayer,
    #[case] flags: FlagLayer,
) -> Result<()> {
    let store = LayeredStore::default().with_env(env).with_flags(flags);
    let mut collections = Collections::default();
    let report = bind(&store, &mut collections)?;
    ensure!(collections.users == ["admin"], "users were {:?}", collections.users);
    ensure!(report.source_of("users") != Some(Source::Default));
    Ok(())
}

#[derive(Debug, Default, Profile)]
struct Nested {
    #[profile(default = "[]")]
    children: Vec<Credentials>,
}

#[rstest]
fn sequences_of_composites_are_unsupported() {
    let mut nested = Nested::default();
    let err = bind(&LayeredStore::default(), &mut nested).expect_err("no coercion rule");
    assert!(matches!(err, ProfileError::UnsupportedKind { .. }), "got {err:?}");
    assert_eq!(err.path(), Some("children"));
}

/// Schema written without the derive, using const metadata.
#[derive(Debug, Default)]
struct Eureka {
    zone: String,
    fetch_interval: u32,
}

const ZONE: FieldMeta = FieldMeta::new("Zone").with_default("primary");
const FETCH_INTERVAL: FieldMeta = FieldMeta::new("FetchInterval").with_default("30");

impl Profile for Eureka {
    fn walk(&mut self, walker: &mut Walker<'_>) -> ProfileResult<()> {
        walker.field(ZONE, &mut self.zone)?;
        walker.field(FETCH_INTERVAL, &mut self.fetch_interval)
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new(ZONE, String::kind()),
            FieldDescriptor::new(FETCH_INTERVAL, u32::kind()),
        ]
    }
}

#[derive(Debug, Default, Profile)]
struct Cloud {
    eureka: Eureka,
}

impl Bind for Eureka {
    fn kind() -> FieldKind {
        FieldKind::Composite(Self::fields())
    }

    fn bind(
        &mut self,
        walker: &mut Walker<'_>,
        path: &str,
        _default: Option<&str>,
    ) -> ProfileResult<()> {
        profile_config::schema::bind_composite(self, walker, path)
    }
}

#[rstest]
fn hand_written_schemas_nest_under_derived_ones() -> Result<()> {
    let store = LayeredStore::default().with_env(EnvLayer::new().with("EUREKA_ZONE", "B"));
    let mut cloud = Cloud::default();
    bind(&store, &mut cloud)?;
    ensure!(cloud.eureka.zone == "B");
    ensure!(cloud.eureka.fetch_interval == 30);
    ensure!(leaf_paths::<Cloud>() == ["eureka.zone", "eureka.fetchInterval"]);
    Ok(())
}

mod aliased {
    //! The derive honours a renamed crate path.

    use profile_config as settings;
    use rstest::rstest;

    #[derive(Debug, Default, settings::Profile)]
    #[profile(crate = "settings")]
    struct Aliased {
        #[profile(default = "7")]
        workers: u8,
    }

    #[rstest]
    fn derive_uses_the_aliased_path() {
        let mut aliased = Aliased::default();
        settings::bind(&settings::LayeredStore::default(), &mut aliased).expect("default applies");
        assert_eq!(aliased.workers, 7);
    }
}
